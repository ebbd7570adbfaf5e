//! # Módulo de Simulación Principal
//!
//! Este módulo coordina una ejecución completa: valida la carga de
//! trabajo, ejecuta el algoritmo seleccionado, calcula las métricas y
//! produce los reportes.

use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::Result;
use crate::metrics::{MetricsCalculator, ScheduleMetrics};
use crate::process::Process;
use crate::scheduler::{AlgorithmKind, RoundRobinAdmission, SchedulingAlgorithm};
use crate::timeline::Timeline;
use crate::workload::ProcessSpec;

/// Resultado completo de una simulación, listo para mostrar o exportar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub algorithm: SchedulingAlgorithm,
    /// Línea de tiempo cruda, tal como la produjo el algoritmo
    pub timeline: Timeline,
    pub metrics: ScheduleMetrics,
}

impl SimulationReport {
    /// Serializa el reporte completo como JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Orquestador de una simulación de planificación.
///
/// Cada llamada a [`Simulation::run`] construye sus propios registros de
/// proceso a partir de la carga de trabajo, así que ejecutar varias veces
/// (o con varios algoritmos) nunca comparte estado.
pub struct Simulation {
    /// Pares `(llegada, ráfaga)` en orden de entrada
    processes: Vec<ProcessSpec>,
    /// Algoritmo a ejecutar
    algorithm: SchedulingAlgorithm,
    /// Calculadora de métricas para generar reportes
    metrics_calculator: MetricsCalculator,
}

impl Simulation {
    /// Crea una simulación sobre la carga de trabajo por defecto.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::{Simulation, SchedulingAlgorithm};
    ///
    /// let report = Simulation::new(SchedulingAlgorithm::fcfs()).run().unwrap();
    /// assert_eq!(report.metrics.processes.len(), 3);
    /// ```
    pub fn new(algorithm: SchedulingAlgorithm) -> Self {
        Self::with_processes(config::default_workload(), algorithm)
    }

    /// Crea una simulación con una carga de trabajo propia.
    ///
    /// # Arguments
    ///
    /// * `processes` - Pares `(llegada, ráfaga)`; se validan al ejecutar
    /// * `algorithm` - Algoritmo a ejecutar
    pub fn with_processes(processes: Vec<ProcessSpec>, algorithm: SchedulingAlgorithm) -> Self {
        Self {
            processes,
            algorithm,
            metrics_calculator: MetricsCalculator::new(),
        }
    }

    /// Obtiene el algoritmo configurado.
    ///
    /// # Returns
    ///
    /// Una copia del algoritmo con sus parámetros
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::{Simulation, SchedulingAlgorithm};
    ///
    /// let simulation = Simulation::new(SchedulingAlgorithm::srt());
    /// assert!(simulation.algorithm().is_preemptive());
    /// ```
    pub fn algorithm(&self) -> SchedulingAlgorithm {
        self.algorithm
    }

    /// Obtiene la carga de trabajo en orden de entrada.
    pub fn processes(&self) -> &[ProcessSpec] {
        &self.processes
    }

    /// Ejecuta la simulación completa.
    ///
    /// # Errors
    ///
    /// `EmptyInput` o `InvalidProcessParameter` si la carga de trabajo no es
    /// válida; en ese caso no se produce línea de tiempo alguna
    pub fn run(&self) -> Result<SimulationReport> {
        log::info!(
            "simulación {} con {} procesos",
            self.algorithm,
            self.processes.len()
        );

        let processes = Process::from_specs(&self.processes)?;
        let outcome = self.algorithm.schedule(processes)?;
        let metrics = self.metrics_calculator.calculate(&outcome);

        log::info!(
            "simulación {} completada: {} segmentos, espera promedio {}",
            self.algorithm,
            outcome.timeline.len(),
            MetricsCalculator::format_average(metrics.average_waiting_time)
        );

        Ok(SimulationReport {
            algorithm: outcome.algorithm,
            timeline: outcome.timeline,
            metrics,
        })
    }

    /// Genera el reporte de texto de una ejecución.
    pub fn generate_report(&self, report: &SimulationReport) -> String {
        self.metrics_calculator.generate_report(
            &report.algorithm.to_string(),
            &report.timeline,
            &report.metrics,
        )
    }

    /// Genera el reporte CSV de una ejecución.
    pub fn generate_csv_report(&self, report: &SimulationReport) -> String {
        self.metrics_calculator.generate_csv_report(&report.metrics)
    }

    /// Ejecuta los cuatro algoritmos sobre la misma carga de trabajo.
    ///
    /// # Arguments
    ///
    /// * `processes` - Carga de trabajo común
    /// * `quantum` - Quantum para Round Robin
    /// * `admission` - Política de admisión para Round Robin
    ///
    /// # Returns
    ///
    /// Un reporte por algoritmo, en el orden FCFS, SJF, SRT, Round Robin
    pub fn compare(
        processes: &[ProcessSpec],
        quantum: i64,
        admission: RoundRobinAdmission,
    ) -> Result<Vec<SimulationReport>> {
        AlgorithmKind::ALL
            .iter()
            .map(|kind| {
                let algorithm = kind.build(quantum, admission)?;
                Self::with_processes(processes.to_vec(), algorithm).run()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchedulerError;

    #[test]
    fn test_default_workload_runs() {
        let simulation = Simulation::new(SchedulingAlgorithm::sjf());
        let report = simulation.run().unwrap();
        assert_eq!(report.timeline.to_string(), "P1(0-5) P2(5-8) P3(8-16)");
        assert_eq!(report.algorithm, SchedulingAlgorithm::Sjf);
        assert_eq!(simulation.algorithm(), report.algorithm);
        assert_eq!(simulation.processes(), config::default_workload().as_slice());
    }

    #[test]
    fn test_invalid_workload_produces_no_report() {
        let simulation = Simulation::with_processes(
            vec![ProcessSpec::new(0, 3), ProcessSpec::new(-1, 2)],
            SchedulingAlgorithm::fcfs(),
        );
        assert!(matches!(
            simulation.run(),
            Err(SchedulerError::InvalidProcessParameter { process: 2, .. })
        ));

        let empty = Simulation::with_processes(Vec::new(), SchedulingAlgorithm::srt());
        assert_eq!(empty.run(), Err(SchedulerError::EmptyInput));
    }

    #[test]
    fn test_compare_runs_every_algorithm() {
        let reports =
            Simulation::compare(&config::default_workload(), 2, RoundRobinAdmission::Upfront)
                .unwrap();
        let names: Vec<String> = reports.iter().map(|r| r.algorithm.to_string()).collect();
        assert_eq!(names, vec!["FCFS", "SJF", "SRT", "Round Robin (quantum 2)"]);

        for report in &reports {
            assert_eq!(report.metrics.processes.len(), 3);
        }
    }

    #[test]
    fn test_compare_rejects_bad_quantum() {
        assert_eq!(
            Simulation::compare(&config::default_workload(), 0, RoundRobinAdmission::Upfront),
            Err(SchedulerError::InvalidQuantum(0))
        );
    }

    #[test]
    fn test_json_export() {
        let report = Simulation::new(SchedulingAlgorithm::round_robin(2).unwrap())
            .run()
            .unwrap();
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["algorithm"]["kind"], "round_robin");
        assert_eq!(value["algorithm"]["quantum"], 2);
        assert_eq!(value["metrics"]["processes"][0]["id"], 1);

        let back: SimulationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.timeline, report.timeline);
        assert_eq!(back.metrics.completion_order, report.metrics.completion_order);
    }
}
