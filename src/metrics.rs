//! # Módulo de Métricas y Reportes
//!
//! Este módulo se encarga de calcular las métricas de una ejecución de
//! planificación y de generar los reportes de texto y CSV.

use serde::{Deserialize, Serialize};

use crate::process::{Process, ProcessId};
use crate::scheduler::ScheduleOutcome;
use crate::timeline::Timeline;

/// Métricas individuales de un proceso completado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    pub id: ProcessId,
    pub arrival_time: u64,
    pub burst_time: u64,
    /// Instante de finalización
    pub completion_time: u64,
    /// Tiempo listo pero sin CPU
    pub waiting_time: u64,
    /// Tiempo desde la llegada hasta la finalización
    pub turnaround_time: u64,
}

/// Métricas agregadas de una ejecución.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    /// Métricas por proceso, ordenadas por identificador
    pub processes: Vec<ProcessMetrics>,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    /// Orden de finalización de los procesos
    pub completion_order: Vec<ProcessId>,
    /// Instante en que termina el último segmento
    pub makespan: u64,
    /// Fracción del makespan con la CPU ocupada
    pub cpu_utilization: f64,
    /// Procesos completados por unidad de tiempo
    pub throughput: f64,
}

/// Calculadora de métricas para los resultados de planificación.
pub struct MetricsCalculator;

impl MetricsCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Calcula las métricas de un proceso.
    ///
    /// # Returns
    ///
    /// `None` si el proceso todavía no terminó
    pub fn calculate_process_metrics(&self, process: &Process) -> Option<ProcessMetrics> {
        Some(ProcessMetrics {
            id: process.id,
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            completion_time: process.completion_time()?,
            waiting_time: process.waiting_time()?,
            turnaround_time: process.turnaround_time()?,
        })
    }

    /// Calcula las métricas agregadas de una ejecución.
    ///
    /// Los promedios son la media aritmética sobre todos los procesos
    /// completados. Una ejecución siempre tiene al menos un proceso, pero
    /// si no hubiera ninguno los promedios valen 0 en lugar de dividir por
    /// cero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::{MetricsCalculator, ProcessSpec, SchedulingAlgorithm};
    ///
    /// let specs = [ProcessSpec::new(0, 5), ProcessSpec::new(1, 3), ProcessSpec::new(2, 8)];
    /// let outcome = SchedulingAlgorithm::fcfs().run(&specs).unwrap();
    /// let metrics = MetricsCalculator::new().calculate(&outcome);
    /// assert_eq!(MetricsCalculator::format_average(metrics.average_waiting_time), "3.33");
    /// assert_eq!(MetricsCalculator::format_average(metrics.average_turnaround_time), "8.67");
    /// ```
    pub fn calculate(&self, outcome: &ScheduleOutcome) -> ScheduleMetrics {
        let completion_order: Vec<ProcessId> = outcome
            .processes
            .iter()
            .filter(|p| p.is_completed())
            .map(|p| p.id)
            .collect();

        let mut processes: Vec<ProcessMetrics> = outcome
            .processes
            .iter()
            .filter_map(|p| self.calculate_process_metrics(p))
            .collect();
        processes.sort_by_key(|m| m.id);

        let count = processes.len();
        // Cada tiempo cabe en u64, pero su suma no necesariamente
        let total_waiting: u128 = processes.iter().map(|m| u128::from(m.waiting_time)).sum();
        let total_turnaround: u128 = processes
            .iter()
            .map(|m| u128::from(m.turnaround_time))
            .sum();

        let (average_waiting_time, average_turnaround_time) = if count > 0 {
            (
                total_waiting as f64 / count as f64,
                total_turnaround as f64 / count as f64,
            )
        } else {
            (0.0, 0.0)
        };

        let makespan = outcome.timeline.makespan();
        let (cpu_utilization, throughput) = if makespan > 0 {
            let busy = makespan - outcome.timeline.idle_time();
            (busy as f64 / makespan as f64, count as f64 / makespan as f64)
        } else {
            (0.0, 0.0)
        };

        ScheduleMetrics {
            processes,
            average_waiting_time,
            average_turnaround_time,
            completion_order,
            makespan,
            cpu_utilization,
            throughput,
        }
    }

    /// Genera un reporte de texto con el diagrama de Gantt, la tabla por
    /// proceso y los promedios.
    ///
    /// Los segmentos contiguos de un mismo proceso se fusionan antes de
    /// mostrarse.
    pub fn generate_report(
        &self,
        title: &str,
        timeline: &Timeline,
        metrics: &ScheduleMetrics,
    ) -> String {
        let mut report = String::new();

        report.push_str(&format!("\n======= Resultados {} =======\n", title));
        report.push_str("\nDiagrama de Gantt:\n");
        report.push_str(&format!("{}\n", timeline.coalesced()));

        report.push_str(&format!(
            "\n{:<8} {:>8} {:>8} {:>12} {:>8} {:>12}\n",
            "Proceso", "Llegada", "Ráfaga", "Fin", "Espera", "Turnaround"
        ));
        report.push_str(&format!("{}\n", "=".repeat(62)));

        for m in &metrics.processes {
            report.push_str(&format!(
                "{:<8} {:>8} {:>8} {:>12} {:>8} {:>12}\n",
                m.id.to_string(),
                m.arrival_time,
                m.burst_time,
                m.completion_time,
                m.waiting_time,
                m.turnaround_time
            ));
        }

        report.push_str(&format!("{}\n", "=".repeat(62)));
        report.push_str(&format!(
            "Tiempo promedio de espera: {}\n",
            Self::format_average(metrics.average_waiting_time)
        ));
        report.push_str(&format!(
            "Tiempo promedio de turnaround: {}\n",
            Self::format_average(metrics.average_turnaround_time)
        ));
        report.push_str(&format!(
            "Utilización de CPU: {:.1}%\n",
            metrics.cpu_utilization * 100.0
        ));
        report.push_str(&format!(
            "Throughput: {:.3} procesos/unidad\n",
            metrics.throughput
        ));
        let order: Vec<String> = metrics.completion_order.iter().map(|id| id.to_string()).collect();
        report.push_str(&format!("Orden de finalización: {}\n", order.join(" ")));

        report
    }

    /// Genera un reporte por proceso en formato CSV.
    pub fn generate_csv_report(&self, metrics: &ScheduleMetrics) -> String {
        let mut csv = String::new();

        csv.push_str("ProcessID,ArrivalTime,BurstTime,CompletionTime,WaitingTime,TurnaroundTime\n");

        for m in &metrics.processes {
            csv.push_str(&format!(
                "{},{},{},{},{},{}\n",
                m.id, m.arrival_time, m.burst_time, m.completion_time, m.waiting_time, m.turnaround_time
            ));
        }

        csv
    }

    /// Formatea un promedio con dos decimales.
    pub fn format_average(value: f64) -> String {
        format!("{:.2}", value)
    }
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::SchedulingAlgorithm;
    use crate::workload::ProcessSpec;

    fn outcome(algorithm: SchedulingAlgorithm, pairs: &[(i64, i64)]) -> ScheduleOutcome {
        let specs: Vec<ProcessSpec> = pairs.iter().map(|&pair| pair.into()).collect();
        algorithm.run(&specs).unwrap()
    }

    #[test]
    fn test_format_average() {
        assert_eq!(MetricsCalculator::format_average(10.0 / 3.0), "3.33");
        assert_eq!(MetricsCalculator::format_average(26.0 / 3.0), "8.67");
        assert_eq!(MetricsCalculator::format_average(0.0), "0.00");
    }

    #[test]
    fn test_metrics_sorted_by_id() {
        let outcome = outcome(SchedulingAlgorithm::sjf(), &[(0, 7), (1, 6), (2, 2), (3, 1)]);
        let metrics = MetricsCalculator::new().calculate(&outcome);

        let ids: Vec<usize> = metrics.processes.iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        let order: Vec<usize> = metrics.completion_order.iter().map(|id| id.0).collect();
        assert_eq!(order, vec![1, 4, 3, 2]);
        assert_eq!(metrics.makespan, 16);
        assert_eq!(metrics.cpu_utilization, 1.0);
    }

    #[test]
    fn test_averages_with_bursts_near_the_limit() {
        let outcome = outcome(SchedulingAlgorithm::fcfs(), &[(0, i64::MAX), (0, i64::MAX)]);
        let metrics = MetricsCalculator::new().calculate(&outcome);

        assert_eq!(metrics.processes[1].turnaround_time, 2 * i64::MAX as u64);
        assert_eq!(metrics.average_waiting_time, i64::MAX as f64 / 2.0);
        assert_eq!(metrics.average_turnaround_time, 1.5 * i64::MAX as f64);
    }

    #[test]
    fn test_utilization_with_idle_time() {
        let outcome = outcome(SchedulingAlgorithm::fcfs(), &[(2, 2)]);
        let metrics = MetricsCalculator::new().calculate(&outcome);
        assert_eq!(metrics.makespan, 4);
        assert_eq!(metrics.cpu_utilization, 0.5);
        assert_eq!(metrics.throughput, 0.25);
        assert_eq!(metrics.average_waiting_time, 0.0);
    }

    #[test]
    fn test_reports() {
        let outcome = outcome(SchedulingAlgorithm::srt(), &[(0, 8), (1, 4)]);
        let calculator = MetricsCalculator::new();
        let metrics = calculator.calculate(&outcome);

        let text = calculator.generate_report("SRT", &outcome.timeline, &metrics);
        assert!(text.contains("Resultados SRT"));
        assert!(text.contains("P1(0-1) P2(1-5) P1(5-12)"));
        assert!(text.contains("Tiempo promedio de espera: 2.00"));

        let csv = calculator.generate_csv_report(&metrics);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "P1,0,8,12,4,12");
        assert_eq!(lines[2], "P2,1,4,5,0,4");
    }
}
