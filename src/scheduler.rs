//! # Módulo de Algoritmos de Planificación
//!
//! Este módulo define la selección de algoritmo de planificación y el
//! contrato común de los cuatro: reciben los registros de proceso ya
//! validados y devuelven los procesos completados junto con la línea de
//! tiempo de ejecución.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algorithms;
use crate::error::{Result, SchedulerError};
use crate::process::{time_horizon, Process};
use crate::timeline::Timeline;
use crate::workload::ProcessSpec;

/// Política de admisión a la cola de Round Robin.
///
/// - `Upfront` encola todos los procesos al inicio, ordenados por llegada.
///   Un proceso que aún no llegó y está al frente de la cola adelanta el
///   reloj hasta su llegada, aunque detrás haya procesos ya disponibles.
/// - `OnArrival` sólo admite un proceso cuando el reloj alcanza su llegada,
///   igual que SRT.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundRobinAdmission {
    #[default]
    Upfront,
    OnArrival,
}

impl RoundRobinAdmission {
    /// Interpreta `upfront` u `on-arrival` (sin distinguir mayúsculas).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "upfront" => Some(Self::Upfront),
            "on-arrival" | "on_arrival" | "dynamic" => Some(Self::OnArrival),
            _ => None,
        }
    }
}

/// Algoritmos de planificación disponibles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchedulingAlgorithm {
    /// First-Come First-Served: no preemptivo, en orden de llegada.
    Fcfs,

    /// Shortest-Job-First: no preemptivo, elige la ráfaga más corta entre
    /// los procesos ya llegados.
    Sjf,

    /// Shortest-Remaining-Time: preemptivo, reevalúa en cada unidad de
    /// tiempo el proceso con menor tiempo restante.
    Srt,

    /// Round Robin: preemptivo con quantum fijo.
    RoundRobin {
        /// Tiempo máximo de CPU por despacho
        quantum: u64,
        /// Cómo entran los procesos a la cola
        admission: RoundRobinAdmission,
    },
}

impl SchedulingAlgorithm {
    /// Crea el algoritmo First-Come First-Served.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::SchedulingAlgorithm;
    ///
    /// let fcfs = SchedulingAlgorithm::fcfs();
    /// assert_eq!(fcfs.to_string(), "FCFS");
    /// assert_eq!(fcfs.quantum(), None);
    /// ```
    pub fn fcfs() -> Self {
        Self::Fcfs
    }

    /// Crea el algoritmo Shortest-Job-First no preemptivo.
    pub fn sjf() -> Self {
        Self::Sjf
    }

    /// Crea el algoritmo Shortest-Remaining-Time preemptivo.
    pub fn srt() -> Self {
        Self::Srt
    }

    /// Crea un Round Robin con el quantum especificado y admisión inicial.
    ///
    /// # Arguments
    ///
    /// * `quantum` - Duración máxima de cada despacho, debe ser > 0
    ///
    /// # Returns
    ///
    /// El algoritmo, o `InvalidQuantum` si el quantum no es positivo
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::SchedulingAlgorithm;
    ///
    /// let rr = SchedulingAlgorithm::round_robin(2).unwrap();
    /// assert_eq!(rr.quantum(), Some(2));
    /// assert!(SchedulingAlgorithm::round_robin(0).is_err());
    /// ```
    pub fn round_robin(quantum: i64) -> Result<Self> {
        Self::round_robin_with(quantum, RoundRobinAdmission::default())
    }

    /// Crea un Round Robin con una política de admisión explícita.
    ///
    /// # Returns
    ///
    /// El algoritmo, o `InvalidQuantum` si el quantum no es positivo
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::{RoundRobinAdmission, SchedulingAlgorithm};
    ///
    /// let rr = SchedulingAlgorithm::round_robin_with(3, RoundRobinAdmission::OnArrival).unwrap();
    /// assert!(rr.description().contains("admisión por llegada"));
    /// ```
    pub fn round_robin_with(quantum: i64, admission: RoundRobinAdmission) -> Result<Self> {
        if quantum <= 0 {
            return Err(SchedulerError::InvalidQuantum(quantum));
        }
        Ok(Self::RoundRobin {
            quantum: quantum as u64,
            admission,
        })
    }

    /// Determina si el algoritmo puede interrumpir un proceso en ejecución.
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::SchedulingAlgorithm;
    ///
    /// assert!(!SchedulingAlgorithm::sjf().is_preemptive());
    /// assert!(SchedulingAlgorithm::srt().is_preemptive());
    /// ```
    pub fn is_preemptive(&self) -> bool {
        match self {
            Self::Fcfs | Self::Sjf => false,
            Self::Srt | Self::RoundRobin { .. } => true,
        }
    }

    /// Obtiene el quantum configurado para Round Robin.
    pub fn quantum(&self) -> Option<u64> {
        match self {
            Self::RoundRobin { quantum, .. } => Some(*quantum),
            _ => None,
        }
    }

    /// Familia del algoritmo, sin sus parámetros.
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Self::Fcfs => AlgorithmKind::Fcfs,
            Self::Sjf => AlgorithmKind::Sjf,
            Self::Srt => AlgorithmKind::Srt,
            Self::RoundRobin { .. } => AlgorithmKind::RoundRobin,
        }
    }

    /// Obtiene una descripción textual del algoritmo y sus parámetros.
    pub fn description(&self) -> String {
        match self {
            Self::Fcfs => "First-Come First-Served (no preemptivo)".to_string(),
            Self::Sjf => "Shortest-Job-First (no preemptivo)".to_string(),
            Self::Srt => "Shortest-Remaining-Time (preemptivo)".to_string(),
            Self::RoundRobin { quantum, admission } => {
                let policy = match admission {
                    RoundRobinAdmission::Upfront => "admisión inicial",
                    RoundRobinAdmission::OnArrival => "admisión por llegada",
                };
                format!("Round Robin preemptivo (quantum: {}, {})", quantum, policy)
            }
        }
    }

    /// Ejecuta el algoritmo sobre procesos ya validados.
    ///
    /// Los procesos pasan a ser propiedad de la ejecución; se devuelven
    /// completados en orden de finalización.
    ///
    /// # Errors
    ///
    /// `EmptyInput` si no hay procesos; `TimeOverflow` si la última llegada
    /// más la suma de ráfagas no cabe en `u64`
    pub fn schedule(&self, processes: Vec<Process>) -> Result<ScheduleOutcome> {
        if processes.is_empty() {
            return Err(SchedulerError::EmptyInput);
        }
        let horizon = time_horizon(&processes)?;

        log::debug!(
            "planificando {} procesos con {} (cota t={})",
            processes.len(),
            self,
            horizon
        );

        let (processes, timeline) = match *self {
            Self::Fcfs => algorithms::fcfs::schedule(processes),
            Self::Sjf => algorithms::sjf::schedule(processes),
            Self::Srt => algorithms::srt::schedule(processes),
            Self::RoundRobin { quantum, admission } => {
                algorithms::round_robin::schedule(processes, quantum, admission)
            }
        };

        Ok(ScheduleOutcome {
            algorithm: *self,
            processes,
            timeline,
        })
    }

    /// Valida los pares `(llegada, ráfaga)` y ejecuta el algoritmo.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::{ProcessSpec, SchedulingAlgorithm};
    ///
    /// let specs = [ProcessSpec::new(0, 5), ProcessSpec::new(1, 3), ProcessSpec::new(2, 8)];
    /// let outcome = SchedulingAlgorithm::fcfs().run(&specs).unwrap();
    /// assert_eq!(outcome.timeline.to_string(), "P1(0-5) P2(5-8) P3(8-16)");
    /// ```
    pub fn run(&self, specs: &[ProcessSpec]) -> Result<ScheduleOutcome> {
        let processes = Process::from_specs(specs)?;
        self.schedule(processes)
    }
}

impl fmt::Display for SchedulingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fcfs => write!(f, "FCFS"),
            Self::Sjf => write!(f, "SJF"),
            Self::Srt => write!(f, "SRT"),
            Self::RoundRobin { quantum, .. } => write!(f, "Round Robin (quantum {})", quantum),
        }
    }
}

/// Familia de algoritmo, sin parámetros.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    Fcfs,
    Sjf,
    Srt,
    RoundRobin,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 4] = [Self::Fcfs, Self::Sjf, Self::Srt, Self::RoundRobin];

    /// Interpreta un nombre corto (`fcfs`, `sjf`, `srt`, `rr`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "fcfs" => Some(Self::Fcfs),
            "sjf" => Some(Self::Sjf),
            "srt" | "srtf" => Some(Self::Srt),
            "rr" | "round-robin" | "round_robin" => Some(Self::RoundRobin),
            _ => None,
        }
    }

    /// Construye el algoritmo concreto; el quantum sólo aplica a Round Robin.
    pub fn build(self, quantum: i64, admission: RoundRobinAdmission) -> Result<SchedulingAlgorithm> {
        match self {
            Self::Fcfs => Ok(SchedulingAlgorithm::fcfs()),
            Self::Sjf => Ok(SchedulingAlgorithm::sjf()),
            Self::Srt => Ok(SchedulingAlgorithm::srt()),
            Self::RoundRobin => SchedulingAlgorithm::round_robin_with(quantum, admission),
        }
    }

    pub fn needs_quantum(self) -> bool {
        self == Self::RoundRobin
    }
}

/// Opción elegida en el menú principal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Run(AlgorithmKind),
    Exit,
}

impl MenuChoice {
    /// Traduce la opción numérica del menú (1-5).
    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(Self::Run(AlgorithmKind::Fcfs)),
            2 => Some(Self::Run(AlgorithmKind::Sjf)),
            3 => Some(Self::Run(AlgorithmKind::Srt)),
            4 => Some(Self::Run(AlgorithmKind::RoundRobin)),
            5 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Resultado de una ejecución: procesos completados y línea de tiempo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleOutcome {
    /// Algoritmo que produjo el resultado
    pub algorithm: SchedulingAlgorithm,
    /// Procesos en orden de finalización, con sus métricas
    pub processes: Vec<Process>,
    /// Segmentos de ejecución en orden cronológico
    pub timeline: Timeline,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_robin_creation() {
        let algorithm = SchedulingAlgorithm::round_robin(3).unwrap();
        match algorithm {
            SchedulingAlgorithm::RoundRobin { quantum, admission } => {
                assert_eq!(quantum, 3);
                assert_eq!(admission, RoundRobinAdmission::Upfront);
            }
            _ => panic!("Expected RoundRobin variant"),
        }
        assert!(algorithm.is_preemptive());
    }

    #[test]
    fn test_invalid_quantum() {
        assert_eq!(
            SchedulingAlgorithm::round_robin(0),
            Err(SchedulerError::InvalidQuantum(0))
        );
        assert_eq!(
            SchedulingAlgorithm::round_robin_with(-4, RoundRobinAdmission::OnArrival),
            Err(SchedulerError::InvalidQuantum(-4))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", SchedulingAlgorithm::fcfs()), "FCFS");
        assert_eq!(format!("{}", SchedulingAlgorithm::srt()), "SRT");
        let rr = SchedulingAlgorithm::round_robin(4).unwrap();
        assert_eq!(format!("{}", rr), "Round Robin (quantum 4)");
        assert!(rr.description().contains("admisión inicial"));
    }

    #[test]
    fn test_empty_input_rejected() {
        for kind in AlgorithmKind::ALL {
            let algorithm = kind.build(2, RoundRobinAdmission::Upfront).unwrap();
            assert_eq!(algorithm.schedule(Vec::new()), Err(SchedulerError::EmptyInput));
            assert_eq!(algorithm.run(&[]), Err(SchedulerError::EmptyInput));
        }
    }

    #[test]
    fn test_names_and_menu() {
        assert_eq!(AlgorithmKind::from_name(" RR "), Some(AlgorithmKind::RoundRobin));
        assert_eq!(AlgorithmKind::from_name("sjf"), Some(AlgorithmKind::Sjf));
        assert_eq!(AlgorithmKind::from_name("mlfq"), None);
        assert_eq!(
            RoundRobinAdmission::from_name("On-Arrival"),
            Some(RoundRobinAdmission::OnArrival)
        );

        assert_eq!(MenuChoice::from_number(3), Some(MenuChoice::Run(AlgorithmKind::Srt)));
        assert_eq!(MenuChoice::from_number(5), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_number(0), None);
        assert_eq!(MenuChoice::from_number(6), None);
    }
}
