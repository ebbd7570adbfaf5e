//! # Simulador de Planificación de CPU
//!
//! Esta biblioteca simula la planificación de procesos en una CPU: dado un
//! conjunto de procesos con tiempo de llegada y ráfaga, calcula para cada
//! algoritmo la línea de tiempo de ejecución (diagrama de Gantt) y los
//! tiempos de espera y turnaround por proceso, con sus promedios.
//!
//! ## Características principales
//!
//! - **Algoritmos de scheduling**: FCFS, SJF (no preemptivo), SRT
//!   (preemptivo) y Round Robin con quantum configurable.
//! - **Simulación determinista**: cada ejecución es dueña exclusiva de sus
//!   registros de proceso y de su línea de tiempo.
//! - **Validación previa**: las entradas vacías o inválidas se rechazan antes
//!   de simular, sin producir resultados parciales.
//! - **Reportes**: texto, CSV y JSON.
//!
//! ## Estructura del proyecto
//!
//! - `process`: registro de proceso y sus métricas
//! - `timeline`: segmentos de ejecución y diagrama de Gantt
//! - `scheduler`: selección de algoritmo y contrato común
//! - `algorithms`: las cuatro implementaciones
//! - `metrics`: cálculo de métricas y reportes
//! - `simulation`: coordinación de una ejecución completa
//! - `workload`: cargas de trabajo y lectura desde TOML
//! - `input`: fuente de entrada inyectable y analizadores puros
//! - `logger`: registrador para el crate `log`
//! - `error`: tipos de error

pub mod algorithms;
pub mod error;
pub mod input;
pub mod logger;
pub mod metrics;
pub mod process;
pub mod scheduler;
pub mod simulation;
pub mod timeline;
pub mod workload;

// Re-exportar las estructuras principales para facilitar su uso
pub use error::{ParseError, SchedulerError, WorkloadError};
pub use metrics::{MetricsCalculator, ProcessMetrics, ScheduleMetrics};
pub use process::{Process, ProcessId};
pub use scheduler::{
    AlgorithmKind, MenuChoice, RoundRobinAdmission, ScheduleOutcome, SchedulingAlgorithm,
};
pub use simulation::{Simulation, SimulationReport};
pub use timeline::{Segment, Timeline};
pub use workload::{ProcessSpec, WorkloadConfig};

/// Configuración por defecto del simulador
pub mod config {
    use super::ProcessSpec;

    /// Quantum por defecto para Round Robin
    pub const DEFAULT_QUANTUM: i64 = 2;

    /// Variable de entorno que fija el nivel de registro
    pub const ENV_LOG_LEVEL: &str = "SCHED_LOG";

    /// Carga de trabajo de demostración: `P1(0,5)`, `P2(1,3)`, `P3(2,8)`
    pub fn default_workload() -> Vec<ProcessSpec> {
        [(0, 5), (1, 3), (2, 8)]
            .iter()
            .map(|&(arrival, burst)| ProcessSpec::new(arrival, burst))
            .collect()
    }
}
