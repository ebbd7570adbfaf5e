//! # Módulo de Cargas de Trabajo
//!
//! Entrada cruda del simulador: pares `(llegada, ráfaga)` tal como los
//! suministra el llamador, y la lectura de cargas de trabajo completas
//! desde archivos TOML.
//!
//! ```toml
//! algorithm = "rr"
//! quantum = 2
//! rr_admission = "upfront"
//!
//! [[process]]
//! arrival = 0
//! burst = 5
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::WorkloadError;
use crate::scheduler::{AlgorithmKind, RoundRobinAdmission, SchedulingAlgorithm};

/// Parámetros de un proceso antes de validar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Tiempo de llegada (debe ser >= 0)
    #[serde(rename = "arrival")]
    pub arrival_time: i64,
    /// Ráfaga de CPU (debe ser > 0)
    #[serde(rename = "burst")]
    pub burst_time: i64,
}

impl ProcessSpec {
    pub fn new(arrival_time: i64, burst_time: i64) -> Self {
        Self {
            arrival_time,
            burst_time,
        }
    }
}

impl From<(i64, i64)> for ProcessSpec {
    fn from((arrival_time, burst_time): (i64, i64)) -> Self {
        Self::new(arrival_time, burst_time)
    }
}

/// Carga de trabajo leída desde un archivo TOML.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Algoritmo a ejecutar (`fcfs`, `sjf`, `srt`, `rr`), opcional
    #[serde(default)]
    pub algorithm: Option<String>,
    /// Quantum para Round Robin
    #[serde(default)]
    pub quantum: Option<i64>,
    /// Política de admisión de Round Robin (`upfront`, `on-arrival`)
    #[serde(default)]
    pub rr_admission: Option<String>,
    /// Procesos en orden de entrada
    #[serde(default, rename = "process")]
    pub processes: Vec<ProcessSpec>,
}

impl WorkloadConfig {
    /// Interpreta una carga de trabajo desde texto TOML.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::WorkloadConfig;
    ///
    /// let config = WorkloadConfig::from_toml_str(r#"
    ///     [[process]]
    ///     arrival = 0
    ///     burst = 5
    /// "#).unwrap();
    /// assert_eq!(config.specs().len(), 1);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, WorkloadError> {
        let config: Self = toml::from_str(text)?;
        log::debug!(
            "carga de trabajo con {} procesos (algoritmo: {:?})",
            config.processes.len(),
            config.algorithm
        );
        Ok(config)
    }

    /// Lee y analiza un archivo TOML de carga de trabajo.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, WorkloadError> {
        let path = path.as_ref();
        log::info!("leyendo carga de trabajo de {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn specs(&self) -> &[ProcessSpec] {
        &self.processes
    }

    /// Resuelve el algoritmo configurado, si lo hay.
    ///
    /// # Returns
    ///
    /// `Ok(None)` si el archivo no indica algoritmo, o el error
    /// correspondiente si el nombre, el quantum o la admisión son inválidos
    pub fn algorithm(&self) -> Result<Option<SchedulingAlgorithm>, WorkloadError> {
        let kind = match self.kind()? {
            Some(kind) => kind,
            None => return Ok(None),
        };
        let admission = self.admission()?;

        let algorithm = match kind {
            AlgorithmKind::RoundRobin => {
                let quantum = self.quantum.ok_or(WorkloadError::MissingQuantum)?;
                SchedulingAlgorithm::round_robin_with(quantum, admission)?
            }
            AlgorithmKind::Fcfs => SchedulingAlgorithm::fcfs(),
            AlgorithmKind::Sjf => SchedulingAlgorithm::sjf(),
            AlgorithmKind::Srt => SchedulingAlgorithm::srt(),
        };
        Ok(Some(algorithm))
    }

    /// Familia de algoritmo configurada, sin validar el quantum.
    pub fn kind(&self) -> Result<Option<AlgorithmKind>, WorkloadError> {
        match &self.algorithm {
            None => Ok(None),
            Some(name) => AlgorithmKind::from_name(name)
                .map(Some)
                .ok_or_else(|| WorkloadError::UnknownAlgorithm(name.clone())),
        }
    }

    /// Resuelve la política de admisión de Round Robin (`upfront` por defecto).
    pub fn admission(&self) -> Result<RoundRobinAdmission, WorkloadError> {
        match &self.rr_admission {
            None => Ok(RoundRobinAdmission::default()),
            Some(name) => RoundRobinAdmission::from_name(name)
                .ok_or_else(|| WorkloadError::UnknownAdmission(name.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchedulerError;

    const SAMPLE: &str = r#"
        algorithm = "rr"
        quantum = 2

        [[process]]
        arrival = 0
        burst = 5

        [[process]]
        arrival = 0
        burst = 3
    "#;

    #[test]
    fn test_parse_sample() {
        let config = WorkloadConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(
            config.specs(),
            &[ProcessSpec::new(0, 5), ProcessSpec::new(0, 3)]
        );
        let algorithm = config.algorithm().unwrap().unwrap();
        assert_eq!(algorithm.quantum(), Some(2));
        assert_eq!(config.admission().unwrap(), RoundRobinAdmission::Upfront);
    }

    #[test]
    fn test_missing_algorithm_is_none() {
        let config = WorkloadConfig::from_toml_str("[[process]]\narrival = 1\nburst = 2\n").unwrap();
        assert!(config.algorithm().unwrap().is_none());
    }

    #[test]
    fn test_rr_without_quantum() {
        let config = WorkloadConfig::from_toml_str("algorithm = \"rr\"\n").unwrap();
        assert!(matches!(config.algorithm(), Err(WorkloadError::MissingQuantum)));
    }

    #[test]
    fn test_invalid_quantum_and_names() {
        let config = WorkloadConfig::from_toml_str("algorithm = \"rr\"\nquantum = 0\n").unwrap();
        assert!(matches!(
            config.algorithm(),
            Err(WorkloadError::Scheduler(SchedulerError::InvalidQuantum(0)))
        ));

        let config = WorkloadConfig::from_toml_str("algorithm = \"lottery\"\n").unwrap();
        assert!(matches!(config.algorithm(), Err(WorkloadError::UnknownAlgorithm(_))));

        let config = WorkloadConfig::from_toml_str("rr_admission = \"later\"\n").unwrap();
        assert!(matches!(config.admission(), Err(WorkloadError::UnknownAdmission(_))));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            WorkloadConfig::from_toml_str("[[process]]\narrival = \"cero\"\n"),
            Err(WorkloadError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            WorkloadConfig::load("/no/existe/carga.toml"),
            Err(WorkloadError::Io(_))
        ));
    }
}
