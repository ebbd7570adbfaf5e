//! # Módulo de Errores
//!
//! Define los errores que puede producir el núcleo de planificación, la
//! carga de cargas de trabajo desde archivo y los analizadores de entrada.
//!
//! La validación es una precondición: ningún algoritmo se ejecuta con datos
//! inválidos ni produce una línea de tiempo parcial.

use std::fmt;
use std::io;

/// Resultado estándar del núcleo de planificación.
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Errores del núcleo de planificación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// No se suministró ningún proceso.
    EmptyInput,
    /// Un proceso tiene llegada negativa o ráfaga no positiva.
    InvalidProcessParameter {
        /// Posición del proceso en la entrada (1-indexada)
        process: usize,
        /// Descripción del parámetro inválido
        reason: String,
    },
    /// El quantum de Round Robin no es positivo.
    InvalidQuantum(i64),
    /// La última llegada más la suma de ráfagas no cabe en el reloj de
    /// la simulación.
    TimeOverflow,
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "no se suministraron procesos"),
            Self::InvalidProcessParameter { process, reason } => {
                write!(f, "proceso P{} inválido: {}", process, reason)
            }
            Self::InvalidQuantum(q) => {
                write!(f, "quantum inválido: {} (debe ser > 0)", q)
            }
            Self::TimeOverflow => {
                write!(f, "la duración total de la simulación excede el reloj (u64)")
            }
        }
    }
}

impl std::error::Error for SchedulerError {}

/// Errores al cargar una carga de trabajo desde TOML.
#[derive(Debug)]
pub enum WorkloadError {
    /// No se pudo leer el archivo
    Io(io::Error),
    /// El contenido no es TOML válido o no tiene la forma esperada
    Parse(toml::de::Error),
    /// Los procesos o el quantum no superaron la validación
    Scheduler(SchedulerError),
    /// Se pidió Round Robin sin indicar quantum
    MissingQuantum,
    /// Nombre de algoritmo desconocido
    UnknownAlgorithm(String),
    /// Política de admisión de Round Robin desconocida
    UnknownAdmission(String),
}

impl fmt::Display for WorkloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "no se pudo leer la carga de trabajo: {}", e),
            Self::Parse(e) => write!(f, "carga de trabajo mal formada: {}", e),
            Self::Scheduler(e) => write!(f, "{}", e),
            Self::MissingQuantum => write!(f, "Round Robin requiere un quantum"),
            Self::UnknownAlgorithm(name) => write!(f, "algoritmo desconocido: {}", name),
            Self::UnknownAdmission(name) => {
                write!(f, "política de admisión desconocida: {}", name)
            }
        }
    }
}

impl std::error::Error for WorkloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Scheduler(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for WorkloadError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for WorkloadError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<SchedulerError> for WorkloadError {
    fn from(e: SchedulerError) -> Self {
        Self::Scheduler(e)
    }
}

/// Errores de los analizadores puros de entrada.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// El texto no es un entero
    NotANumber(String),
    /// El entero está fuera del rango permitido
    OutOfRange(i64),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber(text) => write!(f, "'{}' no es un entero válido", text),
            Self::OutOfRange(value) => write!(f, "{} está fuera de rango", value),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_error_display() {
        assert_eq!(
            SchedulerError::EmptyInput.to_string(),
            "no se suministraron procesos"
        );
        assert_eq!(
            SchedulerError::InvalidQuantum(0).to_string(),
            "quantum inválido: 0 (debe ser > 0)"
        );
        let err = SchedulerError::InvalidProcessParameter {
            process: 2,
            reason: "ráfaga 0 no es positiva".to_string(),
        };
        assert!(err.to_string().starts_with("proceso P2 inválido"));
    }

    #[test]
    fn test_workload_error_from_scheduler() {
        let err: WorkloadError = SchedulerError::EmptyInput.into();
        assert!(matches!(err, WorkloadError::Scheduler(SchedulerError::EmptyInput)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
