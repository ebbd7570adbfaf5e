//! # Módulo de Registro
//!
//! Implementación mínima del trait `Log` del crate `log`. Escribe en la
//! salida de error con el formato:
//!
//! ```text
//! LEVEL [módulo] mensaje
//! ```
//!
//! El nivel se controla con la variable de entorno `SCHED_LOG`
//! (`ERROR`, `WARN`, `INFO`, `DEBUG`, `TRACE`); por defecto `WARN`.

use std::env;
use std::sync::Once;

use log::{LevelFilter, Log, Metadata, Record};

use crate::config;

struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!(
            "{:<5} [{}] {}",
            record.level(),
            record.module_path().unwrap_or(record.target()),
            record.args()
        );
    }

    fn flush(&self) {}
}

/// Traduce el valor de `SCHED_LOG` a un filtro de nivel.
pub fn level_from_str(value: Option<&str>) -> LevelFilter {
    match value.map(|v| v.trim().to_uppercase()).as_deref() {
        Some("OFF") => LevelFilter::Off,
        Some("ERROR") => LevelFilter::Error,
        Some("WARN") => LevelFilter::Warn,
        Some("INFO") => LevelFilter::Info,
        Some("DEBUG") => LevelFilter::Debug,
        Some("TRACE") => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    }
}

/// Instala el registrador global.
///
/// Puede llamarse varias veces; sólo la primera tiene efecto.
pub fn init() {
    static LOGGER: SimpleLogger = SimpleLogger;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let level = level_from_str(env::var(config::ENV_LOG_LEVEL).ok().as_deref());
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(level);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str() {
        assert_eq!(level_from_str(Some("trace")), LevelFilter::Trace);
        assert_eq!(level_from_str(Some(" INFO ")), LevelFilter::Info);
        assert_eq!(level_from_str(Some("off")), LevelFilter::Off);
        assert_eq!(level_from_str(Some("ruidoso")), LevelFilter::Warn);
        assert_eq!(level_from_str(None), LevelFilter::Warn);
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        log::info!("registrador instalado");
    }
}
