//! # Módulo de Procesos
//!
//! Este módulo define el registro de proceso sobre el que operan los
//! algoritmos de planificación: identidad, llegada y ráfaga inmutables,
//! y las salidas de la simulación (tiempo restante, espera y turnaround).
//!
//! Cada ejecución de un algoritmo trabaja sobre su propia copia de los
//! registros; nunca se comparten entre ejecuciones.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};
use crate::workload::ProcessSpec;

/// Identificador estable de un proceso, asignado en orden de entrada.
///
/// Se muestra como `P1`, `P2`, ...
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProcessId(pub usize);

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Registro de un proceso dentro de una ejecución de simulación.
///
/// `remaining_time` sólo lo decrementan los algoritmos preemptivos.
/// Los tiempos de espera y turnaround quedan indefinidos (`None`) hasta
/// que el proceso termina; a partir de ahí se cumple
/// `turnaround = completion - arrival` y `waiting = turnaround - burst`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Process {
    /// Identificador del proceso (1-indexado)
    pub id: ProcessId,
    /// Instante en que el proceso pasa a ser elegible
    pub arrival_time: u64,
    /// Tiempo total de CPU requerido
    pub burst_time: u64,
    /// Porción de la ráfaga aún no ejecutada
    pub remaining_time: u64,
    completion_time: Option<u64>,
    waiting_time: Option<u64>,
    turnaround_time: Option<u64>,
}

impl Process {
    /// Crea un proceso validando sus parámetros.
    ///
    /// # Arguments
    ///
    /// * `index` - Posición del proceso en la entrada (1-indexada)
    /// * `arrival_time` - Tiempo de llegada, debe ser >= 0
    /// * `burst_time` - Ráfaga de CPU, debe ser > 0
    ///
    /// # Returns
    ///
    /// El proceso listo para simular, o `InvalidProcessParameter`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::Process;
    ///
    /// let p = Process::new(1, 0, 5).unwrap();
    /// assert_eq!(p.id.to_string(), "P1");
    /// assert_eq!(p.remaining_time, 5);
    /// assert!(Process::new(2, -1, 5).is_err());
    /// ```
    pub fn new(index: usize, arrival_time: i64, burst_time: i64) -> Result<Self> {
        if arrival_time < 0 {
            return Err(SchedulerError::InvalidProcessParameter {
                process: index,
                reason: format!("llegada {} es negativa", arrival_time),
            });
        }
        if burst_time <= 0 {
            return Err(SchedulerError::InvalidProcessParameter {
                process: index,
                reason: format!("ráfaga {} no es positiva", burst_time),
            });
        }

        Ok(Self {
            id: ProcessId(index),
            arrival_time: arrival_time as u64,
            burst_time: burst_time as u64,
            remaining_time: burst_time as u64,
            completion_time: None,
            waiting_time: None,
            turnaround_time: None,
        })
    }

    /// Construye y valida todos los procesos de una carga de trabajo.
    ///
    /// Los identificadores se asignan en orden de entrada. Una entrada
    /// vacía se rechaza con `EmptyInput`.
    pub fn from_specs(specs: &[ProcessSpec]) -> Result<Vec<Self>> {
        if specs.is_empty() {
            return Err(SchedulerError::EmptyInput);
        }

        specs
            .iter()
            .enumerate()
            .map(|(idx, spec)| Self::new(idx + 1, spec.arrival_time, spec.burst_time))
            .collect()
    }

    /// Finaliza el proceso en el instante `completion_time`.
    pub(crate) fn complete(&mut self, completion_time: u64) {
        debug_assert!(completion_time >= self.arrival_time + self.burst_time);
        let turnaround = completion_time - self.arrival_time;
        self.remaining_time = 0;
        self.completion_time = Some(completion_time);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround - self.burst_time);
    }

    /// Consume `units` de tiempo restante.
    pub(crate) fn run_for(&mut self, units: u64) {
        debug_assert!(units <= self.remaining_time);
        self.remaining_time -= units;
    }

    /// Indica si el proceso ya llegó en el instante `now`.
    pub fn has_arrived(&self, now: u64) -> bool {
        self.arrival_time <= now
    }

    /// Verifica si el proceso ya terminó su ráfaga.
    ///
    /// # Returns
    ///
    /// `true` si el algoritmo registró su instante de finalización
    pub fn is_completed(&self) -> bool {
        self.completion_time.is_some()
    }

    /// Instante de finalización, si ya terminó.
    pub fn completion_time(&self) -> Option<u64> {
        self.completion_time
    }

    /// Obtiene el tiempo de espera del proceso.
    ///
    /// # Returns
    ///
    /// `turnaround - burst` una vez completado; `None` antes
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::{ProcessSpec, SchedulingAlgorithm};
    ///
    /// let specs = [ProcessSpec::new(0, 5), ProcessSpec::new(1, 3)];
    /// let outcome = SchedulingAlgorithm::fcfs().run(&specs).unwrap();
    /// assert_eq!(outcome.processes[1].waiting_time(), Some(4));
    /// ```
    pub fn waiting_time(&self) -> Option<u64> {
        self.waiting_time
    }

    /// Obtiene el turnaround (finalización menos llegada); `None` hasta
    /// que el proceso termina.
    pub fn turnaround_time(&self) -> Option<u64> {
        self.turnaround_time
    }

    /// Obtiene una representación breve del estado del proceso.
    ///
    /// Útil para trazas de depuración.
    pub fn status_summary(&self) -> String {
        match self.completion_time {
            Some(done) => format!(
                "{}: llegada={} ráfaga={} terminado en t={}",
                self.id, self.arrival_time, self.burst_time, done
            ),
            None => format!(
                "{}: llegada={} ráfaga={} restante={}",
                self.id, self.arrival_time, self.burst_time, self.remaining_time
            ),
        }
    }
}

/// Calcula la cota superior del reloj: la última llegada más la suma de
/// todas las ráfagas.
///
/// Ningún algoritmo avanza el reloj más allá de esta cota, así que si cabe
/// en `u64` ninguna suma de tiempos durante la simulación desborda.
///
/// # Returns
///
/// La cota, o `TimeOverflow` si no es representable
///
/// # Examples
///
/// ```rust
/// use cpu_scheduling_simulator::process::{time_horizon, Process};
///
/// let processes = vec![Process::new(1, 4, 2).unwrap(), Process::new(2, 0, 3).unwrap()];
/// assert_eq!(time_horizon(&processes), Ok(9));
/// ```
pub fn time_horizon(processes: &[Process]) -> Result<u64> {
    let last_arrival = processes.iter().map(|p| p.arrival_time).max().unwrap_or(0);
    processes
        .iter()
        .try_fold(last_arrival, |acc, p| acc.checked_add(p.burst_time))
        .ok_or(SchedulerError::TimeOverflow)
}

/// Ordena los procesos por llegada de forma estable.
///
/// Los empates conservan el orden de entrada; de ello dependen tanto el
/// orden mostrado como el desempate de SJF y SRT.
pub(crate) fn sort_by_arrival(processes: &mut [Process]) {
    processes.sort_by_key(|p| p.arrival_time);
}
