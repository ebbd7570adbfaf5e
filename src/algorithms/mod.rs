//! Implementaciones de los cuatro algoritmos de planificación.
//!
//! Todas comparten el mismo contrato: reciben los procesos (propiedad
//! exclusiva de la ejecución) y devuelven los procesos completados en
//! orden de finalización junto con la línea de tiempo.

pub mod fcfs;
pub mod round_robin;
pub mod sjf;
pub mod srt;

use crate::process::Process;

/// Elige, entre los procesos ya llegados en `now`, el de menor `key`.
///
/// `candidates` debe estar ordenado por llegada de forma estable. Los
/// empates se resuelven por llegada y luego por orden de entrada, de modo
/// que el resultado no depende del orden de iteración.
pub(crate) fn pick_shortest<F>(candidates: &[Process], now: u64, key: F) -> Option<usize>
where
    F: Fn(&Process) -> u64,
{
    candidates
        .iter()
        .enumerate()
        .filter(|(_, p)| p.has_arrived(now))
        .min_by_key(|(_, p)| (key(*p), p.arrival_time, p.id))
        .map(|(idx, _)| idx)
}

/// Próximo instante en que llega algún proceso pendiente.
pub(crate) fn next_arrival(pending: &[Process]) -> Option<u64> {
    pending.iter().map(|p| p.arrival_time).min()
}

#[cfg(test)]
pub(crate) mod testing {
    //! Utilidades compartidas por las pruebas de los algoritmos.

    use crate::process::{Process, ProcessId};
    use crate::timeline::Timeline;

    pub fn processes(pairs: &[(i64, i64)]) -> Vec<Process> {
        pairs
            .iter()
            .enumerate()
            .map(|(i, &(arrival, burst))| Process::new(i + 1, arrival, burst).unwrap())
            .collect()
    }

    pub fn find(processes: &[Process], id: usize) -> &Process {
        processes
            .iter()
            .find(|p| p.id == ProcessId(id))
            .expect("proceso inexistente")
    }

    /// Verifica las propiedades comunes a todo resultado de planificación.
    pub fn assert_consistent(processes: &[Process], timeline: &Timeline) {
        for p in processes {
            assert!(p.is_completed(), "{} no terminó", p.id);
            assert_eq!(timeline.busy_time(p.id), p.burst_time, "ráfaga de {}", p.id);
            let turnaround = p.turnaround_time().unwrap();
            let waiting = p.waiting_time().unwrap();
            assert_eq!(turnaround, waiting + p.burst_time);
            assert!(turnaround >= p.burst_time);
            assert_eq!(p.remaining_time, 0);
        }
        for pair in timeline.segments().windows(2) {
            assert!(pair[0].start <= pair[1].start);
            assert!(pair[0].end <= pair[1].start, "{} solapa con {}", pair[0], pair[1]);
        }
    }
}
