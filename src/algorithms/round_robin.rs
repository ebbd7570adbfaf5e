//! Round Robin con quantum fijo.

use std::collections::VecDeque;

use crate::process::{sort_by_arrival, Process};
use crate::scheduler::RoundRobinAdmission;
use crate::timeline::Timeline;

/// Despacha los procesos en rondas de a lo sumo `quantum` unidades.
///
/// `quantum` debe ser > 0; lo garantiza [`SchedulingAlgorithm::round_robin`].
///
/// [`SchedulingAlgorithm::round_robin`]: crate::SchedulingAlgorithm::round_robin
pub fn schedule(
    mut processes: Vec<Process>,
    quantum: u64,
    admission: RoundRobinAdmission,
) -> (Vec<Process>, Timeline) {
    debug_assert!(quantum > 0);
    sort_by_arrival(&mut processes);

    match admission {
        RoundRobinAdmission::Upfront => schedule_upfront(processes, quantum),
        RoundRobinAdmission::OnArrival => schedule_on_arrival(processes, quantum),
    }
}

/// Todos los procesos entran a la cola al inicio, en orden de llegada.
///
/// Si el proceso al frente aún no llegó, el reloj salta hasta su llegada
/// aunque otros procesos más atrás ya estén disponibles.
fn schedule_upfront(processes: Vec<Process>, quantum: u64) -> (Vec<Process>, Timeline) {
    let mut queue: VecDeque<Process> = processes.into();
    let mut completed = Vec::with_capacity(queue.len());
    let mut timeline = Timeline::new();
    let mut current_time = 0;

    while let Some(mut process) = queue.pop_front() {
        if current_time < process.arrival_time {
            log::trace!("reloj salta de t={} a t={}", current_time, process.arrival_time);
            current_time = process.arrival_time;
        }

        current_time = dispatch(&mut process, current_time, quantum, &mut timeline);

        if process.remaining_time == 0 {
            process.complete(current_time);
            log::debug!("{}", process.status_summary());
            completed.push(process);
        } else {
            queue.push_back(process);
        }
    }

    (completed, timeline)
}

/// Los procesos entran a la cola cuando el reloj alcanza su llegada.
///
/// Los que llegan durante un despacho se encolan antes que el proceso
/// interrumpido.
fn schedule_on_arrival(processes: Vec<Process>, quantum: u64) -> (Vec<Process>, Timeline) {
    let mut pending: VecDeque<Process> = processes.into();
    let mut ready: VecDeque<Process> = VecDeque::new();
    let mut completed = Vec::with_capacity(pending.len());
    let mut timeline = Timeline::new();
    let mut current_time = 0;

    loop {
        admit(&mut pending, &mut ready, current_time);

        let mut process = match ready.pop_front() {
            Some(process) => process,
            None => match pending.front() {
                Some(next) => {
                    log::trace!("CPU ociosa de t={} a t={}", current_time, next.arrival_time);
                    current_time = next.arrival_time;
                    continue;
                }
                None => break,
            },
        };

        current_time = dispatch(&mut process, current_time, quantum, &mut timeline);
        admit(&mut pending, &mut ready, current_time);

        if process.remaining_time == 0 {
            process.complete(current_time);
            log::debug!("{}", process.status_summary());
            completed.push(process);
        } else {
            ready.push_back(process);
        }
    }

    (completed, timeline)
}

/// Mueve a la cola de listos los procesos pendientes que ya llegaron.
fn admit(pending: &mut VecDeque<Process>, ready: &mut VecDeque<Process>, now: u64) {
    while pending.front().map_or(false, |p| p.has_arrived(now)) {
        if let Some(process) = pending.pop_front() {
            log::trace!("{} admitido en t={}", process.id, now);
            ready.push_back(process);
        }
    }
}

/// Ejecuta un despacho de `min(quantum, restante)` y devuelve el nuevo reloj.
fn dispatch(process: &mut Process, now: u64, quantum: u64, timeline: &mut Timeline) -> u64 {
    let slice = quantum.min(process.remaining_time);
    log::trace!("despacho {} en [{}, {})", process.id, now, now + slice);
    timeline.push(process.id, now, now + slice);
    process.run_for(slice);
    now + slice
}
