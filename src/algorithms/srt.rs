//! Shortest-Remaining-Time preemptivo.

use super::{next_arrival, pick_shortest};
use crate::process::{sort_by_arrival, Process};
use crate::timeline::Timeline;

/// Simula en pasos de una unidad, ejecutando siempre el proceso llegado con
/// menor tiempo restante.
///
/// Emite un segmento por unidad ejecutada; fusionar segmentos contiguos
/// es tarea del reporte (ver [`Timeline::coalesced`]).
pub fn schedule(mut processes: Vec<Process>) -> (Vec<Process>, Timeline) {
    sort_by_arrival(&mut processes);

    let mut remaining = processes;
    let mut completed = Vec::with_capacity(remaining.len());
    let mut timeline = Timeline::new();
    let mut current_time = 0;

    while !remaining.is_empty() {
        let idx = match pick_shortest(&remaining, current_time, |p| p.remaining_time) {
            Some(idx) => idx,
            None => {
                if let Some(next) = next_arrival(&remaining) {
                    log::trace!("CPU ociosa de t={} a t={}", current_time, next);
                    current_time = next;
                }
                continue;
            }
        };

        let process = &mut remaining[idx];
        log::trace!("despacho {} en [{}, {})", process.id, current_time, current_time + 1);
        timeline.push(process.id, current_time, current_time + 1);
        process.run_for(1);
        current_time += 1;

        if process.remaining_time == 0 {
            let mut process = remaining.remove(idx);
            process.complete(current_time);
            log::debug!("{}", process.status_summary());
            completed.push(process);
        }
    }

    (completed, timeline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::testing::{assert_consistent, find, processes};
    use crate::process::ProcessId;

    #[test]
    fn test_preemption_by_shorter_arrival() {
        let (done, timeline) = schedule(processes(&[(0, 8), (1, 4)]));

        let expected: Vec<(usize, u64, u64)> = std::iter::once((1, 0, 1))
            .chain((1..5).map(|t| (2, t, t + 1)))
            .chain((5..12).map(|t| (1, t, t + 1)))
            .collect();
        let actual: Vec<(usize, u64, u64)> = timeline
            .iter()
            .map(|s| (s.process.0, s.start, s.end))
            .collect();
        assert_eq!(actual, expected);

        assert_eq!(find(&done, 1).waiting_time(), Some(4));
        assert_eq!(find(&done, 2).waiting_time(), Some(0));
        assert_eq!(timeline.coalesced().to_string(), "P1(0-1) P2(1-5) P1(5-12)");
        assert_consistent(&done, &timeline);
    }

    #[test]
    fn test_equal_remaining_keeps_running_earlier_arrival() {
        // En t=2 P1 y P2 tienen 2 unidades restantes; gana P1 (llegó antes)
        let (done, timeline) = schedule(processes(&[(0, 4), (2, 2)]));
        assert_eq!(timeline.coalesced().to_string(), "P1(0-4) P2(4-6)");
        assert_eq!(done[0].id, ProcessId(1));
        assert_consistent(&done, &timeline);
    }

    #[test]
    fn test_tie_broken_by_arrival_not_input_order() {
        // P1 se ingresó primero pero llega en t=2; en ese instante ambos
        // tienen 2 unidades restantes y sigue P2, que llegó en t=0
        let (done, timeline) = schedule(processes(&[(2, 2), (0, 4)]));
        assert_eq!(timeline.coalesced().to_string(), "P2(0-4) P1(4-6)");

        let order: Vec<usize> = done.iter().map(|p| p.id.0).collect();
        assert_eq!(order, vec![2, 1]);
        assert_eq!(find(&done, 1).waiting_time(), Some(2));
        assert_eq!(find(&done, 2).waiting_time(), Some(0));
        assert_consistent(&done, &timeline);
    }

    #[test]
    fn test_idle_gap_and_completion_order() {
        let (done, timeline) = schedule(processes(&[(3, 3), (0, 1), (4, 1)]));
        assert_eq!(timeline.coalesced().to_string(), "P2(0-1) P1(3-4) P3(4-5) P1(5-7)");

        let order: Vec<usize> = done.iter().map(|p| p.id.0).collect();
        assert_eq!(order, vec![2, 3, 1]);
        assert_eq!(find(&done, 1).waiting_time(), Some(1));
        assert_consistent(&done, &timeline);
    }
}
