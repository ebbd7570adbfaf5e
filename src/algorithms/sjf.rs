//! Shortest-Job-First no preemptivo.

use super::{next_arrival, pick_shortest};
use crate::process::{sort_by_arrival, Process};
use crate::timeline::Timeline;

/// En cada punto de decisión ejecuta hasta el final el proceso llegado con
/// la ráfaga más corta.
///
/// Los empates se resuelven por llegada y luego por orden de entrada.
pub fn schedule(mut processes: Vec<Process>) -> (Vec<Process>, Timeline) {
    sort_by_arrival(&mut processes);

    let mut remaining = processes;
    let mut completed = Vec::with_capacity(remaining.len());
    let mut timeline = Timeline::new();
    let mut current_time = 0;

    while !remaining.is_empty() {
        let idx = match pick_shortest(&remaining, current_time, |p| p.burst_time) {
            Some(idx) => idx,
            None => {
                // Nada llegó aún: la CPU queda ociosa hasta la próxima llegada
                if let Some(next) = next_arrival(&remaining) {
                    log::trace!("CPU ociosa de t={} a t={}", current_time, next);
                    current_time = next;
                }
                continue;
            }
        };

        let mut process = remaining.remove(idx);
        let end = current_time + process.burst_time;
        log::trace!("despacho {} en [{}, {})", process.id, current_time, end);
        timeline.push(process.id, current_time, end);

        process.run_for(process.burst_time);
        process.complete(end);
        log::debug!("{}", process.status_summary());

        current_time = end;
        completed.push(process);
    }

    (completed, timeline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::testing::{assert_consistent, find, processes};

    #[test]
    fn test_only_arrived_jobs_compete() {
        let (done, timeline) = schedule(processes(&[(0, 5), (1, 3), (2, 8)]));
        assert_eq!(timeline.to_string(), "P1(0-5) P2(5-8) P3(8-16)");
        assert_consistent(&done, &timeline);
    }

    #[test]
    fn test_shortest_burst_first() {
        let (done, timeline) = schedule(processes(&[(0, 7), (1, 6), (2, 2), (3, 1)]));
        assert_eq!(timeline.to_string(), "P1(0-7) P4(7-8) P3(8-10) P2(10-16)");

        let order: Vec<String> = done.iter().map(|p| p.id.to_string()).collect();
        assert_eq!(order, vec!["P1", "P4", "P3", "P2"]);
        assert_eq!(find(&done, 2).waiting_time(), Some(9));
        assert_consistent(&done, &timeline);
    }

    #[test]
    fn test_tie_prefers_earlier_arrival_then_input_order() {
        // P2 y P3 empatan en ráfaga; P3 llegó antes
        let (_, timeline) = schedule(processes(&[(0, 4), (2, 3), (1, 3), (1, 3)]));
        assert_eq!(timeline.to_string(), "P1(0-4) P3(4-7) P4(7-10) P2(10-13)");
    }

    #[test]
    fn test_idle_until_first_arrival() {
        let (done, timeline) = schedule(processes(&[(5, 2), (9, 1)]));
        assert_eq!(timeline.to_string(), "P1(5-7) P2(9-10)");
        assert_eq!(find(&done, 1).waiting_time(), Some(0));
        assert_eq!(find(&done, 2).waiting_time(), Some(0));
    }
}
