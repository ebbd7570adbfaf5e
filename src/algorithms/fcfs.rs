//! First-Come First-Served.

use crate::process::{sort_by_arrival, Process};
use crate::timeline::Timeline;

/// Ejecuta cada proceso hasta completarlo, en orden de llegada.
///
/// Si la CPU queda libre antes de la siguiente llegada, el reloj salta
/// hasta ella.
pub fn schedule(mut processes: Vec<Process>) -> (Vec<Process>, Timeline) {
    sort_by_arrival(&mut processes);

    let mut timeline = Timeline::new();
    let mut current_time = 0;

    for process in processes.iter_mut() {
        if current_time < process.arrival_time {
            log::trace!("CPU ociosa de t={} a t={}", current_time, process.arrival_time);
            current_time = process.arrival_time;
        }

        let end = current_time + process.burst_time;
        log::trace!("despacho {} en [{}, {})", process.id, current_time, end);
        timeline.push(process.id, current_time, end);

        process.run_for(process.burst_time);
        process.complete(end);
        log::debug!("{}", process.status_summary());

        current_time = end;
    }

    (processes, timeline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::testing::{assert_consistent, find, processes};

    #[test]
    fn test_basic_order() {
        let (done, timeline) = schedule(processes(&[(0, 5), (1, 3), (2, 8)]));
        assert_eq!(timeline.to_string(), "P1(0-5) P2(5-8) P3(8-16)");

        let waiting: Vec<u64> = done.iter().map(|p| p.waiting_time().unwrap()).collect();
        let turnaround: Vec<u64> = done.iter().map(|p| p.turnaround_time().unwrap()).collect();
        assert_eq!(waiting, vec![0, 4, 6]);
        assert_eq!(turnaround, vec![5, 7, 14]);
        assert_consistent(&done, &timeline);
    }

    #[test]
    fn test_idle_gap() {
        let (done, timeline) = schedule(processes(&[(4, 2), (0, 1)]));
        assert_eq!(timeline.to_string(), "P2(0-1) P1(4-6)");
        assert_eq!(find(&done, 1).waiting_time(), Some(0));
        assert_eq!(timeline.idle_time(), 3);
        assert_consistent(&done, &timeline);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let (_, timeline) = schedule(processes(&[(2, 1), (0, 3), (2, 2), (0, 1)]));
        assert_eq!(timeline.to_string(), "P2(0-3) P4(3-4) P1(4-5) P3(5-7)");
    }

    #[test]
    fn test_rerun_is_identical() {
        let input = processes(&[(3, 2), (0, 4), (1, 1)]);
        assert_eq!(schedule(input.clone()), schedule(input));
    }
}
