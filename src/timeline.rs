//! # Módulo de Línea de Tiempo
//!
//! Registro ordenado de qué proceso ocupó la CPU en cada intervalo
//! (diagrama de Gantt). Los algoritmos lo construyen de forma incremental
//! y lo entregan al llamador al terminar la ejecución.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::process::ProcessId;

/// Segmento de ejecución `[start, end)` de un proceso.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub process: ProcessId,
    pub start: u64,
    pub end: u64,
}

impl Segment {
    /// Crea un segmento `[start, end)` para `process`.
    pub fn new(process: ProcessId, start: u64, end: u64) -> Self {
        Self { process, start, end }
    }

    /// Duración del segmento.
    pub fn len(&self) -> u64 {
        self.end - self.start
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}-{})", self.process, self.start, self.end)
    }
}

/// Secuencia de segmentos con `start` no decreciente.
///
/// Para algoritmos no preemptivos hay un segmento por proceso; SRT emite
/// segmentos de una unidad y Round Robin segmentos de a lo sumo un quantum.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    segments: Vec<Segment>,
}

impl Timeline {
    /// Crea una línea de tiempo vacía.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::Timeline;
    ///
    /// let timeline = Timeline::new();
    /// assert!(timeline.is_empty());
    /// assert_eq!(timeline.makespan(), 0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Agrega un segmento al final de la línea de tiempo.
    ///
    /// # Panics
    ///
    /// En compilaciones de depuración, si el segmento está vacío o empieza
    /// antes de que termine el anterior.
    pub fn push(&mut self, process: ProcessId, start: u64, end: u64) {
        debug_assert!(start < end, "segmento vacío {}({}-{})", process, start, end);
        debug_assert!(
            self.segments.last().map_or(true, |last| last.end <= start),
            "segmento {}({}-{}) solapa con el anterior",
            process,
            start,
            end
        );
        self.segments.push(Segment::new(process, start, end));
    }

    /// Obtiene los segmentos en orden cronológico.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Cantidad de segmentos (no de unidades de tiempo).
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Tiempo total de CPU asignado a `process` en toda la línea.
    pub fn busy_time(&self, process: ProcessId) -> u64 {
        self.segments
            .iter()
            .filter(|s| s.process == process)
            .map(Segment::len)
            .sum()
    }

    /// Instante en que termina el último segmento (0 si está vacía).
    pub fn makespan(&self) -> u64 {
        self.segments.last().map_or(0, |s| s.end)
    }

    /// Tiempo en que la CPU estuvo ociosa entre 0 y el makespan.
    pub fn idle_time(&self) -> u64 {
        let busy: u64 = self.segments.iter().map(Segment::len).sum();
        self.makespan() - busy
    }

    /// Devuelve una copia con los segmentos contiguos del mismo proceso
    /// fusionados.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::{ProcessId, Timeline};
    ///
    /// let mut timeline = Timeline::new();
    /// timeline.push(ProcessId(1), 0, 1);
    /// timeline.push(ProcessId(1), 1, 2);
    /// timeline.push(ProcessId(2), 2, 3);
    /// assert_eq!(timeline.coalesced().to_string(), "P1(0-2) P2(2-3)");
    /// ```
    pub fn coalesced(&self) -> Timeline {
        let mut merged: Vec<Segment> = Vec::with_capacity(self.segments.len());
        for seg in &self.segments {
            match merged.last_mut() {
                Some(last) if last.process == seg.process && last.end == seg.start => {
                    last.end = seg.end;
                }
                _ => merged.push(*seg),
            }
        }
        Timeline { segments: merged }
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Timeline {
        let mut timeline = Timeline::new();
        timeline.push(ProcessId(1), 0, 2);
        timeline.push(ProcessId(2), 2, 4);
        timeline.push(ProcessId(1), 6, 7);
        timeline
    }

    #[test]
    fn test_display() {
        assert_eq!(sample().to_string(), "P1(0-2) P2(2-4) P1(6-7)");
        assert_eq!(Timeline::new().to_string(), "");
    }

    #[test]
    fn test_busy_and_idle_time() {
        let timeline = sample();
        assert_eq!(timeline.busy_time(ProcessId(1)), 3);
        assert_eq!(timeline.busy_time(ProcessId(2)), 2);
        assert_eq!(timeline.busy_time(ProcessId(9)), 0);
        assert_eq!(timeline.makespan(), 7);
        assert_eq!(timeline.idle_time(), 2);
    }

    #[test]
    fn test_coalesced_keeps_gaps() {
        let mut timeline = Timeline::new();
        timeline.push(ProcessId(1), 0, 1);
        timeline.push(ProcessId(1), 1, 2);
        timeline.push(ProcessId(1), 3, 4);
        let merged = timeline.coalesced();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.to_string(), "P1(0-2) P1(3-4)");
    }
}
