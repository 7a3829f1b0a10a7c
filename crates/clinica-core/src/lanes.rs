//! Lane assignment for concurrent attention intervals.
//!
//! Each clinician's intervals are laid out on display lanes so that bars sharing a lane
//! never overlap. Intervals are half-open: one ending at `t` and another starting at `t`
//! may share a lane.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

/// A half-open interval `[start, end)` owned by one clinician.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval<T> {
    pub clinician: String,
    pub start: T,
    pub end: T,
}

impl<T: Ord + Copy> Interval<T> {
    pub fn new(clinician: impl Into<String>, start: T, end: T) -> Self {
        Self {
            clinician: clinician.into(),
            start,
            end,
        }
    }

    /// End clamped so a reversed interval collapses to zero length at `start`.
    pub fn effective_end(&self) -> T {
        self.end.max(self.start)
    }
}

/// Assigns a lane to every interval, returned in input order.
///
/// Intervals are stable-sorted by (clinician, start) and placed greedily on the first
/// lane of their clinician whose last interval ended at or before their start; a new
/// lane is opened when none is free. Equal starts keep their input order.
pub fn assign_lanes<T: Ord + Copy>(intervals: &[Interval<T>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    order.sort_by(|&a, &b| {
        let (left, right) = (&intervals[a], &intervals[b]);
        match left.clinician.cmp(&right.clinician) {
            Ordering::Equal => left.start.cmp(&right.start),
            other => other,
        }
    });

    let mut lanes = vec![0usize; intervals.len()];
    let mut lane_ends: HashMap<&str, Vec<T>> = HashMap::new();

    for idx in order {
        let interval = &intervals[idx];
        let ends = lane_ends.entry(interval.clinician.as_str()).or_default();
        lanes[idx] = first_fit(ends, interval.start, interval.effective_end());
    }

    for (clinician, ends) in &lane_ends {
        debug!(clinician = %clinician, lanes = ends.len(), "assigned attention lanes");
    }

    lanes
}

/// Places `[start, end)` on the first lane free at `start`, updating `lane_ends`.
pub fn first_fit<T: Ord + Copy>(lane_ends: &mut Vec<T>, start: T, end: T) -> usize {
    if let Some(lane) = lane_ends.iter().position(|&lane_end| lane_end <= start) {
        lane_ends[lane] = end;
        lane
    } else {
        lane_ends.push(end);
        lane_ends.len() - 1
    }
}

/// Number of lanes a set of assignments occupies.
pub fn lanes_used(lanes: &[usize]) -> usize {
    lanes.iter().max().map_or(0, |max| max + 1)
}

/// Largest number of intervals open at the same instant. Zero-length intervals are never open.
pub fn max_concurrency<T: Ord + Copy>(intervals: &[Interval<T>]) -> usize {
    // (time, delta): ends sort before starts at the same instant
    let mut events: Vec<(T, i32)> = Vec::with_capacity(intervals.len() * 2);
    for interval in intervals {
        let end = interval.effective_end();
        if end > interval.start {
            events.push((interval.start, 1));
            events.push((end, -1));
        }
    }
    events.sort();

    let mut open = 0i32;
    let mut peak = 0i32;
    for (_, delta) in events {
        open += delta;
        peak = peak.max(open);
    }

    peak as usize
}
