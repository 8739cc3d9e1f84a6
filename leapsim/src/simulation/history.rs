//! Per-step records kept for the renderer
//!
//! Energies and times are append-only and never dropped. Positions are
//! append-only too unless a trail limit is set, in which case only the newest
//! `limit + 1` snapshots survive.

use std::collections::VecDeque;

use crate::simulation::energy::Energies;
use crate::simulation::states::NVec3;

/// Most entries reserved up front; longer runs grow the buffers as they go
pub const RESERVE_LIMIT: usize = 1 << 16;

#[derive(Debug, Clone)]
pub struct History {
    positions: VecDeque<Vec<NVec3>>,
    position_limit: Option<usize>,
    kinetic: Vec<f64>,
    potential: Vec<f64>,
    time: Vec<f64>,
}

impl History {
    /// `capacity` is the expected number of entries (num_timesteps + 1)
    pub fn new(capacity: usize, trail_limit: Option<usize>) -> Self {
        let capacity = capacity.min(RESERVE_LIMIT);
        let position_limit = trail_limit.map(|l| l.saturating_add(1));
        let pos_capacity = position_limit.map_or(capacity, |l| l.min(capacity));
        Self {
            positions: VecDeque::with_capacity(pos_capacity),
            position_limit,
            kinetic: Vec::with_capacity(capacity),
            potential: Vec::with_capacity(capacity),
            time: Vec::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, t: f64, positions: Vec<NVec3>, energies: Energies) {
        if let Some(limit) = self.position_limit {
            while self.positions.len() >= limit {
                self.positions.pop_front();
            }
        }
        self.positions.push_back(positions);
        self.kinetic.push(energies.kinetic);
        self.potential.push(energies.potential);
        self.time.push(t);
    }

    /// Number of recorded steps, including the initial state
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn current_positions(&self) -> Option<&[NVec3]> {
        self.positions.back().map(Vec::as_slice)
    }

    /// Up to `window` snapshots preceding the current one, oldest first
    pub fn trail(&self, window: usize) -> Vec<&[NVec3]> {
        let available = self.positions.len().saturating_sub(1);
        let take = window.min(available);
        let start = available - take;
        self.positions
            .range(start..available)
            .map(Vec::as_slice)
            .collect()
    }

    /// Position snapshots still held, oldest first
    pub fn positions(&self) -> impl Iterator<Item = &[NVec3]> + '_ {
        self.positions.iter().map(Vec::as_slice)
    }

    pub fn kinetic(&self) -> &[f64] {
        &self.kinetic
    }

    pub fn potential(&self) -> &[f64] {
        &self.potential
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn total_energy(&self, step: usize) -> Option<f64> {
        Some(self.kinetic.get(step)? + self.potential.get(step)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(k: f64) -> Energies {
        Energies { kinetic: k, potential: -k }
    }

    fn snap(x: f64) -> Vec<NVec3> {
        vec![NVec3::new(x, 0.0, 0.0)]
    }

    #[test]
    fn unbounded_keeps_everything() {
        let mut h = History::new(4, None);
        for i in 0..4 {
            h.record(i as f64, snap(i as f64), e(i as f64));
        }
        assert_eq!(h.len(), 4);
        assert_eq!(h.positions().count(), 4);
        assert_eq!(h.current_positions().unwrap()[0].x, 3.0);
        assert_eq!(h.total_energy(2), Some(0.0));
        assert_eq!(h.total_energy(4), None);
    }

    #[test]
    fn trail_excludes_current_and_is_bounded() {
        let mut h = History::new(20, None);
        assert!(h.trail(10).is_empty());

        h.record(0.0, snap(0.0), e(1.0));
        assert!(h.trail(10).is_empty());

        for i in 1..15 {
            h.record(i as f64, snap(i as f64), e(1.0));
        }
        let trail = h.trail(10);
        assert_eq!(trail.len(), 10);
        assert_eq!(trail[0][0].x, 4.0);
        assert_eq!(trail[9][0].x, 13.0);
    }

    #[test]
    fn huge_capacity_is_not_reserved_up_front() {
        let mut h = History::new(usize::MAX, Some(usize::MAX));
        assert!(h.kinetic.capacity() <= 2 * RESERVE_LIMIT);
        assert!(h.positions.capacity() <= 2 * RESERVE_LIMIT);
        h.record(0.0, snap(0.0), e(1.0));
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn limit_turns_positions_into_ring() {
        let mut h = History::new(100, Some(3));
        for i in 0..10 {
            h.record(i as f64, snap(i as f64), e(1.0));
        }
        assert_eq!(h.positions().count(), 4);
        assert_eq!(h.kinetic().len(), 10);
        assert_eq!(h.time().len(), 10);
        let trail = h.trail(10);
        assert_eq!(trail.len(), 3);
        assert_eq!(trail[0][0].x, 6.0);
    }
}
