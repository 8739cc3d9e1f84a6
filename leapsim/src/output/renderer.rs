//! Renderer contract and the default data-frame renderer

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::simulation::states::NVec3;

/// How many past position snapshots a renderer is handed for trails
pub const TRAIL_WINDOW: usize = 10;

/// Borrowed view of the run state right after a step
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub step: usize,
    pub t: f64,
    pub trail: Vec<&'a [NVec3]>, // oldest first, at most TRAIL_WINDOW entries
    pub current: &'a [NVec3],
    pub kinetic: &'a [f64], // full history, index = step
    pub potential: &'a [f64],
    pub time: &'a [f64],
}

/// One rendered output artifact, keyed by step index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub step: usize,
    pub t: f64,
    pub positions: Vec<[f64; 3]>,
    pub trail: Vec<Vec<[f64; 3]>>,
    pub kinetic: f64,
    pub potential: f64,
    pub total: f64,
}

pub trait Renderer {
    fn render(&mut self, snap: &Snapshot<'_>) -> Result<Frame, SimError>;
}

/// Copies the snapshot into an owned, serializable [`Frame`].
/// Only the newest energy values are kept per frame; the full series is
/// rebuilt from the frames when a sink assembles the run.
#[derive(Debug, Clone, Default)]
pub struct SnapshotRenderer {
    pub trail_window: Option<usize>, // None = TRAIL_WINDOW
}

fn to_array(v: &NVec3) -> [f64; 3] {
    [v.x, v.y, v.z]
}

impl Renderer for SnapshotRenderer {
    fn render(&mut self, snap: &Snapshot<'_>) -> Result<Frame, SimError> {
        let window = self.trail_window.unwrap_or(TRAIL_WINDOW);
        let skip = snap.trail.len().saturating_sub(window);

        let kinetic = snap.kinetic.last().copied().unwrap_or(0.0);
        let potential = snap.potential.last().copied().unwrap_or(0.0);

        Ok(Frame {
            step: snap.step,
            t: snap.t,
            positions: snap.current.iter().map(to_array).collect(),
            trail: snap.trail[skip..]
                .iter()
                .map(|p| p.iter().map(to_array).collect())
                .collect(),
            kinetic,
            potential,
            total: kinetic + potential,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_copies_latest_state() {
        let old = vec![NVec3::new(0.0, 0.0, 0.0)];
        let cur = vec![NVec3::new(1.0, 2.0, 3.0)];
        let snap = Snapshot {
            step: 1,
            t: 0.1,
            trail: vec![old.as_slice()],
            current: &cur,
            kinetic: &[1.0, 1.5],
            potential: &[-2.0, -2.5],
            time: &[0.0, 0.1],
        };

        let frame = SnapshotRenderer::default().render(&snap).unwrap();
        assert_eq!(frame.step, 1);
        assert_eq!(frame.positions, vec![[1.0, 2.0, 3.0]]);
        assert_eq!(frame.trail, vec![vec![[0.0, 0.0, 0.0]]]);
        assert_eq!(frame.kinetic, 1.5);
        assert_eq!(frame.total, -1.0);
    }

    #[test]
    fn narrower_window_drops_oldest() {
        let snaps: Vec<Vec<NVec3>> = (0..5).map(|i| vec![NVec3::new(i as f64, 0.0, 0.0)]).collect();
        let cur = vec![NVec3::zeros()];
        let snap = Snapshot {
            step: 5,
            t: 0.5,
            trail: snaps.iter().map(Vec::as_slice).collect(),
            current: &cur,
            kinetic: &[],
            potential: &[],
            time: &[],
        };

        let mut r = SnapshotRenderer { trail_window: Some(2) };
        let frame = r.render(&snap).unwrap();
        assert_eq!(frame.trail.len(), 2);
        assert_eq!(frame.trail[0][0][0], 3.0);
        assert_eq!(frame.total, 0.0);
    }
}
