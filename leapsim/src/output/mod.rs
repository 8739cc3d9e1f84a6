//! Collaborators that consume simulation state after each step
//!
//! The integrator never reads anything back from these. A [`Renderer`] turns
//! a [`Snapshot`] into a [`Frame`]; a [`FrameSink`] persists frames per run
//! and assembles them once the run is over.

pub mod renderer;
pub mod sink;

pub use renderer::{Frame, Renderer, Snapshot, SnapshotRenderer, TRAIL_WINDOW};
pub use sink::{DirectorySink, FrameSink, MemorySink};
