//! Frame persistence keyed by run id and step index

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::output::renderer::Frame;

pub trait FrameSink {
    /// Called once before the first frame of `run_id`, drops anything an
    /// earlier run with the same id left behind
    fn begin(&mut self, run_id: &str) -> Result<(), SimError>;

    /// Persist one frame under `run_id`
    fn write(&mut self, run_id: &str, frame: &Frame) -> Result<(), SimError>;

    /// Called once after the last frame of `run_id`
    fn finish(&mut self, run_id: &str) -> Result<(), SimError>;
}

/// Ordered list of frame files for one run, written by [`DirectorySink::finish`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub run_id: String,
    pub frames: Vec<String>,
}

pub const ANIMATION_FILE: &str = "animation.yaml";
pub const ENERGY_FILE: &str = "energy.csv";

/// Writes `{root}/{run_id}/{step:06}.yaml` per frame
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root.join(run_id)
    }

    fn frame_name(step: usize) -> String {
        format!("{:06}.yaml", step)
    }

    /// Step indices of every frame file in `dir`, ascending
    fn frame_steps(dir: &Path) -> Result<Vec<usize>, SimError> {
        let mut steps = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            // animation.yaml and anything else non-numeric is not a frame
            if let Some(step) = path.file_stem().and_then(|s| s.to_str()).and_then(|s| s.parse::<usize>().ok()) {
                steps.push(step);
            }
        }
        steps.sort_unstable();
        Ok(steps)
    }

    /// Every frame of `run_id` in increasing step order
    pub fn read_frames(&self, run_id: &str) -> Result<Vec<Frame>, SimError> {
        let dir = self.run_dir(run_id);
        Self::frame_steps(&dir)?
            .into_iter()
            .map(|step| -> Result<Frame, SimError> {
                let file = File::open(dir.join(Self::frame_name(step)))?;
                let frame: Frame = serde_yaml::from_reader(BufReader::new(file))?;
                Ok(frame)
            })
            .collect()
    }

    pub fn read_animation(&self, run_id: &str) -> Result<Animation, SimError> {
        let file = File::open(self.run_dir(run_id).join(ANIMATION_FILE))?;
        Ok(serde_yaml::from_reader(BufReader::new(file))?)
    }
}

impl FrameSink for DirectorySink {
    fn begin(&mut self, run_id: &str) -> Result<(), SimError> {
        let dir = self.run_dir(run_id);
        if !dir.exists() {
            return Ok(());
        }
        let stale = Self::frame_steps(&dir)?;
        for &step in &stale {
            fs::remove_file(dir.join(Self::frame_name(step)))?;
        }
        for name in [ANIMATION_FILE, ENERGY_FILE] {
            let path = dir.join(name);
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        if !stale.is_empty() {
            log::debug!("run '{}': removed {} stale frames", run_id, stale.len());
        }
        Ok(())
    }

    fn write(&mut self, run_id: &str, frame: &Frame) -> Result<(), SimError> {
        let dir = self.run_dir(run_id);
        fs::create_dir_all(&dir)?;
        let file = File::create(dir.join(Self::frame_name(frame.step)))?;
        let mut writer = BufWriter::new(file);
        serde_yaml::to_writer(&mut writer, frame)?;
        writer.flush()?;
        Ok(())
    }

    fn finish(&mut self, run_id: &str) -> Result<(), SimError> {
        let dir = self.run_dir(run_id);
        fs::create_dir_all(&dir)?;
        let frames = self.read_frames(run_id)?;

        let animation = Animation {
            run_id: run_id.to_string(),
            frames: frames.iter().map(|f| Self::frame_name(f.step)).collect(),
        };
        let mut manifest = BufWriter::new(File::create(dir.join(ANIMATION_FILE))?);
        serde_yaml::to_writer(&mut manifest, &animation)?;
        manifest.flush()?;

        let mut csv = BufWriter::new(File::create(dir.join(ENERGY_FILE))?);
        writeln!(csv, "step,t,kinetic,potential,total")?;
        for f in &frames {
            writeln!(csv, "{},{},{},{},{}", f.step, f.t, f.kinetic, f.potential, f.total)?;
        }
        csv.flush()?;

        log::debug!("assembled {} frames for run '{}'", frames.len(), run_id);
        Ok(())
    }
}

/// Keeps frames in memory, used by tests and the benchmark
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub frames: HashMap<String, Vec<Frame>>,
    pub finished: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self, run_id: &str) -> &[Frame] {
        self.frames.get(run_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl FrameSink for MemorySink {
    fn begin(&mut self, run_id: &str) -> Result<(), SimError> {
        self.frames.remove(run_id);
        self.finished.retain(|id| id != run_id);
        Ok(())
    }

    fn write(&mut self, run_id: &str, frame: &Frame) -> Result<(), SimError> {
        self.frames.entry(run_id.to_string()).or_default().push(frame.clone());
        Ok(())
    }

    fn finish(&mut self, run_id: &str) -> Result<(), SimError> {
        self.finished.push(run_id.to_string());
        Ok(())
    }
}
