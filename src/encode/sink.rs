use std::path::{Path, PathBuf};

use crate::foundation::error::{DotFieldError, DotFieldResult};
use crate::render::pixels::FrameRGBA;

/// Configuration provided to a [`FrameSink`] at the start of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Surface width in pixels when the run started.
    pub width: u32,
    /// Surface height in pixels when the run started.
    pub height: u32,
    /// Frames per second of the run.
    pub fps: u32,
}

/// Sink contract for consuming rendered frames in order.
///
/// Ordering contract: `push_frame` is called with strictly increasing indices. Frame sizes may
/// change mid-run when the viewport is resized.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> DotFieldResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> DotFieldResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> DotFieldResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(u64, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` was called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> DotFieldResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> DotFieldResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> DotFieldResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes each frame as `frame_00000.png`, `frame_00001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Sink writing into `dir` (created on `begin`).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Paths written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// File name used for frame `idx`.
    pub fn file_name(idx: u64) -> String {
        format!("frame_{idx:05}.png")
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> DotFieldResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        self.written.clear();
        tracing::debug!(dir = %self.dir.display(), fps = cfg.fps, "writing png sequence");
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> DotFieldResult<()> {
        let path = self.dir.join(Self::file_name(idx));
        write_png(&path, frame)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> DotFieldResult<()> {
        tracing::debug!(frames = self.written.len(), "png sequence complete");
        Ok(())
    }
}

/// Encode a frame as a straight-alpha PNG file.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> DotFieldResult<()> {
    let data = frame.to_straight_rgba();
    image::save_buffer_with_format(
        path,
        &data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| DotFieldError::render(format!("write png '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
