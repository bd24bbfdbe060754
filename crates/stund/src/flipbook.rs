//! # Flipbook — Sprite Sheet Frame Animation
//!
//! A flipbook plays a sequence of frames cut from a single sheet texture:
//!
//! ```text
//!  ┌────┬────┬────┬────┐
//!  │ 0  │ 1  │ 2  │ 3  │   4-column, 2-row sheet
//!  ├────┼────┼────┼────┤   frame index = row * columns + column
//!  │ 4  │ 5  │ 6  │ 7  │
//!  └────┴────┴────┴────┘
//! ```
//!
//! [`FlipbookSheet`] describes the grid, [`FlipbookClip`] picks frames and a
//! rate, and the [`Flipbook`] component drives playback. Playback time comes
//! from an embedded stopwatch [`TimeTool`], so `pause`/`resume` follow the
//! tool lifecycle and a flipbook on the `Scaled` clock freezes for free when
//! the host pauses.
//!
//! Clips are plain data and serializable; [`load_clip_manifest`] reads a
//! JSON map of named clips authored offline.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ecs::World;
use crate::math::{Rect, Vec2};
use crate::time::{ClockMode, ClockSource, TimeTool, ToolState};

/// Describes a uniform grid sheet.
///
/// All frames are the same size; indices are row-major. Supports padding
/// between frames and an offset from the texture's top-left corner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlipbookSheet {
    pub columns: u32,
    pub rows: u32,
    /// Size of one frame in pixels.
    pub tile_size: Vec2,
    /// Space between frames in pixels.
    #[serde(default)]
    pub padding: Vec2,
    /// Top-left margin in pixels.
    #[serde(default)]
    pub offset: Vec2,
    /// Total texture dimensions in pixels.
    pub texture_size: Vec2,
}

impl FlipbookSheet {
    /// A sheet that divides the texture evenly into `columns` x `rows`.
    pub fn new(columns: u32, rows: u32, texture_size: Vec2) -> Self {
        Self {
            columns,
            rows,
            tile_size: Vec2::new(
                texture_size.x / columns as f32,
                texture_size.y / rows as f32,
            ),
            padding: Vec2::ZERO,
            offset: Vec2::ZERO,
            texture_size,
        }
    }

    /// A sheet with explicit tile size, optional padding and offset. The
    /// texture size is computed from the grid parameters.
    pub fn from_grid(
        tile_size: Vec2,
        columns: u32,
        rows: u32,
        padding: Option<Vec2>,
        offset: Option<Vec2>,
    ) -> Self {
        let padding = padding.unwrap_or(Vec2::ZERO);
        let offset = offset.unwrap_or(Vec2::ZERO);
        let texture_size = Vec2::new(
            offset.x + columns as f32 * tile_size.x + (columns - 1) as f32 * padding.x,
            offset.y + rows as f32 * tile_size.y + (rows - 1) as f32 * padding.y,
        );
        Self {
            columns,
            rows,
            tile_size,
            padding,
            offset,
            texture_size,
        }
    }

    /// UV rect for a frame index (row-major, 0-based).
    pub fn frame_rect(&self, index: u32) -> Rect {
        let col = index % self.columns;
        let row = index / self.columns;
        let x = self.offset.x + col as f32 * (self.tile_size.x + self.padding.x);
        let y = self.offset.y + row as f32 * (self.tile_size.y + self.padding.y);
        Rect::from_pixels(
            x,
            y,
            self.tile_size.x,
            self.tile_size.y,
            self.texture_size.x,
            self.texture_size.y,
        )
    }

    /// Total number of frames in the sheet.
    pub fn frame_count(&self) -> u32 {
        self.columns * self.rows
    }
}

/// A sequence of frames with playback settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlipbookClip {
    /// Frame indices into the sheet (row-major order).
    pub frames: Vec<u32>,
    /// Seconds per frame.
    pub frame_time: f32,
    /// Whether to wrap around when the last frame is passed.
    #[serde(default)]
    pub looping: bool,
}

impl FlipbookClip {
    /// Play frames `first..=last` sequentially.
    pub fn from_range(first: u32, last: u32, frame_time: f32) -> Self {
        Self {
            frames: (first..=last).collect(),
            frame_time,
            looping: false,
        }
    }

    /// Play every frame in the sheet.
    pub fn from_sheet(sheet: &FlipbookSheet, frame_time: f32) -> Self {
        Self {
            frames: (0..sheet.frame_count()).collect(),
            frame_time,
            looping: false,
        }
    }

    /// Enable looping (builder pattern).
    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }
}

// ── Clip manifests ──────────────────────────────────────────────────────

/// Errors from loading a clip manifest.
#[derive(Debug)]
pub enum ManifestError {
    /// Failed to read the manifest file.
    Io(String),
    /// The manifest isn't valid JSON for a clip map.
    Parse(String),
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestError::Io(e) => write!(f, "manifest read failed: {e}"),
            ManifestError::Parse(e) => write!(f, "manifest parse failed: {e}"),
        }
    }
}

impl std::error::Error for ManifestError {}

/// Parse a JSON map of clip name → [`FlipbookClip`].
pub fn parse_clip_manifest(json: &str) -> Result<HashMap<String, FlipbookClip>, ManifestError> {
    serde_json::from_str(json).map_err(|e| ManifestError::Parse(e.to_string()))
}

/// Load a clip manifest from disk.
///
/// The file holds a JSON object of named clips:
///
/// ```json
/// {
///   "walk": { "frames": [0, 1, 2, 3], "frame_time": 0.1, "looping": true },
///   "jump": { "frames": [8, 9], "frame_time": 0.15 }
/// }
/// ```
pub fn load_clip_manifest(
    path: impl AsRef<Path>,
) -> Result<HashMap<String, FlipbookClip>, ManifestError> {
    let text =
        std::fs::read_to_string(path.as_ref()).map_err(|e| ManifestError::Io(e.to_string()))?;
    parse_clip_manifest(&text)
}

// ── Components ──────────────────────────────────────────────────────────

/// Sprite display data consumed by the host renderer.
///
/// The toolkit only writes fields here; drawing is the host's job.
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    /// UV sub-region of the texture to display.
    pub region: Rect,
    /// Flip the sprite horizontally.
    pub flip_x: bool,
    /// Flip the sprite vertically.
    pub flip_y: bool,
}

impl Sprite {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            region: Rect::FULL,
            flip_x: false,
            flip_y: false,
        }
    }
}

/// Component: plays a [`FlipbookClip`] over a [`FlipbookSheet`].
///
/// Attach alongside a [`Sprite`] and run [`advance_flipbooks`] each frame.
/// Playback starts automatically on the first advance; a stopped-but-paused
/// distinction is handled by the embedded time tool.
#[derive(Debug, Clone)]
pub struct Flipbook {
    pub sheet: FlipbookSheet,
    pub clip: FlipbookClip,
    /// Playback speed multiplier (1.0 = normal).
    pub speed: f32,
    tool: TimeTool,
    current_index: usize,
    finished: bool,
}

impl Flipbook {
    /// A flipbook timed against the given clock.
    pub fn new(sheet: FlipbookSheet, clip: FlipbookClip, mode: ClockMode) -> Self {
        Self {
            sheet,
            clip,
            speed: 1.0,
            tool: TimeTool::stopwatch(mode),
            current_index: 0,
            finished: false,
        }
    }

    /// Enable looping on the current clip (builder pattern).
    pub fn looping(mut self) -> Self {
        self.clip.looping = true;
        self
    }

    /// Set the playback speed multiplier (builder pattern).
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Replace the clip and restart playback from the first frame.
    pub fn play(&mut self, clip: FlipbookClip) {
        self.clip = clip;
        self.tool.reset();
        self.current_index = 0;
        self.finished = false;
    }

    /// Freeze playback at the current frame.
    pub fn pause(&mut self, clock: &impl ClockSource) {
        self.tool.pause(clock);
    }

    /// Continue playback; time spent paused doesn't advance frames.
    pub fn resume(&mut self, clock: &impl ClockSource) {
        self.tool.resume(clock);
    }

    /// `true` once a non-looping clip has played past its last frame.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// `true` while playback is frozen by [`pause`](Flipbook::pause).
    pub fn paused(&self) -> bool {
        self.tool.state() == ToolState::Paused
    }

    /// The sheet frame index currently displayed.
    pub fn current_frame(&self) -> u32 {
        self.clip.frames.get(self.current_index).copied().unwrap_or(0)
    }

    /// The current frame's UV rect.
    pub fn current_rect(&self) -> Rect {
        self.sheet.frame_rect(self.current_frame())
    }

    /// Advance playback to match the clock. Called by [`advance_flipbooks`].
    pub fn advance(&mut self, clock: &impl ClockSource) {
        if self.finished || self.clip.frames.is_empty() {
            return;
        }
        if self.tool.state() == ToolState::Stopped {
            self.tool.start(clock);
        }
        if !self.tool.is_running() {
            return;
        }
        self.tool.tick(clock);

        let len = self.clip.frames.len();
        let steps = if self.clip.frame_time > 0.0 {
            (self.tool.value() * self.speed / self.clip.frame_time) as usize
        } else {
            len
        };

        if self.clip.looping {
            self.current_index = steps % len;
        } else if steps >= len {
            self.current_index = len - 1;
            self.finished = true;
            self.tool.stop();
        } else {
            self.current_index = steps;
        }
    }
}

/// System: advance every flipbook and copy the current frame into its
/// [`Sprite`].
pub fn advance_flipbooks(world: &mut World, clock: &impl ClockSource) {
    world.each_pair::<Flipbook, Sprite>(|_entity, flipbook, sprite| {
        flipbook.advance(clock);
        sprite.region = flipbook.current_rect();
    });
}
