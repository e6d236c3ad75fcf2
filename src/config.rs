//! Application configuration.
//!
//! Everything that used to be a literal in the render loop lives here: window
//! geometry, clear colour, frame pacing and the scene description. A [`Config`]
//! can be built in code or parsed from JSON; fields missing from the document
//! fall back to [`Config::default`].

use std::{fs, path::Path};

use anyhow::{Context as _, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::data_structures::scene::SceneDescription;

/// Adaptive refresh rate bounds in Hz.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRateRange {
    pub min: u32,
    pub max: u32,
    pub preferred: u32,
}

impl FrameRateRange {
    pub fn new(min: u32, max: u32, preferred: u32) -> Self {
        Self {
            min,
            max,
            preferred,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.min > 0 && self.max > 0 && self.preferred > 0,
            "frame rates must be positive, got {:?}",
            self
        );
        ensure!(
            self.min <= self.preferred && self.preferred <= self.max,
            "frame rate range must satisfy min <= preferred <= max, got {:?}",
            self
        );
        Ok(())
    }
}

impl Default for FrameRateRange {
    fn default() -> Self {
        Self::new(30, 60, 60)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,
    /// Initial window width in logical pixels.
    pub width: u32,
    /// Initial window height in logical pixels.
    pub height: u32,
    pub clear_colour: [f64; 4],
    pub frame_rate: FrameRateRange,
    /// Pace frames with the display's vertical sync when the surface allows it.
    pub vsync: bool,
    pub scene: SceneDescription,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Spinning Cubes".to_string(),
            width: 1200,
            height: 900,
            clear_colour: [0.1, 0.1, 0.25, 1.0],
            frame_rate: FrameRateRange::default(),
            vsync: true,
            scene: SceneDescription::default(),
        }
    }
}

impl Config {
    /// Parse and validate a JSON config document.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text).context("malformed config document")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        self.frame_rate.validate()?;
        ensure!(
            self.width > 0 && self.height > 0,
            "window size must be non-zero, got {}x{}",
            self.width,
            self.height
        );
        self.scene.validate()
    }

    pub fn clear_colour(&self) -> wgpu::Color {
        let [r, g, b, a] = self.clear_colour;
        wgpu::Color { r, g, b, a }
    }
}
