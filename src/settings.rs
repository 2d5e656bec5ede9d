//! Maze settings
//!
//! Construction-time parameters for a maze session, validated before any
//! grid is allocated.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Difficulty levels, each mapping to a carving branch factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    /// Branch factor 0: one direction per unforced choice, long corridors
    Easy,
    #[default]
    Medium,
    /// Branch factor 2: up to three directions per choice, dense branching
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "0" => Some(Difficulty::Easy),
            "medium" | "med" | "1" => Some(Difficulty::Medium),
            "hard" | "2" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Extra directions allowed beyond the first when a choice is random
    pub fn branch_factor(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    pub fn from_branch_factor(branch_factor: usize) -> Self {
        match branch_factor {
            0 => Difficulty::Easy,
            1 => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }
}

/// Rejected settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("maze dimensions must be odd, got {width}x{height}")]
    EvenDimension { width: usize, height: usize },

    #[error("maze dimensions must be at least {min}, got {width}x{height}")]
    TooSmall { width: usize, height: usize, min: usize },

    #[error("step size must be positive, got {0}")]
    NonPositiveStep(f32),

    #[error("body diameter must be positive and smaller than the step size ({step_size}), got {diameter}")]
    BodyDoesNotFit { diameter: f32, step_size: f32 },

    #[error("gravity must be positive, got {0}")]
    NonPositiveGravity(f32),

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("could not read settings: {0}")]
    Io(#[from] std::io::Error),
}

/// Maze session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeSettings {
    /// Grid width in cells (odd, >= 5)
    pub width: usize,
    /// Grid height in cells (odd, >= 5)
    pub height: usize,
    /// Pixels per cell
    pub step_size: f32,
    /// Side of the body's bounding square in pixels
    pub body_diameter: f32,
    /// Carving branch factor
    pub difficulty: Difficulty,
    /// Pseudo-gravity constant
    pub gravity: f32,
    /// Pause between carving steps when the reveal is animated
    pub reveal_delay_ms: u64,
}

impl Default for MazeSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            step_size: DEFAULT_STEP_SIZE,
            body_diameter: DEFAULT_BODY_DIAMETER,
            difficulty: Difficulty::default(),
            gravity: GRAVITY,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
        }
    }
}

impl MazeSettings {
    /// Settings for a maze of the given size, defaults elsewhere
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check every constraint the grid and physics rely on
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width % 2 == 0 || self.height % 2 == 0 {
            return Err(SettingsError::EvenDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.width < MIN_DIMENSION || self.height < MIN_DIMENSION {
            return Err(SettingsError::TooSmall {
                width: self.width,
                height: self.height,
                min: MIN_DIMENSION,
            });
        }
        if !(self.step_size > 0.0) {
            return Err(SettingsError::NonPositiveStep(self.step_size));
        }
        if !(self.body_diameter > 0.0) || self.body_diameter >= self.step_size {
            return Err(SettingsError::BodyDoesNotFit {
                diameter: self.body_diameter,
                step_size: self.step_size,
            });
        }
        if !(self.gravity > 0.0) {
            return Err(SettingsError::NonPositiveGravity(self.gravity));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded settings from {}: {}x{} {}",
            path.as_ref().display(),
            settings.width,
            settings.height,
            settings.difficulty.as_str()
        );
        Ok(settings)
    }

    pub fn branch_factor(&self) -> usize {
        self.difficulty.branch_factor()
    }

    /// Maze extent in pixels
    pub fn maze_px(&self) -> (f32, f32) {
        (
            self.width as f32 * self.step_size,
            self.height as f32 * self.step_size,
        )
    }
}
