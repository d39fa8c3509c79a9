//! Model loading progress reported by the external viewer.

use serde::{Deserialize, Serialize};

/// Fraction of the model loaded, always within `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadProgress(f64);

impl LoadProgress {
    pub fn new(fraction: f64) -> Self {
        if fraction.is_finite() {
            Self(fraction.clamp(0.0, 1.0))
        } else {
            Self(0.0)
        }
    }

    pub fn fraction(&self) -> f64 {
        self.0
    }

    /// Percentage rounded half up, as shown in the loading overlay
    pub fn percent(&self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LoadState {
    Loading(LoadProgress),
    Ready,
    Failed(String),
}

impl Default for LoadState {
    fn default() -> Self {
        LoadState::Loading(LoadProgress::default())
    }
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Progress events arriving after the load finished are ignored
    pub fn report(&mut self, fraction: f64) {
        if let LoadState::Loading(progress) = self {
            *progress = LoadProgress::new(fraction);
        }
    }
}
