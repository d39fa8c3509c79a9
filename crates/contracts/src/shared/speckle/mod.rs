//! Metadata of Speckle model components shown in the viewer sidebar
//!
//! Raw metadata attached to a clicked scene node flows one way:
//! raw JSON → [`validate`] → [`ValidatedMetadata`] → [`format_metadata`]
//! → ordered [`MetadataSection`]s. [`PanelState`] decides whether and how
//! the sections are shown.
//!
//! ## Usage
//!
//! ```rust
//! use contracts::shared::speckle::{PanelEvent, PanelState};
//! use serde_json::json;
//!
//! let mut panel = PanelState::new();
//! panel.dispatch(PanelEvent::from_hit(Some(&json!({"id": "abc123"}))));
//! assert!(panel.is_shown());
//! assert_eq!(panel.sections()[0].entries[3].value, "abc123");
//! ```

mod format;
mod panel;
mod progress;
mod types;
mod validation;

pub use format::{
    format_metadata, format_raw, BASIC_INFO, DEFINITION, DISPLAY_STYLE,
    HIDDEN_USER_STRING_KEYS, MATERIAL, MISSING_AXIS, PLACEHOLDER, TRANSFORM, USER_DATA,
};
pub use panel::{PanelEvent, PanelLayout, PanelState, Visibility};
pub use progress::{LoadProgress, LoadState};
pub use types::{
    number_to_string, value_to_string, BasePoint, Definition, DisplayStyle, MetadataEntry,
    MetadataSection, RenderMaterial, ScalarValue, Transform, ValidatedMetadata,
};
pub use validation::{validate, ValidationError, MIN_MATRIX_LEN};
