//! Bridge to the external 3D viewer.
//!
//! Rendering, model loading, camera control and hit-testing are done by the
//! JS viewer library. Rust only receives two event streams from it: load
//! progress and object clicks.

mod bridge;

pub use bridge::{raw_metadata, start_viewer};
