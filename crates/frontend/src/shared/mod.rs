pub mod icons;
pub mod loader;
