pub mod config;
pub mod speckle;
