//! # Whirligig Demos
//!
//! Demo scenes showcasing the Whirligig asset pipeline.
//!
//! ## Available Demos
//!
//! - `windmill_demo` - Loads textures through the media resolver, builds
//!   render objects and records a frame

/// Demos library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
