//! # Whirligig Core
//!
//! CPU-side data for the Whirligig demo: validated mesh arrays and decoded
//! texture pixels, ready for GPU upload by the graphics crate.

pub mod error;
pub mod mesh;
pub mod texture;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the core crate version at startup.
pub fn init() {
    log::info!("Whirligig Core v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
