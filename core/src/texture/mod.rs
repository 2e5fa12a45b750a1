//! CPU-side texture pixel data.
//!
//! Provides [`CpuTexture`]: image pixels decoded to tightly packed RGBA8,
//! the form the graphics crate uploads to the GPU. Whether those pixels are
//! later sampled as sRGB or linear is a GPU-format decision and not recorded
//! here.

mod types;

pub use types::CpuTexture;
