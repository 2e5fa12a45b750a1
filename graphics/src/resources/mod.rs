//! GPU resources created by a [`GraphicsDevice`].
//!
//! [`Buffer`] and [`Texture`] are shared as `Arc` wherever they are bound;
//! the last holder to drop releases the GPU memory. Each resource points
//! back at its device only weakly.
//!
//! [`GraphicsDevice`]: crate::GraphicsDevice

mod buffer;
mod texture;

pub use buffer::Buffer;
pub use texture::Texture;
