//! Vertex layout descriptions for uploaded meshes.
//!
//! [`VertexLayout`] records which stream buffers a mesh binds and the
//! attribute each one carries. Layouts are shared as `Arc` since a scene
//! only ever uses a few of them.

mod layout;

pub use layout::{
    VertexAttribute, VertexAttributeFormat, VertexAttributeSemantic, VertexBufferLayout,
    VertexLayout,
};
