//! Vertex stream layout.
//!
//! A [`VertexLayout`] names the vertex buffers a mesh binds and which
//! attribute each one carries. Attributes are not interleaved here: the
//! asset pipeline uploads one stream buffer per attribute, so a layout is
//! mostly a list of strides plus the semantic each slot feeds.
//!
//! Layouts are shared as `Arc<VertexLayout>`. Only a handful of
//! combinations exist across a scene, and a pointer comparison is enough to
//! tell whether two objects can share pipeline state.

use std::sync::Arc;

use crate::error::GraphicsError;

/// What a vertex attribute means to the shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttributeSemantic {
    /// Object-space position, float3.
    Position,
    /// Object-space normal, float3.
    Normal,
    /// First texture coordinate set, float2.
    TexCoord0,
}

impl VertexAttributeSemantic {
    /// Stable index used to match attributes against shader inputs.
    pub fn index(&self) -> u32 {
        match self {
            Self::Position => 0,
            Self::Normal => 1,
            Self::TexCoord0 => 2,
        }
    }
}

/// Component layout of one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttributeFormat {
    /// One 32-bit float.
    Float,
    /// Two 32-bit floats.
    Float2,
    /// Three 32-bit floats.
    Float3,
    /// Four 32-bit floats.
    Float4,
}

impl VertexAttributeFormat {
    /// Size of one element in bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::Float => 4,
            Self::Float2 => 8,
            Self::Float3 => 12,
            Self::Float4 => 16,
        }
    }
}

/// One vertex buffer binding: just its stride, since streams are not
/// interleaved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexBufferLayout {
    /// Distance in bytes between consecutive vertices.
    pub stride: u32,
}

impl VertexBufferLayout {
    /// A buffer binding with the given stride.
    pub fn new(stride: u32) -> Self {
        Self { stride }
    }
}

/// One attribute and where it reads from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    /// Shader-facing meaning.
    pub semantic: VertexAttributeSemantic,
    /// Component layout.
    pub format: VertexAttributeFormat,
    /// Byte offset within one vertex of the source buffer.
    pub offset: u32,
    /// Which buffer slot the attribute reads from.
    pub buffer_index: u32,
}

impl VertexAttribute {
    /// Describe an attribute reading from `buffer_index` at `offset`.
    pub fn new(
        semantic: VertexAttributeSemantic,
        format: VertexAttributeFormat,
        offset: u32,
        buffer_index: u32,
    ) -> Self {
        Self {
            semantic,
            format,
            offset,
            buffer_index,
        }
    }

    /// Float3 position attribute at buffer slot 0.
    pub fn position(offset: u32) -> Self {
        Self::new(
            VertexAttributeSemantic::Position,
            VertexAttributeFormat::Float3,
            offset,
            0,
        )
    }

    /// Float3 normal attribute at buffer slot 0.
    pub fn normal(offset: u32) -> Self {
        Self::new(
            VertexAttributeSemantic::Normal,
            VertexAttributeFormat::Float3,
            offset,
            0,
        )
    }

    /// Float2 texcoord attribute at buffer slot 0.
    pub fn texcoord0(offset: u32) -> Self {
        Self::new(
            VertexAttributeSemantic::TexCoord0,
            VertexAttributeFormat::Float2,
            offset,
            0,
        )
    }

    /// Move the attribute to another buffer slot.
    #[must_use]
    pub fn at_buffer(mut self, buffer_index: u32) -> Self {
        self.buffer_index = buffer_index;
        self
    }
}

/// The vertex buffers of a mesh and the attribute each one feeds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexLayout {
    /// Buffer bindings in slot order.
    pub buffers: Vec<VertexBufferLayout>,
    /// Attributes, each naming its source buffer slot.
    pub attributes: Vec<VertexAttribute>,
    /// Debug label.
    pub label: Option<String>,
}

impl VertexLayout {
    /// An empty layout to build on.
    pub fn new() -> Self {
        Self {
            buffers: Vec::new(),
            attributes: Vec::new(),
            label: None,
        }
    }

    /// Append a buffer binding at the next slot.
    #[must_use]
    pub fn with_buffer(mut self, buffer: VertexBufferLayout) -> Self {
        self.buffers.push(buffer);
        self
    }

    /// Append an attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: VertexAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Attach a debug label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Number of buffer slots a mesh with this layout binds.
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Stride of the buffer at `buffer_index`, or 0 for an unknown slot.
    pub fn buffer_stride(&self, buffer_index: usize) -> u32 {
        self.buffers
            .get(buffer_index)
            .map(|b| b.stride)
            .unwrap_or(0)
    }

    /// Find the attribute carrying `semantic`, if the layout has one.
    pub fn get_attribute(&self, semantic: VertexAttributeSemantic) -> Option<&VertexAttribute> {
        self.attributes
            .iter()
            .find(|attr| attr.semantic == semantic)
    }

    /// Check that every attribute reads from a declared buffer slot.
    pub fn validate(&self) -> Result<(), GraphicsError> {
        for attr in &self.attributes {
            if attr.buffer_index as usize >= self.buffers.len() {
                return Err(GraphicsError::InvalidParameter(format!(
                    "attribute {:?} reads buffer slot {} but the layout declares {}",
                    attr.semantic,
                    attr.buffer_index,
                    self.buffers.len()
                )));
            }
        }
        Ok(())
    }

    /// The layout the model loader uploads: one stream per attribute.
    ///
    /// - Slot 0, stride 12: position
    /// - Slot 1, stride 12: normal
    /// - Slot 2, stride 8: texcoord
    pub fn separate_streams() -> Arc<Self> {
        Arc::new(
            Self::new()
                .with_buffer(VertexBufferLayout::new(12))
                .with_buffer(VertexBufferLayout::new(12))
                .with_buffer(VertexBufferLayout::new(8))
                .with_attribute(VertexAttribute::position(0).at_buffer(0))
                .with_attribute(VertexAttribute::normal(0).at_buffer(1))
                .with_attribute(VertexAttribute::texcoord0(0).at_buffer(2))
                .with_label("separate_streams"),
        )
    }
}

impl Default for VertexLayout {
    fn default() -> Self {
        Self::new()
    }
}
