//! Render pass command recording.
//!
//! A [`RenderPass`] records a flat list of [`RenderCommand`]s: bind index and
//! vertex buffers, bind textures to material slots, then issue indexed draws.
//! The recorded list can be inspected, replayed by a backend, or dropped.
//!
//! # Example
//!
//! ```ignore
//! let mut pass = RenderPass::new("opaque");
//! object.render(&mut pass);
//! assert_eq!(pass.draw_count(), 1);
//! ```

use std::sync::Arc;

use crate::resources::{Buffer, Texture};

/// Format of index buffer data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexFormat {
    /// 16-bit unsigned indices.
    Uint16,
    /// 32-bit unsigned indices.
    #[default]
    Uint32,
}

impl IndexFormat {
    /// Get the size in bytes of one index.
    pub fn size(&self) -> usize {
        match self {
            Self::Uint16 => 2,
            Self::Uint32 => 4,
        }
    }
}

/// A single recorded rendering command.
#[derive(Debug, Clone)]
pub enum RenderCommand {
    /// Bind the index buffer for subsequent indexed draws.
    SetIndexBuffer {
        buffer: Arc<Buffer>,
        format: IndexFormat,
    },
    /// Bind a vertex buffer to a stream slot.
    SetVertexBuffer { slot: u32, buffer: Arc<Buffer> },
    /// Bind a texture to a material slot. `None` clears the slot.
    SetTexture {
        slot: u32,
        texture: Option<Arc<Texture>>,
    },
    /// Draw indexed geometry using the currently bound buffers.
    DrawIndexed {
        index_count: u32,
        first_index: u32,
        base_vertex: i32,
    },
}

/// Records rendering commands for later submission.
///
/// Commands are appended in order and kept until [`RenderPass::clear`] is
/// called. Buffers and textures are retained by `Arc`, so recorded resources
/// stay alive for the lifetime of the pass.
pub struct RenderPass {
    name: String,
    commands: Vec<RenderCommand>,
}

impl RenderPass {
    /// Create a new empty render pass.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
        }
    }

    /// Get the pass name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bind an index buffer.
    pub fn set_index_buffer(&mut self, buffer: Arc<Buffer>, format: IndexFormat) {
        self.commands
            .push(RenderCommand::SetIndexBuffer { buffer, format });
    }

    /// Bind a vertex buffer to a stream slot.
    pub fn set_vertex_buffer(&mut self, slot: u32, buffer: Arc<Buffer>) {
        self.commands
            .push(RenderCommand::SetVertexBuffer { slot, buffer });
    }

    /// Bind a texture to a material slot. Pass `None` to clear the slot.
    pub fn set_texture(&mut self, slot: u32, texture: Option<Arc<Texture>>) {
        self.commands
            .push(RenderCommand::SetTexture { slot, texture });
    }

    /// Record an indexed draw.
    pub fn draw_indexed(&mut self, index_count: u32, first_index: u32, base_vertex: i32) {
        self.commands.push(RenderCommand::DrawIndexed {
            index_count,
            first_index,
            base_vertex,
        });
    }

    /// Get the recorded commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Get the number of recorded draw calls.
    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawIndexed { .. }))
            .count()
    }

    /// Discard all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl std::fmt::Debug for RenderPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderPass")
            .field("name", &self.name)
            .field("commands", &self.commands.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::GpuBuffer;
    use crate::types::{BufferDescriptor, BufferUsage};
    use std::sync::Weak;

    fn make_buffer(size: u64, usage: BufferUsage) -> Arc<Buffer> {
        Arc::new(Buffer::new(
            Weak::new(),
            BufferDescriptor::new(size, usage),
            GpuBuffer::Dummy,
        ))
    }

    #[test]
    fn test_index_format_size() {
        assert_eq!(IndexFormat::Uint16.size(), 2);
        assert_eq!(IndexFormat::Uint32.size(), 4);
    }

    #[test]
    fn test_record_commands() {
        let mut pass = RenderPass::new("test");
        assert_eq!(pass.name(), "test");

        pass.set_index_buffer(make_buffer(24, BufferUsage::INDEX), IndexFormat::Uint32);
        pass.set_vertex_buffer(0, make_buffer(48, BufferUsage::VERTEX));
        pass.set_texture(0, None);
        pass.draw_indexed(6, 0, 0);

        assert_eq!(pass.commands().len(), 4);
        assert!(matches!(
            pass.commands()[3],
            RenderCommand::DrawIndexed {
                index_count: 6,
                first_index: 0,
                base_vertex: 0,
            }
        ));
    }

    #[test]
    fn test_draw_count() {
        let mut pass = RenderPass::new("draws");
        pass.draw_indexed(6, 0, 0);
        pass.draw_indexed(36, 0, 0);
        pass.set_texture(1, None);
        assert_eq!(pass.draw_count(), 2);
    }

    #[test]
    fn test_clear() {
        let mut pass = RenderPass::new("clear");
        pass.draw_indexed(3, 0, 0);
        assert_eq!(pass.commands().len(), 1);
        pass.clear();
        assert!(pass.commands().is_empty());
        assert_eq!(pass.draw_count(), 0);
    }
}
