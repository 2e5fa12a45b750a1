//! Renderable mesh with GPU buffers and material textures.
//!
//! A [`RenderObject`] owns the GPU side of one mesh: an index buffer, one
//! vertex buffer per attribute stream, and the material textures resolved
//! through a [`ResourceCache`]. [`RenderObject::build`] uploads everything
//! once; [`RenderObject::render`] records the bind and draw commands into a
//! [`RenderPass`].

use std::sync::Arc;

use whirligig_core::mesh::MeshData;

use crate::cache::ResourceCache;
use crate::device::GraphicsDevice;
use crate::error::GraphicsError;
use crate::mesh::VertexLayout;
use crate::pass::{IndexFormat, RenderPass};
use crate::resources::{Buffer, Texture};
use crate::types::{BufferDescriptor, BufferUsage};

/// Material texture slots bound by a [`RenderObject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialSlot {
    /// Diffuse color map (sRGB).
    Diffuse,
    /// Specular map. May be unbound.
    Specular,
    /// Normal map (linear).
    Normal,
}

impl MaterialSlot {
    /// All slots in binding order.
    pub const ALL: [MaterialSlot; 3] = [Self::Diffuse, Self::Specular, Self::Normal];

    /// Get the binding slot index.
    pub fn index(&self) -> u32 {
        match self {
            Self::Diffuse => 0,
            Self::Specular => 1,
            Self::Normal => 2,
        }
    }
}

/// A mesh uploaded to the GPU together with its material textures.
///
/// The vertex data is split into one stream buffer per attribute following
/// [`VertexLayout::separate_streams`]: positions, normals and texcoords each
/// get their own buffer. Indices are always 32-bit.
///
/// # Example
///
/// ```ignore
/// let mesh = generate_cube(1.0);
/// let object = RenderObject::build(
///     &device,
///     &cache,
///     &mesh,
///     "WindMill_Diff.png",
///     "WindMill_Normal.png",
/// )?;
///
/// let mut pass = RenderPass::new("opaque");
/// object.render(&mut pass);
/// ```
pub struct RenderObject {
    layout: Arc<VertexLayout>,
    vertex_buffers: Vec<Arc<Buffer>>,
    index_buffer: Arc<Buffer>,
    index_count: u32,
    vertex_count: u32,
    textures: [Option<Arc<Texture>>; 3],
    label: Option<String>,
}

impl RenderObject {
    /// Upload a mesh and its material textures to the GPU.
    ///
    /// The diffuse map is loaded as sRGB, the normal map as linear data.
    /// Both go through `cache`, so objects sharing texture paths share GPU
    /// textures. A texture that cannot be resolved or decoded fails the
    /// whole build.
    ///
    /// # Errors
    ///
    /// Returns an error if either texture fails to load or any GPU
    /// allocation fails.
    pub fn build(
        device: &Arc<GraphicsDevice>,
        cache: &ResourceCache,
        mesh: &MeshData,
        diffuse_path: &str,
        normal_path: &str,
    ) -> Result<Self, GraphicsError> {
        let diffuse = cache.get_or_load(device, diffuse_path, true)?;
        let normal = cache.get_or_load(device, normal_path, false)?;

        let layout = VertexLayout::separate_streams();
        let prefix = mesh.label().unwrap_or("mesh");

        let streams: [(&str, &[u8]); 3] = [
            ("positions", mesh.position_bytes()),
            ("normals", mesh.normal_bytes()),
            ("texcoords", mesh.texcoord_bytes()),
        ];

        let mut vertex_buffers = Vec::with_capacity(streams.len());
        for (name, bytes) in streams {
            let descriptor =
                BufferDescriptor::new(bytes.len() as u64, BufferUsage::VERTEX | BufferUsage::COPY_DST)
                    .with_label(format!("{prefix}.{name}"));
            vertex_buffers.push(device.create_buffer_with_data(&descriptor, bytes)?);
        }
        debug_assert_eq!(vertex_buffers.len(), layout.buffer_count());

        let index_bytes = mesh.index_bytes();
        let index_descriptor =
            BufferDescriptor::new(index_bytes.len() as u64, BufferUsage::INDEX | BufferUsage::COPY_DST)
                .with_label(format!("{prefix}.indices"));
        let index_buffer = device.create_buffer_with_data(&index_descriptor, index_bytes)?;

        log::debug!(
            "RenderObject '{prefix}': {} vertices, {} faces",
            mesh.vertex_count(),
            mesh.face_count()
        );

        Ok(Self {
            layout,
            vertex_buffers,
            index_buffer,
            index_count: mesh.index_count(),
            vertex_count: mesh.vertex_count(),
            textures: [Some(diffuse), None, Some(normal)],
            label: mesh.label().map(str::to_string),
        })
    }

    /// Record the bind and draw commands for this object.
    ///
    /// Binds the index buffer, every vertex stream in slot order, and all
    /// material slots (unbound slots are cleared), then issues one indexed
    /// draw covering the whole mesh.
    pub fn render(&self, pass: &mut RenderPass) {
        pass.set_index_buffer(self.index_buffer.clone(), IndexFormat::Uint32);
        for (slot, buffer) in self.vertex_buffers.iter().enumerate() {
            pass.set_vertex_buffer(slot as u32, buffer.clone());
        }
        for slot in MaterialSlot::ALL {
            pass.set_texture(slot.index(), self.texture(slot).cloned());
        }
        pass.draw_indexed(self.index_count, 0, 0);
    }

    /// Get the vertex layout.
    pub fn layout(&self) -> &Arc<VertexLayout> {
        &self.layout
    }

    /// Get the vertex stream buffers, one per layout buffer.
    pub fn vertex_buffers(&self) -> &[Arc<Buffer>] {
        &self.vertex_buffers
    }

    /// Get the index buffer.
    pub fn index_buffer(&self) -> &Arc<Buffer> {
        &self.index_buffer
    }

    /// Get the number of indices drawn.
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Get the number of triangles drawn.
    pub fn face_count(&self) -> u32 {
        self.index_count / 3
    }

    /// Get the number of vertices in each stream.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Get the texture bound to a material slot, if any.
    pub fn texture(&self, slot: MaterialSlot) -> Option<&Arc<Texture>> {
        self.textures[slot.index() as usize].as_ref()
    }

    /// Get the object label, if set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl std::fmt::Debug for RenderObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderObject")
            .field("label", &self.label)
            .field("vertex_count", &self.vertex_count)
            .field("index_count", &self.index_count)
            .field("streams", &self.vertex_buffers.len())
            .finish()
    }
}

// Ensure RenderObject is Send + Sync
static_assertions::assert_impl_all!(RenderObject: Send, Sync);
