//! Buffer descriptors and usage flags.

use bitflags::bitflags;

bitflags! {
    /// Declares how a buffer may be bound or copied.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BufferUsage: u32 {
        /// Bindable as a vertex stream.
        const VERTEX = 1 << 0;
        /// Bindable as an index buffer.
        const INDEX = 1 << 1;
        /// Source of a copy operation.
        const COPY_SRC = 1 << 2;
        /// Destination of a copy operation (required for uploads).
        const COPY_DST = 1 << 3;
    }
}

impl Default for BufferUsage {
    fn default() -> Self {
        Self::empty()
    }
}

/// Everything needed to create a buffer: size, usage and an optional label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BufferDescriptor {
    /// Debug label, forwarded to the backend.
    pub label: Option<String>,
    /// Size in bytes. Must be nonzero.
    pub size: u64,
    /// Usage flags.
    pub usage: BufferUsage,
}

impl BufferDescriptor {
    /// Describe an unlabeled buffer of `size` bytes.
    pub fn new(size: u64, usage: BufferUsage) -> Self {
        Self {
            label: None,
            size,
            usage,
        }
    }

    /// Attach a debug label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_builder() {
        let desc = BufferDescriptor::new(256, BufferUsage::INDEX | BufferUsage::COPY_DST)
            .with_label("indices");
        assert_eq!(desc.size, 256);
        assert!(desc.usage.contains(BufferUsage::INDEX));
        assert!(!desc.usage.contains(BufferUsage::VERTEX));
        assert_eq!(desc.label.as_deref(), Some("indices"));
    }
}
