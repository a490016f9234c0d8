//! GPU texture handles.

/// Opaque handle to a texture owned by the host's asset cache.
///
/// The renderer never frees texture memory itself; it hands the handle back
/// to the loader that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);
