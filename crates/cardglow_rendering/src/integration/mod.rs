//! # Frame Integration
//!
//! The [`RenderLoop`] is the single per-frame entry point. Cards register a
//! [`FrameTarget`]; the host calls [`RenderLoop::tick`] from its display
//! callback.

mod render_loop;

pub use render_loop::{
    FrameContext, FrameResult, FrameTarget, Registrar, RenderLoop, RenderLoopConfig,
    RenderLoopStats, TargetId,
};
