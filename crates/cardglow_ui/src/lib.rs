//! # CARDGLOW UI
//!
//! Turns one card into a stack of z-ordered layers:
//! - Draw commands the host compositor understands
//! - Pure layer builders (frame, stats, tokens, fallback, chrome)
//! - Pointer state and the tilt / idle transform
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                    LAYER PIPELINE                       │
//! ├────────────────────────────────────────────────────────┤
//! │  Card + SizeProfile + Theme → Builders → Layers        │
//! │                                            ↓           │
//! │  Pointer Events → PointerState → SceneTransform        │
//! │                                            ↓           │
//! │                                      DrawList (host)   │
//! └────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod builders;
pub mod input;
pub mod render;
pub mod style;
pub mod transform;

pub use builders::{BuildContext, TokenKind, TokenSlot};
pub use input::{PointerEvent, PointerState};
pub use render::{CircleInstance, DrawCommand, DrawList, Layer, LayerKind};
pub use style::Color;
pub use transform::{SceneTransform, TiltSettings};
