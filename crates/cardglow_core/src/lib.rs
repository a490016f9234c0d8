//! # CARDGLOW Core
//!
//! Shared data model for the card renderer:
//! - The [`Card`] record supplied by the game-state collaborator
//! - The fixed [`SizePreset`] table and its [`SizeProfile`]s
//! - [`Rgb`] colors and per-house [`HouseTheme`]s
//! - [`Rect`] geometry
//! - [`FreeList`], the index pool behind particle emitters
//!
//! Nothing in here touches the GPU or the clock.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod card;
pub mod color;
pub mod error;
pub mod geometry;
pub mod memory;
pub mod size;
pub mod texture;
pub mod theme;

pub use card::{Card, CardId, CardType, Orientation, TokenCounts};
pub use color::Rgb;
pub use error::{CoreError, CoreResult};
pub use geometry::Rect;
pub use memory::FreeList;
pub use size::{SizePreset, SizeProfile};
pub use texture::TextureId;
pub use theme::HouseTheme;
