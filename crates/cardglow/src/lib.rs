//! # CARDGLOW
//!
//! Real-time card rendering for a digital card game client.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        CARD SURFACE                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Card + CardOptions → CardSurface::mount                      │
//! │         ↓                                                     │
//! │  CardScene (Building → Ready | ReadyFallback → Destroyed)     │
//! │         ↓               ↑ art load (crossbeam channel)        │
//! │  RenderLoop::tick → effect → transform → particles            │
//! │         ↓                                                     │
//! │  DrawList → host compositor                                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let config = RendererConfig::from_toml_file("cardglow.toml")?;
//! let context = RendererContext::new(config, loader, effects);
//! let render_loop = RenderLoop::shared();
//! let mut surface = CardSurface::mount(&context, &render_loop, card, CardOptions::default());
//!
//! // every display frame
//! render_loop.borrow_mut().tick(delta);
//! compositor.draw(&surface.draw_list());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod assets;
pub mod config;
pub mod context;
pub mod error;
pub mod scene;
pub mod surface;

pub use assets::{art_path, ArtLoader, ArtPending, ArtRequest, ArtTexture};
pub use config::RendererConfig;
pub use context::RendererContext;
pub use error::{AssetError, AssetResult, ConfigError, ConfigResult};
pub use scene::{CardOptions, CardScene, SceneState};
pub use surface::{CardSurface, HoverInfo, SurfaceEvent, SurfaceSize};

pub use cardglow_core::{Card, CardId, CardType, Orientation, SizePreset};
pub use cardglow_rendering::{EffectFactory, NoopEffectFactory, RenderLoop};
pub use cardglow_ui::{DrawList, PointerEvent};
