//! # Art Loading Boundary
//!
//! The renderer never decodes images. It asks an [`ArtLoader`] for a texture
//! and polls the answer once per frame while the scene is building:
//!
//! ```text
//! CardScene ──ArtRequest──▶ ArtLoader (host cache, worker, ...)
//!     ▲                          │
//!     └──── ArtPending ◀─────────┘   crossbeam channel, capacity 1
//! ```
//!
//! Dropping the [`ArtPending`] cancels the request: the loader's `send`
//! fails and it keeps ownership of whatever it produced.

use std::fmt;

use cardglow_core::{Card, SizePreset, TextureId};
use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};

use crate::error::{AssetError, AssetResult};

/// Suffix of the reduced art variant.
const THUMB_SUFFIX: &str = ".thumb.webp";
/// Suffix of the full art variant.
const FULL_SUFFIX: &str = ".webp";

/// A texture the loader produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtTexture {
    /// Host texture handle.
    pub id: TextureId,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
}

/// One art request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtRequest {
    /// Asset path.
    pub path: String,
    /// Size preset the art is for.
    pub size: SizePreset,
}

/// Answer to an [`ArtRequest`], possibly still in flight.
#[derive(Debug)]
pub struct ArtPending {
    rx: Receiver<AssetResult<ArtTexture>>,
}

impl ArtPending {
    /// Creates a request channel. The loader keeps the sender.
    #[must_use]
    pub fn channel() -> (Sender<AssetResult<ArtTexture>>, Self) {
        let (tx, rx) = bounded(1);
        (tx, Self { rx })
    }

    /// An already answered request (cache hits, synchronous loaders).
    #[must_use]
    pub fn ready(result: AssetResult<ArtTexture>) -> Self {
        let (tx, pending) = Self::channel();
        // Capacity 1 and the receiver is alive, so this cannot fail.
        let _ = tx.send(result);
        pending
    }

    /// Non-blocking poll. `None` while the load is still running.
    ///
    /// A loader that drops its sender without answering reports
    /// [`AssetError::Disconnected`].
    #[must_use]
    pub fn poll(&self) -> Option<AssetResult<ArtTexture>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(AssetError::Disconnected)),
        }
    }
}

/// Host-side texture source.
pub trait ArtLoader: fmt::Debug {
    /// Starts loading. Must not block.
    fn load(&self, request: &ArtRequest) -> ArtPending;

    /// Returns a texture the renderer no longer uses.
    fn release(&self, texture: TextureId);
}

/// Path of the art for `card` at `size`.
///
/// Small and normal cards use the reduced variant, large and x-large the
/// full one. Facedown cards show `back_override` or else `card_back`.
#[must_use]
pub fn art_path(card: &Card, size: SizePreset, back_override: Option<&str>, card_back: &str) -> String {
    if card.facedown {
        return back_override.unwrap_or(card_back).to_string();
    }
    let suffix = if size.wants_full_art() { FULL_SUFFIX } else { THUMB_SUFFIX };
    format!("{}{suffix}", card.art)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardglow_core::CardType;

    fn card() -> Card {
        Card::new("c", "Troll", "brobnar", CardType::Creature, "cards/troll")
    }

    #[test]
    fn test_variant_by_size() {
        assert_eq!(art_path(&card(), SizePreset::Small, None, "back"), "cards/troll.thumb.webp");
        assert_eq!(art_path(&card(), SizePreset::Normal, None, "back"), "cards/troll.thumb.webp");
        assert_eq!(art_path(&card(), SizePreset::Large, None, "back"), "cards/troll.webp");
        assert_eq!(art_path(&card(), SizePreset::XLarge, None, "back"), "cards/troll.webp");
    }

    #[test]
    fn test_facedown_back() {
        let hidden = card().facedown();
        assert_eq!(art_path(&hidden, SizePreset::Large, None, "img/back.webp"), "img/back.webp");
        assert_eq!(art_path(&hidden, SizePreset::Large, Some("custom.png"), "img/back.webp"), "custom.png");
    }

    #[test]
    fn test_pending_states() {
        let (tx, pending) = ArtPending::channel();
        assert!(pending.poll().is_none());

        let texture = ArtTexture { id: TextureId(3), width: 150, height: 210 };
        tx.send(Ok(texture)).expect("receiver alive");
        assert_eq!(pending.poll(), Some(Ok(texture)));

        drop(tx);
        assert_eq!(pending.poll(), Some(Err(AssetError::Disconnected)));
    }

    #[test]
    fn test_dropping_pending_cancels() {
        let (tx, pending) = ArtPending::channel();
        drop(pending);
        assert!(tx.send(Err(AssetError::NotFound("x".into()))).is_err());
    }
}
