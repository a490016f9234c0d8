//! Pointer input for a single card surface.
//!
//! Coordinates are normalized to the card bounds, `(0, 0)` top-left and
//! `(1, 1)` bottom-right. The latest event wins; nothing is queued.

/// Pointer event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer entered the card.
    Enter,
    /// Pointer moved within the card (normalized).
    Move {
        /// Horizontal position (0-1).
        x: f32,
        /// Vertical position (0-1).
        y: f32,
    },
    /// Pointer left the card.
    Leave,
    /// Primary button click.
    Click,
}

/// Last known pointer state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    x: f32,
    y: f32,
    hovered: bool,
}

impl PointerState {
    /// Centered, not hovered.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            x: 0.5,
            y: 0.5,
            hovered: false,
        }
    }

    /// Applies an event. Returns true if position or hover changed.
    ///
    /// A move implies hover. Non-finite coordinates are ignored; the rest are
    /// clamped into the card.
    pub fn apply(&mut self, event: PointerEvent) -> bool {
        let before = *self;
        match event {
            PointerEvent::Enter => self.hovered = true,
            PointerEvent::Leave => self.hovered = false,
            PointerEvent::Move { x, y } => {
                if x.is_finite() && y.is_finite() {
                    self.x = x.clamp(0.0, 1.0);
                    self.y = y.clamp(0.0, 1.0);
                    self.hovered = true;
                }
            }
            PointerEvent::Click => {}
        }
        *self != before
    }

    /// Normalized position.
    #[must_use]
    pub const fn position(&self) -> [f32; 2] {
        [self.x, self.y]
    }

    /// Offset from center, each axis in `[-0.5, 0.5]`.
    #[must_use]
    pub fn offset(&self) -> (f32, f32) {
        (self.x - 0.5, self.y - 0.5)
    }

    /// Whether the pointer is over the card.
    #[must_use]
    pub const fn is_hovered(&self) -> bool {
        self.hovered
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}
