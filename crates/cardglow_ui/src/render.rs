//! Draw commands and the fixed layer stack.
//!
//! A card is a [`DrawList`]: at most one [`Layer`] per [`LayerKind`], always
//! kept in z-order. The host compositor walks the visible layers bottom to
//! top and applies the list's transform to the whole stack.

use cardglow_core::{Rect, TextureId};

use crate::style::Color;
use crate::transform::SceneTransform;

/// A render command for one layer.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle.
    Rect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
        /// Corner radius.
        corner_radius: f32,
    },
    /// Rectangle outline.
    RectOutline {
        /// Bounds.
        bounds: Rect,
        /// Stroke color.
        color: Color,
        /// Line width.
        width: f32,
        /// Corner radius.
        corner_radius: f32,
    },
    /// Filled circle.
    Circle {
        /// Center (x, y).
        center: [f32; 2],
        /// Radius.
        radius: f32,
        /// Fill color.
        color: Color,
    },
    /// Text centered on `(x, y)`.
    Text {
        /// Text content.
        text: String,
        /// X position.
        x: f32,
        /// Y position.
        y: f32,
        /// Fill color.
        color: Color,
        /// Font size.
        font_size: f32,
        /// Bold weight.
        bold: bool,
        /// Outline color and width.
        stroke: Option<(Color, f32)>,
    },
    /// Textured quad, optionally run through the shimmer pass.
    Sprite {
        /// Bounds.
        bounds: Rect,
        /// Texture handle.
        texture: TextureId,
        /// Shimmer attached.
        shimmer: bool,
    },
    /// Rounded clip applied to every layer below.
    Mask {
        /// Clip bounds.
        bounds: Rect,
        /// Corner radius.
        corner_radius: f32,
    },
    /// Single symbol, centered.
    Glyph {
        /// Symbol.
        glyph: char,
        /// Center (x, y).
        center: [f32; 2],
        /// Glyph size.
        size: f32,
        /// Fill color.
        color: Color,
    },
}

/// Position of a layer in the stack. Declaration order is z-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerKind {
    /// Offset drop shadow.
    Shadow,
    /// Frame fill, border and premium glow.
    BaseFrame,
    /// Art sprite or fallback panel.
    Art,
    /// Rounded clip.
    Mask,
    /// House-tinted name band.
    Overlay,
    /// Card name.
    Text,
    /// Power and armor.
    Stats,
    /// Particles.
    Effect,
    /// Token discs.
    Token,
    /// Hover wash.
    InteractionHighlight,
}

impl LayerKind {
    /// Every kind, bottom to top.
    pub const ORDER: [Self; 10] = [
        Self::Shadow,
        Self::BaseFrame,
        Self::Art,
        Self::Mask,
        Self::Overlay,
        Self::Text,
        Self::Stats,
        Self::Effect,
        Self::Token,
        Self::InteractionHighlight,
    ];

    /// Stack index, 0 is the bottom.
    #[must_use]
    pub const fn z(self) -> u8 {
        self as u8
    }

    /// Stable name for logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Shadow => "shadow",
            Self::BaseFrame => "base-frame",
            Self::Art => "art",
            Self::Mask => "mask",
            Self::Overlay => "overlay",
            Self::Text => "text",
            Self::Stats => "stats",
            Self::Effect => "effect",
            Self::Token => "token",
            Self::InteractionHighlight => "interaction-highlight",
        }
    }
}

/// One layer of the stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Slot in the stack.
    pub kind: LayerKind,
    /// Commands, drawn in order.
    pub commands: Vec<DrawCommand>,
    /// Whether the compositor draws it this frame.
    pub visible: bool,
}

impl Layer {
    /// Creates a visible layer.
    #[must_use]
    pub fn new(kind: LayerKind, commands: Vec<DrawCommand>) -> Self {
        Self {
            kind,
            commands,
            visible: true,
        }
    }

    /// Creates a layer that starts hidden.
    #[must_use]
    pub fn hidden(kind: LayerKind, commands: Vec<DrawCommand>) -> Self {
        Self {
            visible: false,
            ..Self::new(kind, commands)
        }
    }

    /// Packs every circle command for instanced drawing.
    #[must_use]
    pub fn circle_instances(&self) -> Vec<CircleInstance> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Circle { center, radius, color } => Some(CircleInstance {
                    center: *center,
                    radius: *radius,
                    _pad: 0.0,
                    color: color.to_array(),
                }),
                _ => None,
            })
            .collect()
    }
}

/// GPU instance for particle circles.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CircleInstance {
    /// Center (x, y).
    pub center: [f32; 2],
    /// Radius.
    pub radius: f32,
    _pad: f32,
    /// Color (RGBA).
    pub color: [f32; 4],
}

/// The frame output for one card: ordered layers plus the stack transform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    layers: Vec<Layer>,
    /// Transform applied to the whole stack.
    pub transform: SceneTransform,
}

impl DrawList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            layers: Vec::with_capacity(LayerKind::ORDER.len()),
            transform: SceneTransform::default(),
        }
    }

    /// Inserts `layer` at its z-position, replacing a layer of the same kind.
    pub fn set(&mut self, layer: Layer) {
        match self.layers.binary_search_by_key(&layer.kind, |l| l.kind) {
            Ok(index) => self.layers[index] = layer,
            Err(index) => self.layers.insert(index, layer),
        }
    }

    /// Returns the layer of `kind`.
    #[must_use]
    pub fn get(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    /// Returns the layer of `kind` mutably.
    pub fn get_mut(&mut self, kind: LayerKind) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.kind == kind)
    }

    /// Returns true if a layer of `kind` is present.
    #[must_use]
    pub fn contains(&self, kind: LayerKind) -> bool {
        self.get(kind).is_some()
    }

    /// All layers, bottom to top.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Kinds present, bottom to top.
    pub fn kinds(&self) -> impl Iterator<Item = LayerKind> + '_ {
        self.layers.iter().map(|layer| layer.kind)
    }

    /// Layers the compositor should draw.
    pub fn visible(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|layer| layer.visible)
    }

    /// Drops every layer and resets the transform.
    pub fn clear(&mut self) {
        self.layers.clear();
        self.transform = SceneTransform::default();
    }

    /// Returns true if there are no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_layer(kind: LayerKind) -> Layer {
        Layer::new(
            kind,
            vec![DrawCommand::Rect {
                bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
                color: Color::WHITE,
                corner_radius: 0.0,
            }],
        )
    }

    #[test]
    fn test_order_matches_declaration() {
        for pair in LayerKind::ORDER.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].z() + 1, pair[1].z());
        }
    }

    #[test]
    fn test_set_keeps_z_order() {
        let mut list = DrawList::new();
        list.set(rect_layer(LayerKind::Token));
        list.set(rect_layer(LayerKind::Shadow));
        list.set(rect_layer(LayerKind::Art));
        list.set(rect_layer(LayerKind::Art));

        let kinds: Vec<_> = list.kinds().collect();
        assert_eq!(kinds, vec![LayerKind::Shadow, LayerKind::Art, LayerKind::Token]);
    }

    #[test]
    fn test_hidden_layers_not_drawn() {
        let mut list = DrawList::new();
        list.set(rect_layer(LayerKind::BaseFrame));
        list.set(Layer::hidden(LayerKind::InteractionHighlight, rect_layer(LayerKind::Shadow).commands));
        assert_eq!(list.visible().count(), 1);

        if let Some(layer) = list.get_mut(LayerKind::InteractionHighlight) {
            layer.visible = true;
        }
        assert_eq!(list.visible().count(), 2);

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_circle_instances() {
        let layer = Layer::new(
            LayerKind::Effect,
            vec![
                DrawCommand::Circle { center: [1.0, 2.0], radius: 3.0, color: Color::WHITE },
                DrawCommand::Mask { bounds: Rect::ZERO, corner_radius: 0.0 },
            ],
        );
        let instances = layer.circle_instances();
        assert_eq!(instances.len(), 1);
        assert_eq!(std::mem::size_of::<CircleInstance>(), 32);
        assert!((bytemuck::cast_slice::<CircleInstance, f32>(&instances)[2] - 3.0).abs() < f32::EPSILON);
    }
}
