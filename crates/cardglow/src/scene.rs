//! # Card Scene
//!
//! Per-card composition root. Owns the layer stack, the art texture, the
//! shimmer effect, the particle emitter and the transform.
//!
//! ```text
//!            art ok ┌────────┐
//!         ┌────────▶│ Ready  │────┐
//! ┌───────┴──┐      └────────┘    │ destroy
//! │ Building │                    ├────────▶ Destroyed
//! └───────┬──┘      ┌──────────────┐
//!         └────────▶│ReadyFallback │┘
//!          art err  └──────────────┘
//! ```
//!
//! A scene is never mutated into a different card: the surface destroys it
//! and builds a new one when the card, size or premium flag changes.

use std::rc::Rc;

use cardglow_core::{Card, HouseTheme, Orientation, SizePreset, SizeProfile, TextureId};
use cardglow_rendering::{EffectHandle, FrameContext, FrameTarget, ParticleEmitter};
use cardglow_ui::builders::{self, BuildContext};
use cardglow_ui::{
    Color, DrawCommand, DrawList, Layer, LayerKind, PointerEvent, PointerState, SceneTransform,
};
use tracing::{debug, warn};

use crate::assets::{art_path, ArtPending, ArtRequest, ArtTexture};
use crate::context::RendererContext;

/// Emitter anchor as fractions of card width / height.
const EMITTER_ANCHOR: (f32, f32) = (0.5, 0.75);

/// Lifecycle of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    /// Waiting for art.
    Building,
    /// Art loaded, every layer assembled.
    Ready,
    /// Art failed; fallback panel shown, premium layers skipped.
    ReadyFallback,
    /// Torn down; holds no resources.
    Destroyed,
}

/// How a card is presented.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardOptions {
    /// Size preset.
    pub size: SizePreset,
    /// Premium (foil) variant: glow, shimmer and particles.
    pub premium: bool,
    /// Normal or exhausted (sideways).
    pub orientation: Orientation,
    /// Suppresses clicks and the hover highlight.
    pub disabled: bool,
    /// Art path for the facedown side instead of the configured back.
    pub back_override: Option<String>,
}

impl CardOptions {
    /// Sets the size preset.
    #[must_use]
    pub fn with_size(mut self, size: SizePreset) -> Self {
        self.size = size;
        self
    }

    /// Marks the card premium.
    #[must_use]
    pub fn premium(mut self) -> Self {
        self.premium = true;
        self
    }

    /// Sets the orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Marks the card disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Sets the facedown art path.
    #[must_use]
    pub fn with_back(mut self, path: impl Into<String>) -> Self {
        self.back_override = Some(path.into());
        self
    }

    /// Returns true if changing from `self` to `other` needs a new scene.
    #[must_use]
    pub fn needs_rebuild(&self, other: &Self) -> bool {
        self.size != other.size
            || self.premium != other.premium
            || self.back_override != other.back_override
    }
}

/// One card's scene graph and per-frame state.
#[derive(Debug)]
pub struct CardScene {
    context: Rc<RendererContext>,
    card: Card,
    options: CardOptions,
    profile: SizeProfile,
    theme: HouseTheme,
    state: SceneState,
    layers: DrawList,
    pending: Option<ArtPending>,
    texture: Option<TextureId>,
    effect: Option<Box<dyn EffectHandle>>,
    emitter: Option<ParticleEmitter>,
    pointer: PointerState,
    transform: SceneTransform,
}

impl CardScene {
    /// Assembles the art-independent layers and requests the art.
    #[must_use]
    pub fn build(context: Rc<RendererContext>, card: Card, options: CardOptions) -> Self {
        let profile = options.size.profile();
        let theme = context.catalog().theme(&card.house);
        let request = ArtRequest {
            path: art_path(
                &card,
                options.size,
                options.back_override.as_deref(),
                &context.config().card_back,
            ),
            size: options.size,
        };
        let pending = context.loader().load(&request);
        debug!(card = card.id.as_str(), path = %request.path, size = options.size.name(), "card scene building");

        let mut scene = Self {
            context,
            transform: SceneTransform::for_orientation(options.orientation),
            card,
            options,
            profile,
            theme,
            state: SceneState::Building,
            layers: DrawList::new(),
            pending: Some(pending),
            texture: None,
            effect: None,
            emitter: None,
            pointer: PointerState::new(),
        };
        scene.assemble_chrome();
        scene
    }

    fn assemble_chrome(&mut self) {
        let ctx = BuildContext::new(&self.card, self.profile, self.theme, self.options.premium);
        let layers = &mut self.layers;

        set_nonempty(layers, LayerKind::Shadow, builders::shadow(&self.profile));
        set_nonempty(layers, LayerKind::BaseFrame, builders::frame(&ctx));
        set_nonempty(layers, LayerKind::Mask, builders::mask(&self.profile));
        set_nonempty(layers, LayerKind::Overlay, builders::name_band(&ctx));
        set_nonempty(layers, LayerKind::Text, builders::name_text(&ctx));
        set_nonempty(layers, LayerKind::Stats, builders::stats(&ctx));
        set_nonempty(layers, LayerKind::Token, builders::tokens(&ctx));
        layers.set(Layer::hidden(
            LayerKind::InteractionHighlight,
            builders::highlight(&self.profile),
        ));
        layers.transform = self.transform;
        self.refresh_highlight();
    }

    /// Checks the art request. Returns true if the scene left `Building`.
    pub fn poll_art(&mut self) -> bool {
        if self.state != SceneState::Building {
            return false;
        }
        let Some(result) = self.pending.as_ref().and_then(ArtPending::poll) else {
            return false;
        };
        self.pending = None;

        match result {
            Ok(texture) => self.finish_with_art(texture),
            Err(error) => {
                warn!(card = self.card.id.as_str(), %error, "art load failed, showing fallback");
                self.finish_with_fallback();
            }
        }
        true
    }

    fn finish_with_art(&mut self, texture: ArtTexture) {
        self.texture = Some(texture.id);

        if self.options.premium && !self.card.facedown {
            match self.context.effects().create_shimmer(texture.id) {
                Ok(mut effect) => {
                    effect.set_intensity(self.context.config().shimmer_intensity);
                    let [x, y] = self.pointer.position();
                    effect.set_pointer(x, y);
                    self.effect = Some(effect);
                }
                Err(error) => {
                    warn!(card = self.card.id.as_str(), %error, "shimmer unavailable, rendering without it");
                }
            }

            let preset = self.context.catalog().preset(&self.card.house);
            let anchor = [
                self.profile.width as f32 * EMITTER_ANCHOR.0,
                self.profile.height as f32 * EMITTER_ANCHOR.1,
            ];
            self.emitter = Some(
                ParticleEmitter::new(preset, anchor).with_settings(self.context.emitter_settings()),
            );
            self.layers.set(Layer::new(LayerKind::Effect, Vec::new()));
        }

        self.layers.set(Layer::new(
            LayerKind::Art,
            builders::art(&self.profile, texture.id, self.effect.is_some()),
        ));
        self.state = SceneState::Ready;
        debug!(
            card = self.card.id.as_str(),
            texture = texture.id.0,
            shimmer = self.effect.is_some(),
            particles = self.emitter.is_some(),
            "card scene ready"
        );
    }

    fn finish_with_fallback(&mut self) {
        // The fallback panel never carries premium decoration.
        if self.options.premium {
            let ctx = BuildContext::new(&self.card, self.profile, self.theme, false);
            set_nonempty(&mut self.layers, LayerKind::BaseFrame, builders::frame(&ctx));
        }
        self.layers
            .set(Layer::new(LayerKind::Art, builders::fallback(&self.profile)));
        self.state = SceneState::ReadyFallback;
    }

    /// Applies a pointer event. Returns true if pointer state changed.
    pub fn pointer(&mut self, event: PointerEvent) -> bool {
        let changed = self.pointer.apply(event);
        self.refresh_highlight();
        changed
    }

    /// Enables or disables interaction.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.options.disabled = disabled;
        self.refresh_highlight();
    }

    /// Changes orientation without rebuilding.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.options.orientation = orientation;
        self.transform.base_rotation = SceneTransform::for_orientation(orientation).base_rotation;
        self.layers.transform = self.transform;
    }

    fn refresh_highlight(&mut self) {
        let visible = self.pointer.is_hovered() && !self.options.disabled;
        if let Some(layer) = self.layers.get_mut(LayerKind::InteractionHighlight) {
            layer.visible = visible;
        }
    }

    /// Immediate particle burst. Returns how many particles were activated.
    pub fn burst(&mut self, n: usize) -> usize {
        self.emitter.as_mut().map_or(0, |emitter| emitter.burst(n))
    }

    /// Releases everything. Idempotent.
    ///
    /// Dropping the pending request first means a late art result is
    /// discarded by the loader rather than delivered here.
    pub fn destroy(&mut self) {
        if self.state == SceneState::Destroyed {
            return;
        }
        self.pending = None;
        self.effect = None;
        if let Some(emitter) = self.emitter.as_mut() {
            emitter.stop();
        }
        self.emitter = None;
        if let Some(texture) = self.texture.take() {
            self.context.loader().release(texture);
        }
        self.layers.clear();
        self.state = SceneState::Destroyed;
        debug!(card = self.card.id.as_str(), "card scene destroyed");
    }

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> SceneState {
        self.state
    }

    /// Card being shown.
    #[must_use]
    pub fn card(&self) -> &Card {
        &self.card
    }

    /// Presentation options.
    #[must_use]
    pub fn options(&self) -> &CardOptions {
        &self.options
    }

    /// Pixel dimensions.
    #[must_use]
    pub fn profile(&self) -> SizeProfile {
        self.profile
    }

    /// House colors.
    #[must_use]
    pub fn theme(&self) -> HouseTheme {
        self.theme
    }

    /// Current frame output.
    #[must_use]
    pub fn draw_list(&self) -> &DrawList {
        &self.layers
    }

    /// Art texture, once loaded.
    #[must_use]
    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    /// Whether a shimmer effect is attached.
    #[must_use]
    pub fn has_effect(&self) -> bool {
        self.effect.is_some()
    }

    /// Particle emitter, for premium cards with art.
    #[must_use]
    pub fn emitter(&self) -> Option<&ParticleEmitter> {
        self.emitter.as_ref()
    }

    /// Last pointer state.
    #[must_use]
    pub fn pointer_state(&self) -> PointerState {
        self.pointer
    }

    /// Current transform.
    #[must_use]
    pub fn transform(&self) -> SceneTransform {
        self.transform
    }
}

impl FrameTarget for CardScene {
    fn poll_pending(&mut self, _ctx: &FrameContext) {
        self.poll_art();
    }

    fn update_effect(&mut self, ctx: &FrameContext) {
        if let Some(effect) = self.effect.as_mut() {
            effect.set_time(ctx.time as f32);
            effect.set_intensity(self.context.config().shimmer_intensity);
            let [x, y] = self.pointer.position();
            effect.set_pointer(x, y);
        }
    }

    fn update_transform(&mut self, ctx: &FrameContext) {
        if self.state == SceneState::Destroyed {
            return;
        }
        self.transform
            .update(&self.pointer, ctx.time, &self.context.tilt_settings());
        self.layers.transform = self.transform;
    }

    fn advance_particles(&mut self, ctx: &FrameContext) {
        let Some(emitter) = self.emitter.as_mut() else {
            return;
        };
        emitter.advance(ctx.delta);

        if let Some(layer) = self.layers.get_mut(LayerKind::Effect) {
            layer.commands.clear();
            layer.commands.extend(
                emitter
                    .active_particles()
                    .map(|particle| particle.visual())
                    .filter(|visual| visual.visible)
                    .map(|visual| DrawCommand::Circle {
                        center: [visual.x, visual.y],
                        radius: visual.radius,
                        color: Color::from_rgb(visual.color, visual.alpha),
                    }),
            );
        }
    }
}

impl Drop for CardScene {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn set_nonempty(layers: &mut DrawList, kind: LayerKind, commands: Vec<DrawCommand>) {
    if !commands.is_empty() {
        layers.set(Layer::new(kind, commands));
    }
}
