//! # Card Surface
//!
//! Public entry point. Binds exactly one [`CardScene`] to the shared
//! [`RenderLoop`] and to a drawable region.
//!
//! Teardown order is fixed: unregister from the loop, destroy the scene
//! (cancelling any in-flight art load), then release the texture.
//!
//! Registration goes through the loop's [`Registrar`], so a surface may be
//! updated from inside a tick. The rebuilt scene is driven from the next one.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use cardglow_core::Card;
use cardglow_rendering::{Registrar, RenderLoop, TargetId};
use cardglow_ui::{DrawList, PointerEvent};
use tracing::{debug, warn};

use crate::context::RendererContext;
use crate::scene::{CardOptions, CardScene, SceneState};

/// Logical and backing-store size of a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    /// Logical width.
    pub width: u32,
    /// Logical height.
    pub height: u32,
    /// Backing-store width.
    pub physical_width: u32,
    /// Backing-store height.
    pub physical_height: u32,
    /// Display pixel ratio used.
    pub pixel_ratio: f32,
}

/// Payload of hover events.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverInfo {
    /// Card under the pointer.
    pub card: Card,
    /// Surface size.
    pub size: SurfaceSize,
}

/// Events the surface reports back to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// Card clicked; carries the card record unchanged.
    Click(Card),
    /// Pointer entered.
    HoverStart(HoverInfo),
    /// Pointer moved while over the card.
    HoverMove(HoverInfo),
    /// Pointer left.
    HoverEnd(HoverInfo),
}

/// A mounted card.
#[derive(Debug)]
pub struct CardSurface {
    context: Rc<RendererContext>,
    render_loop: Rc<RefCell<RenderLoop>>,
    registrar: Option<Registrar>,
    scene: Rc<RefCell<CardScene>>,
    target: Option<TargetId>,
    card: Card,
    options: CardOptions,
}

impl CardSurface {
    /// Builds the scene and registers it with `render_loop`.
    ///
    /// Must not be called from inside [`RenderLoop::tick`].
    #[must_use]
    pub fn mount(
        context: &Rc<RendererContext>,
        render_loop: &Rc<RefCell<RenderLoop>>,
        card: Card,
        options: CardOptions,
    ) -> Self {
        let scene = Rc::new(RefCell::new(CardScene::build(
            Rc::clone(context),
            card.clone(),
            options.clone(),
        )));
        let registrar = match render_loop.try_borrow() {
            Ok(render_loop) => Some(render_loop.registrar()),
            Err(_) => {
                warn!(card = card.id.as_str(), "render loop busy during mount, card will not animate");
                None
            }
        };
        let target = registrar.as_ref().map(|registrar| registrar.register(&scene));
        Self {
            context: Rc::clone(context),
            render_loop: Rc::clone(render_loop),
            registrar,
            scene,
            target,
            card,
            options,
        }
    }

    /// Applies new inputs. Returns true if the scene was rebuilt.
    ///
    /// Any change to the card record, size, premium flag or back override
    /// tears the scene down and builds a fresh one. Orientation and the
    /// disabled flag are applied in place.
    pub fn update(&mut self, card: Card, options: CardOptions) -> bool {
        let rebuild = card != self.card || self.options.needs_rebuild(&options);

        if rebuild {
            self.teardown();
            self.scene = Rc::new(RefCell::new(CardScene::build(
                Rc::clone(&self.context),
                card.clone(),
                options.clone(),
            )));
            self.target = self
                .registrar
                .as_ref()
                .map(|registrar| registrar.register(&self.scene));
            debug!(card = card.id.as_str(), "card surface rebuilt");
        } else if let Ok(mut scene) = self.scene.try_borrow_mut() {
            scene.set_orientation(options.orientation);
            scene.set_disabled(options.disabled);
        }

        self.card = card;
        self.options = options;
        rebuild
    }

    /// Unregisters and destroys the scene.
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(target) = self.target.take() {
            match self.render_loop.try_borrow_mut() {
                Ok(mut render_loop) => {
                    render_loop.unregister(target);
                }
                // Mid-tick: the loop prunes the dead weak reference itself.
                Err(_) => warn!(target_id = target.raw(), "render loop busy during unmount"),
            }
        }
        match self.scene.try_borrow_mut() {
            Ok(mut scene) => scene.destroy(),
            Err(_) => warn!(card = self.card.id.as_str(), "scene busy during unmount"),
        }
    }

    /// Ingests a pointer event and reports what the host should see.
    ///
    /// Clicks are suppressed while disabled. Hover events carry the card and
    /// the surface size.
    pub fn pointer(&mut self, event: PointerEvent) -> Option<SurfaceEvent> {
        let was_hovered = {
            let Ok(mut scene) = self.scene.try_borrow_mut() else {
                return None;
            };
            let was_hovered = scene.pointer_state().is_hovered();
            scene.pointer(event);
            was_hovered
        };

        match event {
            PointerEvent::Click => {
                (!self.options.disabled).then(|| SurfaceEvent::Click(self.card.clone()))
            }
            PointerEvent::Enter => Some(SurfaceEvent::HoverStart(self.hover_info())),
            PointerEvent::Move { .. } => Some(if was_hovered {
                SurfaceEvent::HoverMove(self.hover_info())
            } else {
                SurfaceEvent::HoverStart(self.hover_info())
            }),
            PointerEvent::Leave => was_hovered.then(|| SurfaceEvent::HoverEnd(self.hover_info())),
        }
    }

    fn hover_info(&self) -> HoverInfo {
        HoverInfo {
            card: self.card.clone(),
            size: self.size(),
        }
    }

    /// Logical and physical size at the configured pixel ratio.
    #[must_use]
    pub fn size(&self) -> SurfaceSize {
        let profile = self.options.size.profile();
        let pixel_ratio = self.context.config().pixel_ratio;
        let (physical_width, physical_height) = profile.physical_size(pixel_ratio);
        SurfaceSize {
            width: profile.width,
            height: profile.height,
            physical_width,
            physical_height,
            pixel_ratio,
        }
    }

    /// Current frame output.
    ///
    /// # Panics
    ///
    /// If called while the render loop is ticking this scene.
    #[must_use]
    pub fn draw_list(&self) -> Ref<'_, DrawList> {
        Ref::map(self.scene.borrow(), CardScene::draw_list)
    }

    /// The scene, for inspection.
    ///
    /// # Panics
    ///
    /// If called while the render loop is ticking this scene.
    #[must_use]
    pub fn scene(&self) -> Ref<'_, CardScene> {
        self.scene.borrow()
    }

    /// Scene lifecycle state.
    ///
    /// # Panics
    ///
    /// If called while the render loop is ticking this scene.
    #[must_use]
    pub fn state(&self) -> SceneState {
        self.scene.borrow().state()
    }

    /// Immediate particle burst on premium cards.
    pub fn burst(&mut self, n: usize) -> usize {
        self.scene
            .try_borrow_mut()
            .map_or(0, |mut scene| scene.burst(n))
    }

    /// Card currently shown.
    #[must_use]
    pub fn card(&self) -> &Card {
        &self.card
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &CardOptions {
        &self.options
    }

    /// Render loop registration, while mounted.
    #[must_use]
    pub fn target(&self) -> Option<TargetId> {
        self.target
    }
}

impl Drop for CardSurface {
    fn drop(&mut self) {
        self.teardown();
    }
}

