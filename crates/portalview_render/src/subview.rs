use std::mem;
use std::ops::{Deref, DerefMut};

use portalview_shared::entity::{EntityRef, SceneEntity};
use portalview_shared::plane::Plane;
use portalview_shared::scene::Scene;
use portalview_shared::surface::DrawSurface;
use tracing::debug;

use crate::portal::resolve_portal_camera;
use crate::settings::SubviewSettings;
use crate::view::ViewState;

/// Why a portal surface produced no subview this frame. None of these are
/// failures; the surface is simply left unrendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("portal rendering is disabled")]
    PortalsDisabled,
    #[error("fast sky mode skips portal views")]
    FastSky,
    #[error("subview level {level} reached the recursion limit of {max}")]
    RecursionLimit { level: u32, max: u32 },
    #[error("no portal entity in range of the surface")]
    NoMatchingCamera,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubviewOutcome {
    SubviewRendered,
    NoSubview(SkipReason),
}

impl SubviewOutcome {
    pub fn rendered(&self) -> bool {
        matches!(self, SubviewOutcome::SubviewRendered)
    }
}

/// Implementations call [`render_subview_for_surface`] for the portal surfaces
/// they meet, which re-enters `render_view` for the child view.
pub trait ViewRenderer {
    fn render_view(&mut self, ctx: &mut RenderContext<'_>);

    /// Marks the screen footprint of a portal surface before its subview is drawn.
    fn add_stencil_surface(&mut self, _surface: &DrawSurface) {}
}

#[derive(Debug)]
pub struct RenderContext<'a> {
    pub view: ViewState,
    pub settings: &'a SubviewSettings,
    pub entities: &'a [SceneEntity],
    pub time_ms: i32,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        view: ViewState,
        settings: &'a SubviewSettings,
        entities: &'a [SceneEntity],
        time_ms: i32,
    ) -> Self {
        Self {
            view,
            settings,
            entities,
            time_ms,
        }
    }

    pub fn for_scene(scene: &'a Scene, settings: &'a SubviewSettings) -> Self {
        Self::new(
            ViewState::from_scene(scene),
            settings,
            &scene.entities,
            scene.time_ms,
        )
    }

    /// Installs `child` as the current view until the returned scope drops.
    pub fn enter_subview(&mut self, child: ViewState) -> ViewScope<'_, 'a> {
        let parent = mem::replace(&mut self.view, child);
        ViewScope {
            ctx: self,
            parent: Some(parent),
        }
    }

    fn subview_blocked(&self) -> Option<SkipReason> {
        if !self.settings.portals {
            return Some(SkipReason::PortalsDisabled);
        }
        if self.settings.fast_sky {
            return Some(SkipReason::FastSky);
        }

        let max = self.settings.max_recursion;
        if self.view.is_portal() && self.view.subview_level >= max {
            return Some(SkipReason::RecursionLimit {
                level: self.view.subview_level,
                max,
            });
        }
        None
    }
}

/// Restores the parent view when dropped, on every exit path.
pub struct ViewScope<'c, 'a> {
    ctx: &'c mut RenderContext<'a>,
    parent: Option<ViewState>,
}

impl<'a> Deref for ViewScope<'_, 'a> {
    type Target = RenderContext<'a>;

    fn deref(&self) -> &Self::Target {
        &*self.ctx
    }
}

impl DerefMut for ViewScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.ctx
    }
}

impl Drop for ViewScope<'_, '_> {
    fn drop(&mut self) {
        if let Some(parent) = self.parent.take() {
            self.ctx.view = parent;
        }
    }
}

// Surfaces on moving entities store their plane in entity space.
pub fn world_plane(surface: &DrawSurface, entities: &[SceneEntity]) -> Plane {
    let local = surface.plane();
    let EntityRef::Entity(index) = surface.entity else {
        return local;
    };
    let Some(entity) = entities.get(index) else {
        debug!("surface references missing entity {index}, keeping its local plane");
        return local;
    };

    let frame = entity.orientation();
    let normal = frame.local_normal_to_world(local.normal);
    Plane::new(normal, local.dist + normal.dot(frame.origin))
}

/// Renders the view seen through a portal or mirror surface, if any.
///
/// The child view is current only for the duration of the nested
/// `render_view` call; `ctx.view` is back to the caller's view on return.
pub fn render_subview_for_surface<R>(
    ctx: &mut RenderContext<'_>,
    renderer: &mut R,
    surface: &DrawSurface,
) -> SubviewOutcome
where
    R: ViewRenderer + ?Sized,
{
    if let Some(reason) = ctx.subview_blocked() {
        if let SkipReason::RecursionLimit { level, max } = reason {
            debug!("recursive mirror/portal at subview level {level} (limit {max})");
        }
        return SubviewOutcome::NoSubview(reason);
    }

    renderer.add_stencil_surface(surface);

    let plane = world_plane(surface, ctx.entities);
    let Some(resolved) = resolve_portal_camera(&plane, ctx.entities, ctx.time_ms) else {
        return SubviewOutcome::NoSubview(SkipReason::NoMatchingCamera);
    };

    let child = ctx.view.subview(&plane, &resolved);
    let mut scope = ctx.enter_subview(child);
    renderer.render_view(&mut *scope);
    drop(scope);

    SubviewOutcome::SubviewRendered
}
