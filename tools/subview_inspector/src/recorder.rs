use portalview_render::subview::{
    render_subview_for_surface, RenderContext, SkipReason, SubviewOutcome, ViewRenderer,
};
use portalview_render::view::{SubviewUniform, ViewState};
use portalview_shared::surface::DrawSurface;
use tracing::{debug, info};

/// Stand-in back-end: records every view it is asked to draw and walks the
/// scene's portal surfaces the way a real renderer would after sorting.
pub struct RecordingRenderer<'s> {
    surfaces: &'s [DrawSurface],
    pub views: Vec<ViewState>,
    pub uniforms: Vec<SubviewUniform>,
    pub skipped: Vec<(u32, SkipReason)>,
    pub stencil_marks: usize,
}

impl<'s> RecordingRenderer<'s> {
    pub fn new(surfaces: &'s [DrawSurface]) -> Self {
        Self {
            surfaces,
            views: Vec::new(),
            uniforms: Vec::new(),
            skipped: Vec::new(),
            stencil_marks: 0,
        }
    }

    pub fn uniform_bytes(&self) -> usize {
        bytemuck::cast_slice::<SubviewUniform, u8>(&self.uniforms).len()
    }
}

impl ViewRenderer for RecordingRenderer<'_> {
    fn render_view(&mut self, ctx: &mut RenderContext<'_>) {
        let view = &ctx.view;
        info!(
            "render view level={} origin={} mirror={} pvs={}",
            view.subview_level,
            view.orientation.origin,
            view.is_mirror(),
            view.pvs_origin
        );
        self.views.push(view.clone());
        self.uniforms.push(view.uniform());

        let surfaces = self.surfaces;
        for surface in surfaces.iter().filter(|surface| surface.portal) {
            let outcome = render_subview_for_surface(ctx, self, surface);
            if let SubviewOutcome::NoSubview(reason) = outcome {
                debug!("no subview at level {}: {reason}", ctx.view.subview_level);
                self.skipped.push((ctx.view.subview_level, reason));
            }
        }
    }

    fn add_stencil_surface(&mut self, _surface: &DrawSurface) {
        self.stencil_marks += 1;
    }
}
