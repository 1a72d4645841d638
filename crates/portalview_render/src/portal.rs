use glam::Vec3;
use portalview_shared::entity::SceneEntity;
use portalview_shared::orientation::Orientation;
use portalview_shared::plane::Plane;
use tracing::trace;

/// How far a portal marker entity may sit from the surface plane it controls.
pub const PORTAL_ENTITY_RANGE: f32 = 64.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalKind {
    Mirror,
    Portal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedCamera {
    /// `axis[0]` is the world-space plane normal; `origin` lies on the plane.
    pub surface: Orientation,
    pub camera: Orientation,
    pub pvs_origin: Vec3,
    pub kind: PortalKind,
}

impl ResolvedCamera {
    pub fn is_mirror(&self) -> bool {
        self.kind == PortalKind::Mirror
    }
}

/// First portal marker in list order whose origin is within
/// [`PORTAL_ENTITY_RANGE`] of `plane`.
pub fn find_portal_entity<'a>(plane: &Plane, entities: &'a [SceneEntity]) -> Option<&'a SceneEntity> {
    entities
        .iter()
        .filter(|entity| entity.is_portal_surface())
        .find(|entity| plane.distance_to(entity.origin).abs() <= PORTAL_ENTITY_RANGE)
}

pub fn classify_portal(plane: &Plane, entities: &[SceneEntity]) -> Option<PortalKind> {
    find_portal_entity(plane, entities).map(|entity| {
        if entity.is_mirror() {
            PortalKind::Mirror
        } else {
            PortalKind::Portal
        }
    })
}

/// `None` when no marker is in range; the surface is then left unrendered.
pub fn resolve_portal_camera(
    plane: &Plane,
    entities: &[SceneEntity],
    time_ms: i32,
) -> Option<ResolvedCamera> {
    let mut surface = Orientation::from_normal(Vec3::ZERO, plane.normal);

    let Some(entity) = find_portal_entity(plane, entities) else {
        trace!(
            "no portal entity within {PORTAL_ENTITY_RANGE} units of plane {:?}",
            plane
        );
        return None;
    };

    if entity.is_mirror() {
        surface.origin = plane.anchor();
        let camera = Orientation::new(
            plane.anchor(),
            [-surface.axis[0], surface.axis[1], -surface.axis[2]],
        );
        return Some(ResolvedCamera {
            surface,
            camera,
            pvs_origin: entity.anchor_origin,
            kind: PortalKind::Mirror,
        });
    }

    surface.origin = plane.project_point(entity.origin);

    // Roll happens in the marker's own frame, before facing back through the surface.
    let mut axis = entity.axis;
    entity.camera_motion().apply(&mut axis, time_ms);
    let camera = Orientation::new(entity.anchor_origin, [-axis[0], -axis[1], axis[2]]);

    Some(ResolvedCamera {
        surface,
        camera,
        pvs_origin: entity.anchor_origin,
        kind: PortalKind::Portal,
    })
}
