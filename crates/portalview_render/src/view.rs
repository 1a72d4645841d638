use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use portalview_shared::orientation::{mirror_point, mirror_vector, Orientation};
use portalview_shared::plane::Plane;
use portalview_shared::scene::Scene;

use crate::portal::{PortalKind, ResolvedCamera};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ViewFlags: u8 {
        /// Rendered through a portal or mirror; `portal_plane` is active.
        const PORTAL = 0b0000_0001;
        /// Handedness is flipped; back-face culling must be reversed.
        const MIRROR = 0b0000_0010;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub orientation: Orientation,
    /// Clip plane for portal views; geometry behind it is discarded.
    pub portal_plane: Plane,
    pub flags: ViewFlags,
    pub subview_level: u32,
    /// Point the visibility pass treats as the eye.
    pub pvs_origin: Vec3,
    pub viewport: [u32; 4],
    pub fov_x: f32,
    pub fov_y: f32,
}

impl ViewState {
    pub fn primary(orientation: Orientation, viewport: [u32; 4], fov_x: f32, fov_y: f32) -> Self {
        Self {
            orientation,
            portal_plane: Plane::default(),
            flags: ViewFlags::empty(),
            subview_level: 0,
            pvs_origin: orientation.origin,
            viewport,
            fov_x,
            fov_y,
        }
    }

    pub fn from_scene(scene: &Scene) -> Self {
        Self::primary(scene.viewer, scene.viewport, scene.fov_x, scene.fov_y)
    }

    pub fn is_portal(&self) -> bool {
        self.flags.contains(ViewFlags::PORTAL)
    }

    pub fn is_mirror(&self) -> bool {
        self.flags.contains(ViewFlags::MIRROR)
    }

    /// Viewport and field of view carry over from `self`.
    pub fn subview(&self, plane: &Plane, resolved: &ResolvedCamera) -> ViewState {
        let mut child = self.clone();
        let parent = &self.orientation;

        match resolved.kind {
            PortalKind::Mirror => {
                child.orientation = Orientation::new(
                    plane.reflect_point(parent.origin),
                    parent.axis.map(|axis| plane.reflect_vector(axis)),
                );
                child.flags.insert(ViewFlags::MIRROR);
                child.portal_plane = *plane;
            }
            PortalKind::Portal => {
                let surface = &resolved.surface;
                let camera = &resolved.camera;
                child.orientation = Orientation::new(
                    mirror_point(parent.origin, surface, camera),
                    parent.axis.map(|axis| mirror_vector(axis, surface, camera)),
                );
                child.flags.remove(ViewFlags::MIRROR);

                let normal = -camera.axis[0];
                child.portal_plane = Plane::new(normal, camera.origin.dot(normal));
            }
        }

        child.flags.insert(ViewFlags::PORTAL);
        child.pvs_origin = resolved.pvs_origin;
        child.subview_level = self.subview_level + 1;
        child
    }

    pub fn uniform(&self) -> SubviewUniform {
        SubviewUniform {
            view_origin: self.orientation.origin.extend(1.0).to_array(),
            clip_plane: self.portal_plane.to_array(),
            params: [
                if self.is_portal() { 1.0 } else { 0.0 },
                if self.is_mirror() { 1.0 } else { 0.0 },
                self.subview_level as f32,
                0.0,
            ],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SubviewUniform {
    pub view_origin: [f32; 4],
    pub clip_plane: [f32; 4],
    /// portal, mirror, subview level, unused
    pub params: [f32; 4],
}
