use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::orientation::{rotate_about_axis, Orientation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    #[default]
    Model,
    /// Marker placed next to a portal or mirror surface; names the remote camera.
    PortalSurface,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityRef {
    #[default]
    World,
    Entity(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneEntity {
    #[serde(default)]
    pub kind: EntityKind,
    pub origin: Vec3,
    /// Remote camera position. Equal to `origin` for a plain mirror.
    pub anchor_origin: Vec3,
    #[serde(default = "default_axis")]
    pub axis: [Vec3; 3],
    #[serde(default)]
    pub animate: bool,
    /// Degrees per second.
    #[serde(default)]
    pub rotate_speed: f32,
    /// Degrees.
    #[serde(default)]
    pub offset: f32,
}

fn default_axis() -> [Vec3; 3] {
    [Vec3::X, Vec3::Y, Vec3::Z]
}

impl SceneEntity {
    pub fn model(origin: Vec3, axis: [Vec3; 3]) -> Self {
        Self {
            kind: EntityKind::Model,
            origin,
            anchor_origin: origin,
            axis,
            animate: false,
            rotate_speed: 0.0,
            offset: 0.0,
        }
    }

    pub fn mirror(origin: Vec3) -> Self {
        Self {
            kind: EntityKind::PortalSurface,
            origin,
            anchor_origin: origin,
            axis: default_axis(),
            animate: false,
            rotate_speed: 0.0,
            offset: 0.0,
        }
    }

    pub fn portal(origin: Vec3, anchor_origin: Vec3, axis: [Vec3; 3]) -> Self {
        Self {
            kind: EntityKind::PortalSurface,
            origin,
            anchor_origin,
            axis,
            animate: false,
            rotate_speed: 0.0,
            offset: 0.0,
        }
    }

    pub fn is_portal_surface(&self) -> bool {
        self.kind == EntityKind::PortalSurface
    }

    /// Exact componentwise comparison; any difference makes it a portal.
    pub fn is_mirror(&self) -> bool {
        self.anchor_origin == self.origin
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::new(self.origin, self.axis)
    }

    pub fn camera_motion(&self) -> CameraMotion {
        if self.animate && self.rotate_speed != 0.0 {
            CameraMotion::Rotate {
                speed: self.rotate_speed,
            }
        } else if self.animate && self.offset != 0.0 {
            CameraMotion::Bob {
                offset: self.offset,
            }
        } else if self.offset != 0.0 {
            CameraMotion::Fixed {
                offset: self.offset,
            }
        } else {
            CameraMotion::Still
        }
    }
}

/// Roll applied to a remote camera around its forward axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMotion {
    Still,
    /// Continuous spin, degrees per second of render time.
    Rotate { speed: f32 },
    /// Oscillates four degrees either side of `offset`.
    Bob { offset: f32 },
    Fixed { offset: f32 },
}

impl CameraMotion {
    pub fn angle_degrees(&self, time_ms: i32) -> Option<f32> {
        let time = time_ms as f32;
        match *self {
            CameraMotion::Still => None,
            CameraMotion::Rotate { speed } => Some((time / 1000.0) * speed),
            CameraMotion::Bob { offset } => Some(offset + (time * 0.003).sin() * 4.0),
            CameraMotion::Fixed { offset } => Some(offset),
        }
    }

    /// Rolls `axis[1]` about `axis[0]` and rebuilds `axis[2]` from the pair.
    pub fn apply(&self, axis: &mut [Vec3; 3], time_ms: i32) {
        let Some(degrees) = self.angle_degrees(time_ms) else {
            return;
        };
        axis[1] = rotate_about_axis(axis[1], axis[0], degrees);
        axis[2] = axis[0].cross(axis[1]);
    }
}
