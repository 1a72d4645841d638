use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Rigid coordinate frame: an origin plus three orthonormal, right-handed axes.
///
/// For a camera `axis[0]` is forward, `axis[1]` left and `axis[2]` up. For a
/// portal surface `axis[0]` is the plane normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub origin: Vec3,
    pub axis: [Vec3; 3],
}

impl Orientation {
    pub const IDENTITY: Orientation = Orientation {
        origin: Vec3::ZERO,
        axis: [Vec3::X, Vec3::Y, Vec3::Z],
    };

    pub fn new(origin: Vec3, axis: [Vec3; 3]) -> Self {
        Self { origin, axis }
    }

    pub fn from_normal(origin: Vec3, normal: Vec3) -> Self {
        Self {
            origin,
            axis: basis_from_normal(normal),
        }
    }

    pub fn local_normal_to_world(&self, local: Vec3) -> Vec3 {
        self.axis[0] * local.x + self.axis[1] * local.y + self.axis[2] * local.z
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Unit vector perpendicular to `normal`.
///
/// Projects the cardinal axis on which `normal` is smallest onto the plane
/// perpendicular to `normal`, so the result is never near-parallel to it.
pub fn perpendicular_vector(normal: Vec3) -> Vec3 {
    let length_sq = normal.length_squared();
    if length_sq <= f32::EPSILON {
        return Vec3::X;
    }

    let mut pos = 0;
    let mut min_elem = 1.0_f32;
    for (i, component) in normal.to_array().into_iter().enumerate() {
        if component.abs() < min_elem {
            pos = i;
            min_elem = component.abs();
        }
    }

    let cardinal = Vec3::AXES[pos];
    let projected = cardinal - normal * (normal.dot(cardinal) / length_sq);
    projected.normalize_or_zero()
}

pub fn basis_from_normal(normal: Vec3) -> [Vec3; 3] {
    let axis1 = perpendicular_vector(normal);
    let axis2 = normal.cross(axis1);
    [normal, axis1, axis2]
}

/// Rotates `vector` about `axis` by `degrees`, counter-clockwise when looking
/// down the axis.
pub fn rotate_about_axis(vector: Vec3, axis: Vec3, degrees: f32) -> Vec3 {
    let axis = axis.normalize_or_zero();
    if axis == Vec3::ZERO {
        return vector;
    }
    Quat::from_axis_angle(axis, degrees.to_radians()) * vector
}

/// Re-expresses `point` in `surface` coordinates, then rebuilds it in
/// `camera` coordinates.
pub fn mirror_point(point: Vec3, surface: &Orientation, camera: &Orientation) -> Vec3 {
    mirror_vector(point - surface.origin, surface, camera) + camera.origin
}

pub fn mirror_vector(vector: Vec3, surface: &Orientation, camera: &Orientation) -> Vec3 {
    surface
        .axis
        .iter()
        .zip(camera.axis.iter())
        .fold(Vec3::ZERO, |acc, (surface_axis, camera_axis)| {
            acc + *camera_axis * vector.dot(*surface_axis)
        })
}
