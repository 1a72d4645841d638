use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Unit normal plus signed distance from the origin along that normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vec3,
    pub dist: f32,
}

impl Plane {
    /// Returned for a surface without geometry.
    pub const FALLBACK: Plane = Plane {
        normal: Vec3::Z,
        dist: 1.0,
    };

    /// Returned when three points do not span a plane.
    pub const DEGENERATE: Plane = Plane {
        normal: Vec3::ZERO,
        dist: 1.0,
    };

    pub fn new(normal: Vec3, dist: f32) -> Self {
        Self { normal, dist }
    }

    /// Plane through three points, normal following `(c - a) x (b - a)`.
    ///
    /// Collinear or coincident points give [`Plane::DEGENERATE`].
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let d1 = b - a;
        let d2 = c - a;
        let normal = d2.cross(d1).normalize_or_zero();
        if normal == Vec3::ZERO {
            return Self::DEGENERATE;
        }

        Self {
            normal,
            dist: normal.dot(a),
        }
    }

    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.dist
    }

    pub fn project_point(&self, point: Vec3) -> Vec3 {
        point - self.normal * self.distance_to(point)
    }

    /// Point on the plane closest to the world origin.
    pub fn anchor(&self) -> Vec3 {
        self.normal * self.dist
    }

    pub fn reflect_point(&self, point: Vec3) -> Vec3 {
        point - self.normal * (2.0 * self.distance_to(point))
    }

    pub fn reflect_vector(&self, vector: Vec3) -> Vec3 {
        vector - self.normal * (2.0 * self.normal.dot(vector))
    }

    /// Packs the plane as `[nx, ny, nz, -dist]` for shader-side dot products.
    pub fn to_array(&self) -> [f32; 4] {
        [self.normal.x, self.normal.y, self.normal.z, -self.dist]
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::FALLBACK
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::Plane;

    #[test]
    fn from_points_follows_clockwise_winding() {
        let plane = Plane::from_points(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
            Vec3::new(1.0, 0.0, 5.0),
        );
        assert!(plane.normal.abs_diff_eq(Vec3::Z, 1e-6));
        assert!((plane.dist - 5.0).abs() < 1e-6);
    }

    #[test]
    fn collinear_points_give_degenerate_plane() {
        let plane = Plane::from_points(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        assert_eq!(plane, Plane::DEGENERATE);
    }

    #[test]
    fn reflection_is_an_involution() {
        let plane = Plane::new(Vec3::new(1.0, 2.0, -0.5).normalize(), 3.25);
        let point = Vec3::new(-4.0, 7.5, 2.0);
        let vector = Vec3::new(0.3, -0.2, 0.9);

        let twice_point = plane.reflect_point(plane.reflect_point(point));
        let twice_vector = plane.reflect_vector(plane.reflect_vector(vector));
        assert!(twice_point.abs_diff_eq(point, 1e-4));
        assert!(twice_vector.abs_diff_eq(vector, 1e-5));
    }

    #[test]
    fn reflect_point_mirrors_across_offset_plane() {
        let plane = Plane::new(Vec3::Z, 2.0);
        assert!(plane
            .reflect_point(Vec3::new(10.0, 0.0, 5.0))
            .abs_diff_eq(Vec3::new(10.0, 0.0, -1.0), 1e-6));
        assert!(plane
            .reflect_vector(Vec3::new(0.0, 1.0, 1.0))
            .abs_diff_eq(Vec3::new(0.0, 1.0, -1.0), 1e-6));
    }

    #[test]
    fn project_point_lands_on_plane() {
        let plane = Plane::new(Vec3::Y, -3.0);
        let projected = plane.project_point(Vec3::new(1.0, 9.0, 2.0));
        assert!(projected.abs_diff_eq(Vec3::new(1.0, -3.0, 2.0), 1e-6));
        assert!(plane.distance_to(projected).abs() < 1e-6);
    }
}
