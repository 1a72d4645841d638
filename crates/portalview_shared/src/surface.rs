use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::entity::EntityRef;
use crate::plane::Plane;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceGeometry {
    Face { plane: Plane },
    Triangles { verts: Vec<Vec3>, indexes: Vec<u32> },
    Poly { verts: Vec<Vec3> },
}

impl SurfaceGeometry {
    fn plane_points(&self) -> Option<[Vec3; 3]> {
        match self {
            SurfaceGeometry::Face { .. } => None,
            SurfaceGeometry::Triangles { verts, indexes } => {
                let vertex = |slot: usize| {
                    let index = usize::try_from(*indexes.get(slot)?).ok()?;
                    verts.get(index).copied()
                };
                Some([vertex(0)?, vertex(1)?, vertex(2)?])
            }
            SurfaceGeometry::Poly { verts } => match verts.as_slice() {
                [a, b, c, ..] => Some([*a, *b, *c]),
                _ => None,
            },
        }
    }
}

/// Plane equation of a surface in the space its vertices are stored in.
///
/// A missing surface yields [`Plane::FALLBACK`]; geometry with fewer than
/// three usable vertices yields [`Plane::DEGENERATE`].
pub fn plane_for_surface(surface: Option<&SurfaceGeometry>) -> Plane {
    let Some(surface) = surface else {
        return Plane::FALLBACK;
    };

    if let SurfaceGeometry::Face { plane } = surface {
        return *plane;
    }

    match surface.plane_points() {
        Some([a, b, c]) => Plane::from_points(a, b, c),
        None => Plane::DEGENERATE,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawSurface {
    #[serde(default)]
    pub geometry: Option<SurfaceGeometry>,
    #[serde(default)]
    pub entity: EntityRef,
    /// Set when the surface's shader sorts it as a portal or mirror.
    #[serde(default)]
    pub portal: bool,
}

impl DrawSurface {
    pub fn portal(geometry: SurfaceGeometry, entity: EntityRef) -> Self {
        Self {
            geometry: Some(geometry),
            entity,
            portal: true,
        }
    }

    pub fn plane(&self) -> Plane {
        plane_for_surface(self.geometry.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::{plane_for_surface, SurfaceGeometry};
    use crate::plane::Plane;

    #[test]
    fn face_returns_stored_plane_verbatim() {
        let plane = Plane::new(Vec3::new(0.0, 0.6, 0.8), -12.5);
        let face = SurfaceGeometry::Face { plane };
        assert_eq!(plane_for_surface(Some(&face)), plane);
    }

    #[test]
    fn missing_surface_falls_back_to_default_plane() {
        assert_eq!(plane_for_surface(None), Plane::new(Vec3::Z, 1.0));
    }

    #[test]
    fn triangles_use_indexed_vertices() {
        let triangles = SurfaceGeometry::Triangles {
            verts: vec![
                Vec3::new(9.0, 9.0, 9.0),
                Vec3::new(0.0, 0.0, 3.0),
                Vec3::new(1.0, 0.0, 3.0),
                Vec3::new(0.0, 1.0, 3.0),
            ],
            indexes: vec![1, 3, 2, 0],
        };
        let plane = plane_for_surface(Some(&triangles));
        assert!(plane.normal.abs_diff_eq(Vec3::Z, 1e-6));
        assert!((plane.dist - 3.0).abs() < 1e-6);
    }

    #[test]
    fn poly_uses_first_three_vertices() {
        let poly = SurfaceGeometry::Poly {
            verts: vec![
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 1.0),
                Vec3::new(2.0, 1.0, 0.0),
                Vec3::new(2.0, 5.0, 5.0),
            ],
        };
        let plane = plane_for_surface(Some(&poly));
        assert!(plane.normal.abs_diff_eq(Vec3::X, 1e-6));
        assert!((plane.dist - 2.0).abs() < 1e-6);
    }

    #[test]
    fn short_or_out_of_range_geometry_is_degenerate() {
        let short_poly = SurfaceGeometry::Poly {
            verts: vec![Vec3::ZERO, Vec3::X],
        };
        let bad_indexes = SurfaceGeometry::Triangles {
            verts: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            indexes: vec![0, 1, 7],
        };
        assert_eq!(plane_for_surface(Some(&short_poly)), Plane::DEGENERATE);
        assert_eq!(plane_for_surface(Some(&bad_indexes)), Plane::DEGENERATE);
    }
}
