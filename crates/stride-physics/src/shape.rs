//! Static collider shapes and their ray intersection tests.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::ray::Ray;
use crate::{SurfaceTags, WORLD_UP};

/// Parallel-ray tolerance for plane and slab tests.
const EPSILON: f32 = 1e-6;

/// Geometric shape of a static collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Infinite plane through `point` with unit `normal`. Two-sided.
    Plane {
        /// Any point on the plane
        point: Vec3,
        /// Unit normal
        normal: Vec3,
    },
    /// Axis-aligned box.
    Aabb {
        /// Minimum corner
        min: Vec3,
        /// Maximum corner
        max: Vec3,
    },
    /// Solid sphere.
    Sphere {
        /// Center
        center: Vec3,
        /// Radius
        radius: f32,
    },
}

impl Shape {
    /// Intersects `ray` with this shape.
    ///
    /// Returns the distance along the ray and the unit surface normal facing
    /// the ray origin. Hits behind the origin, and solids containing the
    /// origin, are ignored.
    #[must_use]
    pub fn intersect(&self, ray: &Ray) -> Option<(f32, Vec3)> {
        if ray.is_degenerate() {
            return None;
        }
        match *self {
            Self::Plane { point, normal } => intersect_plane(ray, point, normal),
            Self::Aabb { min, max } => intersect_aabb(ray, min, max),
            Self::Sphere { center, radius } => intersect_sphere(ray, center, radius),
        }
    }
}

fn intersect_plane(ray: &Ray, point: Vec3, normal: Vec3) -> Option<(f32, Vec3)> {
    let denom = normal.dot(ray.direction);
    if denom.abs() < EPSILON {
        return None;
    }
    let t = normal.dot(point - ray.origin) / denom;
    if t < 0.0 {
        return None;
    }
    let facing = if denom > 0.0 { -normal } else { normal };
    Some((t, facing))
}

fn intersect_aabb(ray: &Ray, min: Vec3, max: Vec3) -> Option<(f32, Vec3)> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec3::ZERO;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let dir = ray.direction[axis];

        if dir.abs() < EPSILON {
            if origin < min[axis] || origin > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / dir;
        let (near, far, face) = if dir > 0.0 {
            ((min[axis] - origin) * inv, (max[axis] - origin) * inv, -Vec3::AXES[axis])
        } else {
            ((max[axis] - origin) * inv, (min[axis] - origin) * inv, Vec3::AXES[axis])
        };

        if near > t_enter {
            t_enter = near;
            normal = face;
        }
        t_exit = t_exit.min(far);
        if t_enter > t_exit {
            return None;
        }
    }

    // Negative entry: the origin is inside the box or the box is behind it.
    if t_enter < 0.0 {
        return None;
    }
    Some((t_enter, normal))
}

fn intersect_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<(f32, Vec3)> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    if c < 0.0 {
        return None;
    }
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    if t < 0.0 {
        return None;
    }
    let normal = (ray.at(t) - center).normalize_or_zero();
    Some((t, normal))
}

/// A tagged static shape in a [`StaticWorld`](crate::StaticWorld).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    /// Geometry
    pub shape: Shape,
    /// Surface classification reported in hits
    pub tags: SurfaceTags,
}

impl Collider {
    /// Creates a collider from a shape and tags.
    #[must_use]
    pub const fn new(shape: Shape, tags: SurfaceTags) -> Self {
        Self { shape, tags }
    }

    /// Flat, infinite walkable ground at the given height.
    #[must_use]
    pub fn ground_plane(height: f32) -> Self {
        Self::new(
            Shape::Plane {
                point: Vec3::new(0.0, height, 0.0),
                normal: WORLD_UP,
            },
            SurfaceTags::GROUND,
        )
    }

    /// Infinite inclined plane through `point`, rising along -Z.
    ///
    /// The surface normal makes `slope_degrees` with world up.
    #[must_use]
    pub fn ramp(point: Vec3, slope_degrees: f32, tags: SurfaceTags) -> Self {
        let normal = Quat::from_rotation_x(slope_degrees.to_radians()) * WORLD_UP;
        Self::new(Shape::Plane { point, normal }, tags)
    }

    /// Axis-aligned block between two corners (in any order).
    #[must_use]
    pub fn block(a: Vec3, b: Vec3, tags: SurfaceTags) -> Self {
        Self::new(
            Shape::Aabb {
                min: a.min(b),
                max: a.max(b),
            },
            tags,
        )
    }

    /// Sphere collider. Negative radii are treated as their magnitude.
    #[must_use]
    pub fn sphere(center: Vec3, radius: f32, tags: SurfaceTags) -> Self {
        Self::new(
            Shape::Sphere {
                center,
                radius: radius.abs(),
            },
            tags,
        )
    }
}
