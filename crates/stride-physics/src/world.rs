//! Static collider world answering ray queries.

use serde::{Deserialize, Serialize};

use crate::ray::{PhysicsQuery, Ray, RayHit};
use crate::shape::Collider;

/// An ordered collection of static colliders.
///
/// Colliders are tested in insertion order; when two hits are at exactly the
/// same distance the earlier collider wins, so queries are deterministic.
///
/// # Example
///
/// ```
/// use glam::Vec3;
/// use stride_physics::{Collider, PhysicsQuery, Ray, StaticWorld, SurfaceTags};
///
/// let mut world = StaticWorld::new();
/// world.add(Collider::ground_plane(0.0));
/// world.add(Collider::block(
///     Vec3::new(-1.0, 0.0, -1.0),
///     Vec3::new(1.0, 1.0, 1.0),
///     SurfaceTags::WALL,
/// ));
///
/// // The block top is nearer than the ground underneath it.
/// let hit = world.raycast(&Ray::down(Vec3::new(0.0, 3.0, 0.0)), f32::INFINITY).unwrap();
/// assert!(hit.tags.contains(SurfaceTags::WALL));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticWorld {
    colliders: Vec<Collider>,
}

impl StaticWorld {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a world from a list of colliders.
    #[must_use]
    pub fn from_colliders(colliders: Vec<Collider>) -> Self {
        Self { colliders }
    }

    /// Adds a collider and returns its index.
    pub fn add(&mut self, collider: Collider) -> usize {
        self.colliders.push(collider);
        self.colliders.len() - 1
    }

    /// Number of colliders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Returns `true` if the world has no colliders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Iterates colliders in insertion order.
    pub fn colliders(&self) -> impl Iterator<Item = &Collider> {
        self.colliders.iter()
    }
}

impl PhysicsQuery for StaticWorld {
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;
        for collider in &self.colliders {
            let Some((distance, normal)) = collider.shape.intersect(ray) else {
                continue;
            };
            if distance > max_distance {
                continue;
            }
            // Strict comparison keeps the earliest collider on ties
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(RayHit {
                    point: ray.at(distance),
                    normal,
                    distance,
                    tags: collider.tags,
                });
            }
        }
        best
    }
}
