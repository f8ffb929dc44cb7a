//! Static collision world.
//!
//! The scene is a flat ground plane plus a handful of axis-aligned boxes
//! (platforms, crates). This module owns those shapes as a `World` resource
//! and answers the two spatial queries the game needs: a sphere-overlap test
//! for the per-tick ground check and a ray intersection used to occlude the
//! pickup raycast. No physics engine is involved; everything is analytic.

use bevy::prelude::*;

/// Axis-aligned box collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Build from a center point and half-extents.
    #[must_use]
    pub fn from_center_half(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Closest point on the box surface (or inside) to `p`.
    #[must_use]
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        p.clamp(self.min, self.max)
    }

    /// Does a sphere at `center` with `radius` touch this box?
    #[must_use]
    pub fn overlaps_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.closest_point(center).distance_squared(center) <= radius * radius
    }

    /// Box-vs-box overlap test.
    #[must_use]
    pub fn overlaps_aabb(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Slab-method ray test. Returns the entry distance along `dir` when the
    /// ray hits within `max_distance`. `dir` must be normalized. A ray that
    /// starts inside the box reports distance 0.
    #[must_use]
    pub fn ray_intersect(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<f32> {
        let mut t_min = 0.0_f32;
        let mut t_max = max_distance;

        for axis in 0..3 {
            let o = origin[axis];
            let d = dir[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);
            if d.abs() < 1e-8 {
                // Parallel to the slab: miss unless the origin lies inside it.
                if o < lo || o > hi {
                    return None;
                }
            } else {
                let inv = 1.0 / d;
                let (t0, t1) = {
                    let a = (lo - o) * inv;
                    let b = (hi - o) * inv;
                    if a <= b { (a, b) } else { (b, a) }
                };
                t_min = t_min.max(t0);
                t_max = t_max.min(t1);
                if t_min > t_max {
                    return None;
                }
            }
        }

        Some(t_min)
    }
}

/// Static collider set for the scene: one infinite walkable ground plane at
/// `ground_height` plus axis-aligned boxes.
#[derive(Resource, Debug, Clone)]
pub struct World {
    pub ground_height: f32,
    pub colliders: Vec<Aabb>,
}

impl Default for World {
    fn default() -> Self {
        Self {
            ground_height: 0.0,
            colliders: Vec::new(),
        }
    }
}

impl World {
    #[must_use]
    pub fn new(ground_height: f32) -> Self {
        Self {
            ground_height,
            colliders: Vec::new(),
        }
    }

    pub fn add_collider(&mut self, aabb: Aabb) {
        self.colliders.push(aabb);
    }

    /// Sphere-overlap query against walkable geometry. This is the once-per-
    /// tick ground check: a small sphere at the player's feet.
    #[must_use]
    pub fn sphere_overlaps(&self, center: Vec3, radius: f32) -> bool {
        if center.y - radius <= self.ground_height {
            return true;
        }
        self.colliders
            .iter()
            .any(|c| c.overlaps_sphere(center, radius))
    }

    /// Ground probe: the feet sphere must touch walkable geometry and the
    /// supporting surface under the feet must sit within `radius` of them.
    /// Side or corner contact with a box (a wall graze) is not support.
    #[must_use]
    pub fn grounded(&self, feet: Vec3, radius: f32) -> bool {
        self.sphere_overlaps(feet, radius) && feet.y - self.surface_height_at(feet) <= radius
    }

    /// Nearest ray hit against the ground plane and all box colliders.
    /// Returns the hit distance along `dir` (normalized) if within
    /// `max_distance`. Used to let level geometry occlude pickups.
    #[must_use]
    pub fn raycast(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<f32> {
        let mut nearest: Option<f32> = None;

        // Ground plane y = ground_height, only when pointing down toward it.
        if dir.y.abs() > 1e-8 {
            let t = (self.ground_height - origin.y) / dir.y;
            if t >= 0.0 && t <= max_distance {
                nearest = Some(t);
            }
        }

        for c in &self.colliders {
            if let Some(t) = c.ray_intersect(origin, dir, max_distance) {
                if nearest.is_none_or(|n| t < n) {
                    nearest = Some(t);
                }
            }
        }

        nearest
    }

    /// Would a body box (player torso) placed at `center` with `half`
    /// extents intersect any static collider? The ground plane is excluded;
    /// vertical motion handles it separately.
    #[must_use]
    pub fn body_overlaps(&self, center: Vec3, half: Vec3) -> bool {
        let body = Aabb::from_center_half(center, half);
        self.colliders.iter().any(|c| c.overlaps_aabb(&body))
    }

    /// Height of the highest walkable surface at or slightly above the feet
    /// and below `pos`, used to settle the player or dropped items onto the
    /// ground or a crate top. The 0.5 m tolerance forgives a frame of
    /// penetration before the position is corrected.
    #[must_use]
    pub fn surface_height_at(&self, pos: Vec3) -> f32 {
        let mut height = self.ground_height;
        for c in &self.colliders {
            let inside_xz = pos.x >= c.min.x
                && pos.x <= c.max.x
                && pos.z >= c.min.z
                && pos.z <= c.max.z;
            if inside_xz && c.max.y <= pos.y + 0.5 && c.max.y > height {
                height = c.max.y;
            }
        }
        height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_world() -> World {
        let mut w = World::new(0.0);
        w.add_collider(Aabb::from_center_half(
            Vec3::new(5.0, 0.5, 0.0),
            Vec3::new(1.0, 0.5, 1.0),
        ));
        w
    }

    #[test]
    fn feet_sphere_touches_ground_plane() {
        let w = test_world();
        assert!(w.sphere_overlaps(Vec3::new(0.0, 0.3, 0.0), 0.4));
        assert!(!w.sphere_overlaps(Vec3::new(0.0, 1.0, 0.0), 0.4));
    }

    #[test]
    fn feet_sphere_touches_crate_top() {
        let w = test_world();
        // standing on top of the crate at y=1
        assert!(w.sphere_overlaps(Vec3::new(5.0, 1.3, 0.0), 0.4));
        // hovering well above it
        assert!(!w.sphere_overlaps(Vec3::new(5.0, 2.0, 0.0), 0.4));
    }

    #[test]
    fn wall_graze_is_not_ground_support() {
        let w = test_world();
        // level with the crate top but past its edge: the feet sphere still
        // grazes the box side, yet nothing supports the player there
        let graze = Vec3::new(6.2, 1.0, 0.0);
        assert!(w.sphere_overlaps(graze, 0.4));
        assert!(!w.grounded(graze, 0.4));
        // directly on top it is support
        assert!(w.grounded(Vec3::new(5.0, 1.0, 0.0), 0.4));
    }

    #[test]
    fn ray_hits_box_front_face() {
        let b = Aabb::new(Vec3::new(-1.0, -1.0, 2.0), Vec3::new(1.0, 1.0, 4.0));
        let t = b
            .ray_intersect(Vec3::ZERO, Vec3::Z, 10.0)
            .expect("should hit");
        assert!((t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn ray_misses_box_beyond_range() {
        let b = Aabb::new(Vec3::new(-1.0, -1.0, 2.0), Vec3::new(1.0, 1.0, 4.0));
        assert!(b.ray_intersect(Vec3::ZERO, Vec3::Z, 1.5).is_none());
    }

    #[test]
    fn ray_parallel_to_slab_outside_misses() {
        let b = Aabb::new(Vec3::new(-1.0, -1.0, 2.0), Vec3::new(1.0, 1.0, 4.0));
        assert!(b.ray_intersect(Vec3::new(2.0, 0.0, 0.0), Vec3::Z, 10.0).is_none());
    }

    #[test]
    fn world_raycast_prefers_nearest_hit() {
        let mut w = World::new(0.0);
        w.add_collider(Aabb::new(Vec3::new(-1.0, 0.0, 3.0), Vec3::new(1.0, 2.0, 4.0)));
        w.add_collider(Aabb::new(Vec3::new(-1.0, 0.0, 6.0), Vec3::new(1.0, 2.0, 7.0)));
        let t = w
            .raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::Z, 20.0)
            .expect("hit");
        assert!((t - 3.0).abs() < 1e-5);
    }

    #[test]
    fn surface_height_picks_crate_top_under_position() {
        let w = test_world();
        assert_eq!(w.surface_height_at(Vec3::new(5.0, 3.0, 0.0)), 1.0);
        assert_eq!(w.surface_height_at(Vec3::new(0.0, 3.0, 0.0)), 0.0);
    }
}
