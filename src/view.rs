//! Shared view geometry: field of view, ray indexing, depth buffers
//!
//! The renderer casts one ray per screen column and records the distance to
//! the nearest wall it hits. Combat reuses that buffer for occlusion tests,
//! so both sides must agree on the projection (field of view and ray count)
//! the buffer was built with. The buffer therefore carries its projection.

use std::f32::consts::{FRAC_PI_3, PI, TAU};

use serde::{Deserialize, Serialize};

/// Wrap an angle into `[-PI, PI)`
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Field-of-view configuration shared with the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Full horizontal field of view in radians
    pub fov: f32,
    /// Number of rays cast across the field of view
    pub ray_count: usize,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov: FRAC_PI_3,
            ray_count: 800,
        }
    }
}

impl Projection {
    /// Create a projection
    #[must_use]
    pub fn new(fov: f32, ray_count: usize) -> Self {
        Self { fov, ray_count }
    }

    /// Half of the field of view
    #[must_use]
    pub fn half_fov(&self) -> f32 {
        self.fov * 0.5
    }

    /// Depth-buffer index for a bearing relative to the view direction.
    ///
    /// The bearing must already be wrapped into `[-PI, PI)`. Bearings outside
    /// the field of view clamp to the nearest edge ray.
    #[must_use]
    pub fn ray_index(&self, rel_bearing: f32) -> usize {
        if self.ray_count == 0 || self.fov <= 0.0 {
            return 0;
        }
        let scaled = (rel_bearing + self.half_fov()) / self.fov * self.ray_count as f32;
        (scaled.round() as i64).clamp(0, self.ray_count as i64 - 1) as usize
    }
}

/// Per-ray nearest-wall distances for one rendered frame
#[derive(Debug, Clone)]
pub struct DepthBuffer {
    projection: Projection,
    distances: Vec<f32>,
}

impl DepthBuffer {
    /// Create a depth buffer from the projection it was rendered with
    #[must_use]
    pub fn new(projection: Projection, distances: Vec<f32>) -> Self {
        Self {
            projection,
            distances,
        }
    }

    /// The projection the buffer was built with
    #[must_use]
    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Wall distance for a ray index.
    ///
    /// Rays the renderer did not fill read as infinitely far, so nothing is
    /// ever occluded by a missing sample.
    #[must_use]
    pub fn wall_distance(&self, ray: usize) -> f32 {
        self.distances.get(ray).copied().unwrap_or(f32::INFINITY)
    }

    /// Whether a target at `distance` along `rel_bearing` is hidden by a wall
    #[must_use]
    pub fn occludes(&self, rel_bearing: f32, distance: f32) -> bool {
        distance >= self.wall_distance(self.projection.ray_index(rel_bearing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_angle_range() {
        assert!((wrap_angle(0.0)).abs() < 1e-6);
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < 1e-5);
        assert!((wrap_angle(-TAU - 0.5) + 0.5).abs() < 1e-5);
        assert!((wrap_angle(PI) + PI).abs() < 1e-5); // PI wraps to -PI
    }

    #[test]
    fn test_ray_index_spans_fov() {
        let proj = Projection::new(FRAC_PI_3, 100);
        assert_eq!(proj.ray_index(-proj.half_fov()), 0);
        assert_eq!(proj.ray_index(proj.half_fov()), 99); // clamped top edge
        assert_eq!(proj.ray_index(0.0), 50);
    }

    #[test]
    fn test_ray_index_clamps_outside_fov() {
        let proj = Projection::new(FRAC_PI_3, 100);
        assert_eq!(proj.ray_index(-PI), 0);
        assert_eq!(proj.ray_index(PI), 99);
    }

    #[test]
    fn test_missing_samples_never_occlude() {
        let buffer = DepthBuffer::new(Projection::new(FRAC_PI_3, 4), vec![2.0]);
        assert_eq!(buffer.wall_distance(3), f32::INFINITY);
        assert!(!buffer.occludes(0.25, 1000.0));
    }

    #[test]
    fn test_occlusion_is_strict() {
        let buffer = DepthBuffer::new(Projection::new(FRAC_PI_3, 1), vec![5.0]);
        assert!(buffer.occludes(0.0, 5.0)); // equal distance counts as hidden
        assert!(!buffer.occludes(0.0, 4.99));
    }
}
