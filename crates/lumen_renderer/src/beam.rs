//! Beams of jittered rays for glossy and frosted surfaces.

use lumen_math::{Ray, Vec3};
use rand::RngCore;
use rand_distr::{Distribution, UnitDisc};

/// Spread `ray` into a beam of `count` rays.
///
/// The first ray is `ray` itself. The others aim at points jittered over a
/// disc of `radius` centered `distance` along the ray and perpendicular to
/// it. When `normal` is given, rays that cross to the other side of that
/// surface than `ray` are dropped, so the beam may hold fewer than `count`.
pub fn generate_beam(
    ray: &Ray,
    normal: Option<Vec3>,
    radius: f32,
    distance: f32,
    count: u32,
    rng: &mut dyn RngCore,
) -> Vec<Ray> {
    let mut rays = vec![*ray];
    if count <= 1 || radius <= 0.0 || distance <= 0.0 {
        return rays;
    }

    let dir = ray.direction();
    let (nx, ny) = dir.any_orthonormal_pair();
    let center = ray.at(distance);
    let nv = normal.map(|n| n.dot(dir));

    for _ in 1..count {
        let [x, y]: [f32; 2] = UnitDisc.sample(&mut *rng);
        let target = center + nx * (x * radius) + ny * (y * radius);
        let jittered = Ray::new(ray.origin(), target - ray.origin());

        if let (Some(n), Some(nv)) = (normal, nv) {
            if nv * n.dot(jittered.direction()) <= 0.0 {
                continue;
            }
        }
        rays.push(jittered);
    }

    rays
}
