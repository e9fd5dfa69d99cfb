//! Solar-system backdrop: wireframe sun and planets with solid cores, orbit
//! rings, a ground grid and a star field.
//!
//! Geometry is generated once in local space. Each frame the planet transforms
//! are recomputed and the lines and core triangles re-emitted in world space;
//! the star field never moves and is uploaded once.

use crate::gpu::{LineVertex, StarInstance};
use glam::{Mat4, Quat, Vec3};
use rand::prelude::*;
use std::f32::consts::{PI, TAU};

// Group placement behind and below the heart
pub const GROUP_POSITION: [f32; 3] = [0.0, -8.0, -20.0];
pub const GROUP_TILT_X: f32 = 0.2;
pub const GROUP_SCALE: f32 = 1.2;

pub const ORBIT_SPEED_FACTOR: f32 = 0.1;
pub const PLANET_SPIN_PER_FRAME: f32 = 0.01;

pub const SUN_RADIUS: f32 = 4.0;
pub const SUN_COLOR: [f32; 3] = [1.0, 0.333, 0.0]; // #FF5500

pub const GRID_Y: f32 = -2.0;
pub const GRID_EXTENT: f32 = 100.0;
pub const GRID_CELL: f32 = 2.0;
pub const GRID_SECTION: f32 = 10.0;
pub const GRID_FADE_DISTANCE: f32 = 60.0;
pub const GRID_CELL_COLOR: [f32; 3] = [0.0, 0.267, 0.267]; // #004444
pub const GRID_SECTION_COLOR: [f32; 3] = [0.0, 0.533, 0.533]; // #008888

pub const STAR_COUNT: usize = 3000;
pub const STAR_RADIUS: f32 = 100.0;
pub const STAR_DEPTH: f32 = 50.0;
pub const STAR_FACTOR: f32 = 4.0; // base sprite size scale
pub const STAR_LIGHTNESS: f32 = 0.9; // fully desaturated
pub const STAR_SPEED: f32 = 1.0; // twinkle rate
pub const STAR_SIZE_SCALE: f32 = 30.0; // pixels per unit size at view distance 1
pub const STAR_TWINKLE_PHASE: f32 = 100.0;
pub const STAR_EDGE_SHARPNESS: f32 = 16.0;
pub const STAR_EDGE_RADIUS: f32 = 0.25;

pub const CORE_OPACITY: f32 = 0.8;

#[derive(Clone, Copy, Debug)]
pub struct Planet {
    pub name: &'static str,
    pub distance: f32,
    pub radius: f32,
    pub color: [f32; 3],
    pub speed: f32,
    pub has_ring: bool,
}

pub const PLANETS: [Planet; 6] = [
    Planet { name: "Mercury", distance: 10.0, radius: 0.4, color: [0.0, 1.0, 1.0], speed: 1.5, has_ring: false },
    Planet { name: "Venus", distance: 15.0, radius: 0.6, color: [0.0, 1.0, 1.0], speed: 1.2, has_ring: false },
    Planet { name: "Earth", distance: 20.0, radius: 0.7, color: [0.0, 0.533, 1.0], speed: 1.0, has_ring: false },
    Planet { name: "Mars", distance: 25.0, radius: 0.5, color: [1.0, 0.0, 0.333], speed: 0.8, has_ring: false },
    Planet { name: "Jupiter", distance: 35.0, radius: 1.5, color: [1.0, 0.6, 0.0], speed: 0.4, has_ring: false },
    Planet { name: "Saturn", distance: 45.0, radius: 1.2, color: [1.0, 0.8, 0.0], speed: 0.3, has_ring: true },
];

/// Orbit angle (radians about the group's Y axis) at elapsed time `t`.
#[inline]
pub fn orbit_angle(t: f32, speed: f32) -> f32 {
    t * speed * ORBIT_SPEED_FACTOR
}

fn sphere_point(radius: f32, width_segments: u32, height_segments: u32, u: u32, v: u32) -> Vec3 {
    let phi = u as f32 / width_segments as f32 * TAU;
    let theta = v as f32 / height_segments as f32 * PI;
    Vec3::new(
        -radius * phi.cos() * theta.sin(),
        radius * theta.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Star sprite diameter in pixels for a star of base `size` at view-space
/// depth `view_z` (negative in front of the camera).
#[inline]
pub fn star_point_size(size: f32, view_z: f32, time: f32) -> f32 {
    let twinkle = 3.0 + (time * STAR_SPEED + STAR_TWINKLE_PHASE).sin();
    size * (STAR_SIZE_SCALE / -view_z) * twinkle
}

/// Soft round sprite edge; `d` is the distance from the sprite center in [0, 0.5√2].
#[inline]
pub fn star_alpha(d: f32) -> f32 {
    1.0 / (1.0 + (STAR_EDGE_SHARPNESS * (d - STAR_EDGE_RADIUS)).exp())
}

/// Local-space line segments.
#[derive(Clone, Debug, Default)]
pub struct WireMesh {
    pub segments: Vec<[Vec3; 2]>,
}

impl WireMesh {
    /// Latitude/longitude wireframe of a UV sphere.
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let point = |u, v| sphere_point(radius, width_segments, height_segments, u, v);
        let mut segments = Vec::new();
        for v in 1..height_segments {
            for u in 0..width_segments {
                segments.push([point(u, v), point(u + 1, v)]);
            }
        }
        for u in 0..width_segments {
            for v in 0..height_segments {
                segments.push([point(u, v), point(u, v + 1)]);
            }
        }
        Self { segments }
    }

    /// Flat annulus in the XZ plane: inner and outer circles joined by spokes.
    pub fn ring(inner: f32, outer: f32, segments: u32) -> Self {
        let at = |r: f32, i: u32| {
            let a = i as f32 / segments as f32 * TAU;
            Vec3::new(r * a.cos(), 0.0, r * a.sin())
        };
        let mut out = Vec::with_capacity(segments as usize * 3);
        for i in 0..segments {
            out.push([at(inner, i), at(inner, i + 1)]);
            out.push([at(outer, i), at(outer, i + 1)]);
            out.push([at(inner, i), at(outer, i)]);
        }
        Self { segments: out }
    }

    /// Single circle in the XZ plane.
    pub fn circle(radius: f32, segments: u32) -> Self {
        let at = |i: u32| {
            let a = i as f32 / segments as f32 * TAU;
            Vec3::new(radius * a.cos(), 0.0, radius * a.sin())
        };
        Self {
            segments: (0..segments).map(|i| [at(i), at(i + 1)]).collect(),
        }
    }

    fn emit(&self, xf: &Mat4, color: [f32; 3], opacity: f32, out: &mut Vec<LineVertex>) {
        let color = [color[0], color[1], color[2], opacity];
        for [a, b] in &self.segments {
            for p in [a, b] {
                out.push(LineVertex {
                    position: xf.transform_point3(*p).to_array(),
                    fade: 0.0,
                    color,
                });
            }
        }
    }
}

/// Local-space filled triangles.
#[derive(Clone, Debug, Default)]
pub struct TriMesh {
    pub triangles: Vec<[Vec3; 3]>,
}

impl TriMesh {
    /// Solid UV sphere; the pole rows contribute one triangle per quad.
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let point = |u, v| sphere_point(radius, width_segments, height_segments, u, v);
        let mut triangles = Vec::new();
        for v in 0..height_segments {
            for u in 0..width_segments {
                let a = point(u + 1, v);
                let b = point(u, v);
                let c = point(u, v + 1);
                let d = point(u + 1, v + 1);
                if v != 0 {
                    triangles.push([a, b, d]);
                }
                if v != height_segments - 1 {
                    triangles.push([b, c, d]);
                }
            }
        }
        Self { triangles }
    }

    fn emit(&self, xf: &Mat4, color: [f32; 3], opacity: f32, out: &mut Vec<LineVertex>) {
        let color = [color[0], color[1], color[2], opacity];
        for tri in &self.triangles {
            for p in tri {
                out.push(LineVertex {
                    position: xf.transform_point3(*p).to_array(),
                    fade: 0.0,
                    color,
                });
            }
        }
    }
}

struct PlanetMeshes {
    shell: WireMesh,
    core: TriMesh,
    ring: Option<WireMesh>,
    orbit: WireMesh,
}

pub struct SolarSystem {
    group: Mat4,
    sun: WireMesh,
    planets: Vec<PlanetMeshes>,
    grid: Vec<LineVertex>,
    stars: Vec<StarInstance>,
    spin: f32,
}

impl SolarSystem {
    pub fn new(seed: u64) -> Self {
        let group = group_matrix();
        let planets = PLANETS
            .iter()
            .map(|p| PlanetMeshes {
                shell: WireMesh::sphere(p.radius, 16, 16),
                core: TriMesh::sphere(p.radius * 0.5, 8, 8),
                ring: p
                    .has_ring
                    .then(|| WireMesh::ring(p.radius * 1.4, p.radius * 2.0, 32)),
                orbit: WireMesh::circle(p.distance, 64),
            })
            .collect();
        Self {
            group,
            sun: WireMesh::sphere(SUN_RADIUS, 24, 24),
            planets,
            grid: grid_lines(&group),
            stars: star_points(&group, seed),
            spin: 0.0,
        }
    }

    /// Static star sprites (world space).
    pub fn stars(&self) -> &[StarInstance] {
        &self.stars
    }

    /// Advance per-frame state (planet self spin).
    pub fn advance(&mut self) {
        self.spin += PLANET_SPIN_PER_FRAME;
    }

    /// World-space center of planet `i` at elapsed time `t`.
    pub fn planet_center(&self, i: usize, t: f32) -> Option<Vec3> {
        let p = PLANETS.get(i)?;
        Some(self.group.transform_point3(planet_local(p, t)))
    }

    /// Re-emit every line for time `t` into `out` (cleared first).
    pub fn write_lines(&self, t: f32, out: &mut Vec<LineVertex>) {
        out.clear();
        out.extend_from_slice(&self.grid);
        self.sun.emit(&self.group, SUN_COLOR, 0.5, out);
        for (p, meshes) in PLANETS.iter().zip(&self.planets) {
            let system = self.orbit_matrix(p, t);
            meshes.orbit.emit(&system, p.color, 0.1, out);
            let body = self.body_matrix(p, t);
            meshes.shell.emit(&body, p.color, 0.3, out);
            if let Some(ring) = &meshes.ring {
                ring.emit(&body, p.color, 0.2, out);
            }
        }
    }

    /// Re-emit the solid planet cores for time `t` into `out` (cleared first).
    pub fn write_triangles(&self, t: f32, out: &mut Vec<LineVertex>) {
        out.clear();
        for (p, meshes) in PLANETS.iter().zip(&self.planets) {
            meshes
                .core
                .emit(&self.body_matrix(p, t), p.color, CORE_OPACITY, out);
        }
    }

    fn orbit_matrix(&self, p: &Planet, t: f32) -> Mat4 {
        self.group * Mat4::from_rotation_y(orbit_angle(t, p.speed))
    }

    fn body_matrix(&self, p: &Planet, t: f32) -> Mat4 {
        self.orbit_matrix(p, t)
            * Mat4::from_translation(Vec3::new(p.distance, 0.0, 0.0))
            * Mat4::from_rotation_y(self.spin)
    }
}

fn group_matrix() -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::splat(GROUP_SCALE),
        Quat::from_rotation_x(GROUP_TILT_X),
        Vec3::from(GROUP_POSITION),
    )
}

fn planet_local(p: &Planet, t: f32) -> Vec3 {
    Quat::from_rotation_y(orbit_angle(t, p.speed)) * Vec3::new(p.distance, 0.0, 0.0)
}

fn grid_lines(group: &Mat4) -> Vec<LineVertex> {
    let half = GRID_EXTENT * 0.5;
    let steps = (GRID_EXTENT / GRID_CELL).round() as i32;
    let per_section = (GRID_SECTION / GRID_CELL).round() as i32;
    let mut out = Vec::with_capacity((steps as usize + 1) * 4);
    for i in 0..=steps {
        let c = -half + i as f32 * GRID_CELL;
        let color = if i % per_section == 0 {
            GRID_SECTION_COLOR
        } else {
            GRID_CELL_COLOR
        };
        let color = [color[0], color[1], color[2], 1.0];
        for [a, b] in [
            [Vec3::new(c, GRID_Y, -half), Vec3::new(c, GRID_Y, half)],
            [Vec3::new(-half, GRID_Y, c), Vec3::new(half, GRID_Y, c)],
        ] {
            for p in [a, b] {
                out.push(LineVertex {
                    position: group.transform_point3(p).to_array(),
                    fade: GRID_FADE_DISTANCE,
                    color,
                });
            }
        }
    }
    out
}

fn star_points(group: &Mat4, seed: u64) -> Vec<StarInstance> {
    let mut rng = StdRng::seed_from_u64(seed ^ 0x5354_4152); // "STAR"
    (0..STAR_COUNT)
        .map(|_| {
            let r = STAR_RADIUS + STAR_DEPTH * rng.gen::<f32>();
            let theta = rng.gen::<f32>() * TAU;
            let phi = (rng.gen::<f32>() * 2.0 - 1.0).acos();
            let local = Vec3::new(
                r * phi.sin() * theta.cos(),
                r * phi.cos(),
                r * phi.sin() * theta.sin(),
            );
            let size = (0.5 + 0.5 * rng.gen::<f32>()) * STAR_FACTOR;
            StarInstance {
                position: group.transform_point3(local).to_array(),
                size,
                color: [STAR_LIGHTNESS, STAR_LIGHTNESS, STAR_LIGHTNESS, 1.0],
            }
        })
        .collect()
}
