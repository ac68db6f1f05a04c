/// Per-step configuration records
///
/// Every field has the demo's default value, and `#[serde(default)]` lets a
/// configuration file override only what it names. Angles are in degrees.
use serde::{Deserialize, Serialize};

use crate::render::{RenderOptions, Rgb};
use crate::transform::{Placement, RotationState};

/// Base color of most demo meshes.
pub const SKY_BLUE: Rgb = Rgb::new(0.0, 178.0, 255.0);
/// Sphere color in the animated scene.
pub const MINT: Rgb = Rgb::new(128.0, 255.0, 128.0);

/// Overlay and fill switches shared by the mesh steps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub point_width: f64,
    pub line_width: f64,
    pub show_vertex_numbers: bool,
    pub fill_triangles: bool,
}

impl DisplayOptions {
    pub const MAX_POINT_WIDTH: f64 = 10.0;
    pub const MAX_LINE_WIDTH: f64 = 5.0;

    /// Vertex markers only.
    pub fn points() -> Self {
        Self {
            point_width: Self::MAX_POINT_WIDTH,
            line_width: 0.0,
            show_vertex_numbers: false,
            fill_triangles: false,
        }
    }

    /// Filled triangles only.
    pub fn filled() -> Self {
        Self {
            point_width: 0.0,
            line_width: 0.0,
            show_vertex_numbers: false,
            fill_triangles: true,
        }
    }

    pub(crate) fn apply(&self, options: &mut RenderOptions) {
        options.point_width = self.point_width;
        options.line_width = self.line_width;
        options.show_point_numbers = self.show_vertex_numbers;
        options.fill_triangles = self.fill_triangles;
    }
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self::points()
    }
}

/// Translation, rotation (degrees) and uniform scale of one object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectConfig {
    pub translation: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: f64,
}

impl ObjectConfig {
    pub fn new(translation: [f64; 3], scale: f64) -> Self {
        Self {
            translation,
            rotation: [0.0; 3],
            scale,
        }
    }

    pub fn placement(&self) -> Placement {
        let [x, y, z] = self.rotation;
        Placement::new(self.translation, RotationState::from_degrees(x, y, z), self.scale)
    }

    /// Add to the rotation angles, wrapping into `0..360`.
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        for (angle, delta) in self.rotation.iter_mut().zip([dx, dy, dz]) {
            *angle = (*angle + delta).rem_euclid(360.0);
        }
    }
}

impl Default for ObjectConfig {
    fn default() -> Self {
        Self::new([0.0, 0.0, 200.0], 15.0)
    }
}

/// A point light orbiting the object it lights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightRig {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            position: [200.0, 200.0, -200.0],
            rotation: [0.0, 360.0, 0.0],
        }
    }
}

/// Step 1: a single point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointStep {
    pub point_size: f64,
    pub translation_x: f64,
    pub rotation_z: f64,
}

impl Default for PointStep {
    fn default() -> Self {
        Self {
            point_size: 10.0,
            translation_x: 0.0,
            rotation_z: 0.0,
        }
    }
}

/// Step 2: a regular polygon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolygonStep {
    pub display: DisplayOptions,
    pub point_count: usize,
    pub scale: f64,
    pub rotation_z: f64,
}

impl PolygonStep {
    pub const MAX_POINT_COUNT: usize = 12;
}

impl Default for PolygonStep {
    fn default() -> Self {
        Self {
            display: DisplayOptions::points(),
            point_count: 1,
            scale: 10.0,
            rotation_z: 180.0,
        }
    }
}

/// Steps 3 and 4: the cube, as squares or as triangles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeStep {
    pub display: DisplayOptions,
    pub fov: f64,
    pub object: ObjectConfig,
}

impl Default for CubeStep {
    fn default() -> Self {
        Self {
            display: DisplayOptions::points(),
            fov: 90.0,
            object: ObjectConfig::new([0.0, 0.0, 350.0], 15.0),
        }
    }
}

/// Step 5: a lit geodesic sphere
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereStep {
    pub display: DisplayOptions,
    pub subdivisions: u32,
    pub ambient_light: f64,
    pub light: LightRig,
    pub fov: f64,
    pub object: ObjectConfig,
}

impl SphereStep {
    pub const MAX_SUBDIVISIONS: u32 = 7;
}

impl Default for SphereStep {
    fn default() -> Self {
        Self {
            display: DisplayOptions::points(),
            subdivisions: 1,
            ambient_light: 0.0,
            light: LightRig::default(),
            fov: 90.0,
            object: ObjectConfig::new([0.0, 0.0, 200.0], 15.0),
        }
    }
}

/// The four numbers a torus mesh is generated from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorusParams {
    pub large_ring_radius: f64,
    pub small_ring_radius: f64,
    pub small_ring_divisions: usize,
    pub large_ring_divisions: usize,
}

impl TorusParams {
    pub const MAX_SMALL_RING_DIVISIONS: usize = 150;
    pub const MAX_LARGE_RING_DIVISIONS: usize = 200;
}

impl Default for TorusParams {
    fn default() -> Self {
        Self {
            large_ring_radius: 7.0,
            small_ring_radius: 2.0,
            small_ring_divisions: 50,
            large_ring_divisions: 100,
        }
    }
}

/// Step 6: a lit torus
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorusStep {
    pub display: DisplayOptions,
    pub torus: TorusParams,
    pub ambient_light: f64,
    pub light: LightRig,
    pub fov: f64,
    pub object: ObjectConfig,
}

impl Default for TorusStep {
    fn default() -> Self {
        Self {
            display: DisplayOptions::filled(),
            torus: TorusParams::default(),
            ambient_light: 0.0,
            light: LightRig::default(),
            fov: 90.0,
            object: ObjectConfig::new([0.0, 0.0, 250.0], 2.0),
        }
    }
}

/// Step 7: sphere and cube under a light that circles them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatedStep {
    pub display: DisplayOptions,
    pub ambient_light: f64,
    pub light_translation: [f64; 3],
    pub light_rotation: [f64; 3],
    pub fov: f64,
    pub sphere_subdivisions: u32,
    pub sphere: ObjectConfig,
    pub cube: ObjectConfig,
}

impl AnimatedStep {
    /// Full turns per second.
    pub const LIGHT_TURN_RATE: f64 = 0.25;
    pub const CUBE_TURN_RATE: f64 = 0.1;
    pub const SPHERE_TURN_RATE: f64 = 0.25;

    /// Advance the animation by `dt` milliseconds.
    pub fn animate(&mut self, dt: f64) {
        let degrees = |turns_per_second: f64| turns_per_second * 360.0 * dt / 1000.0;

        let light = degrees(Self::LIGHT_TURN_RATE);
        self.light_rotation[2] = (self.light_rotation[2] - light).rem_euclid(360.0);

        let cube = degrees(Self::CUBE_TURN_RATE);
        self.cube.rotate(cube, cube, cube);

        self.sphere.rotate(0.0, degrees(Self::SPHERE_TURN_RATE), 0.0);
    }
}

impl Default for AnimatedStep {
    fn default() -> Self {
        Self {
            display: DisplayOptions::filled(),
            ambient_light: 0.0,
            light_translation: [1.5, 0.0, 18.0],
            light_rotation: [0.0; 3],
            fov: 90.0,
            sphere_subdivisions: 3,
            sphere: ObjectConfig {
                translation: [1.4, 0.0, 20.0],
                rotation: [15.0, 0.0, 0.0],
                scale: 0.9,
            },
            cube: ObjectConfig::new([-1.2, 0.0, 20.0], 0.7),
        }
    }
}

/// Configuration of every step
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub point: PointStep,
    pub polygon: PolygonStep,
    pub cube_squares: CubeStep,
    pub cube_triangles: CubeStep,
    pub sphere: SphereStep,
    pub torus: TorusStep,
    pub animated: AnimatedStep,
}

impl SceneConfig {
    /// Pull mesh detail settings into the ranges the generators can afford.
    pub fn clamp_detail(&mut self) {
        let polygon = &mut self.polygon;
        polygon.point_count = polygon.point_count.clamp(1, PolygonStep::MAX_POINT_COUNT);

        self.sphere.subdivisions = self.sphere.subdivisions.min(SphereStep::MAX_SUBDIVISIONS);
        self.animated.sphere_subdivisions =
            self.animated.sphere_subdivisions.min(SphereStep::MAX_SUBDIVISIONS);

        let torus = &mut self.torus.torus;
        torus.small_ring_divisions = torus
            .small_ring_divisions
            .min(TorusParams::MAX_SMALL_RING_DIVISIONS);
        torus.large_ring_divisions = torus
            .large_ring_divisions
            .min(TorusParams::MAX_LARGE_RING_DIVISIONS);
    }
}
