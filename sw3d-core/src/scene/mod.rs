/// The demo steps and the driver that renders them
///
/// A [`Scene`] owns every step's configuration, the generated meshes and the
/// animation state. Frontends pick a [`StepKind`], forward user input through
/// the adjustment methods and call [`Scene::render`] once per frame.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

mod config;

pub use config::{
    AnimatedStep, CubeStep, DisplayOptions, LightRig, ObjectConfig, PointStep, PolygonStep,
    SceneConfig, SphereStep, TorusParams, TorusStep, MINT, SKY_BLUE,
};

use crate::cache::MeshCache;
use crate::error::{Error, Result};
use crate::geometry::{Mesh, CUBE_EDGES};
use crate::matrix::Matrix;
use crate::projection::{project_to_screen, Projection, ScreenPoint};
use crate::render::{draw_geometry, FaceColor, RenderOptions};
use crate::shapes;
use crate::surface::Surface;
use crate::transform::Transform;
use crate::vector::{point, Vector4};

const LIGHT_MARKER_SCALE: f64 = 0.07;
const LIGHT_MARKER_RADIUS: f64 = 10.0;
const LIGHT_MARKER_COLOR: &str = "yellow";
/// The cube's light sits this much closer to the viewer than the sphere's.
const CUBE_LIGHT_OFFSET: f64 = 200.0;

/// The demo steps, in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    #[default]
    Point,
    Polygon,
    CubeSquares,
    CubeTriangles,
    Sphere,
    Torus,
    AnimatedScene,
}

impl StepKind {
    pub const ALL: [StepKind; 7] = [
        StepKind::Point,
        StepKind::Polygon,
        StepKind::CubeSquares,
        StepKind::CubeTriangles,
        StepKind::Sphere,
        StepKind::Torus,
        StepKind::AnimatedScene,
    ];

    /// 1-based position in [`StepKind::ALL`].
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn from_number(number: usize) -> Option<Self> {
        number.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn name(self) -> &'static str {
        match self {
            StepKind::Point => "point",
            StepKind::Polygon => "polygon",
            StepKind::CubeSquares => "cube-squares",
            StepKind::CubeTriangles => "cube-triangles",
            StepKind::Sphere => "sphere",
            StepKind::Torus => "torus",
            StepKind::AnimatedScene => "animated-scene",
        }
    }

    /// One-line caption shown next to the step selector.
    pub fn message(self) -> &'static str {
        match self {
            StepKind::Point => "A point.",
            StepKind::Polygon => "A polygon.",
            StepKind::CubeSquares => "A cube made of squares.",
            StepKind::CubeTriangles => "A cube made of triangles.",
            StepKind::Sphere => "A geodesic sphere.",
            StepKind::Torus => "A torus.",
            StepKind::AnimatedScene => "An animated scene.",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StepKind {
    type Err = Error;

    /// Accepts a step name or its number.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(number) = s.parse::<usize>() {
            return Self::from_number(number).ok_or_else(|| Error::UnknownStep(s.to_string()));
        }

        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownStep(s.to_string()))
    }
}

/// Stateful driver of the demo steps
#[derive(Debug, Clone)]
pub struct Scene {
    config: SceneConfig,
    step: StepKind,
    point: Mesh,
    cube: Mesh,
    polygons: MeshCache<usize>,
    spheres: MeshCache<u32>,
    tori: MeshCache<TorusParams>,
    scene_spheres: MeshCache<u32>,
}

impl Scene {
    /// Detail settings outside the supported ranges are clamped.
    pub fn new(mut config: SceneConfig, step: StepKind) -> Self {
        config.clamp_detail();
        Self {
            config,
            step,
            point: Mesh::point(),
            cube: Mesh::cube(),
            polygons: MeshCache::new(),
            spheres: MeshCache::new(),
            tori: MeshCache::new(),
            scene_spheres: MeshCache::new(),
        }
    }

    pub fn step(&self) -> StepKind {
        self.step
    }

    pub fn set_step(&mut self, step: StepKind) {
        if step != self.step {
            debug!(from = %self.step, to = %step, "switching step");
            self.step = step;
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Vertex and face counts of the current step's mesh, once it exists.
    pub fn mesh_stats(&self) -> Option<(usize, usize)> {
        let mesh = match self.step {
            StepKind::Point => Some(&self.point),
            StepKind::Polygon => self.polygons.mesh(),
            StepKind::CubeSquares | StepKind::CubeTriangles => Some(&self.cube),
            StepKind::Sphere => self.spheres.mesh(),
            StepKind::Torus => self.tori.mesh(),
            StepKind::AnimatedScene => None,
        };
        mesh.map(|mesh| (mesh.vertex_count(), mesh.face_count()))
    }

    /// Draw the current step onto `surface`, then advance the animation by
    /// `dt` milliseconds. A zero `dt` leaves the animation where it is.
    pub fn render(&mut self, dt: f64, surface: &mut dyn Surface) -> Result<()> {
        let (width, height) = (surface.width(), surface.height());
        trace!(step = %self.step, width, height, dt, "rendering frame");

        match self.step {
            StepKind::Point => render_point(surface, &self.point, &self.config.point),
            StepKind::Polygon => {
                let step = &self.config.polygon;
                let mesh = self
                    .polygons
                    .get_or_build(&step.point_count, |&count| shapes::polygon(count));
                render_polygon(surface, mesh, step)
            }
            StepKind::CubeSquares => render_cube_squares(surface, &self.cube, &self.config.cube_squares),
            StepKind::CubeTriangles => {
                render_cube_triangles(surface, &self.cube, &self.config.cube_triangles)
            }
            StepKind::Sphere => {
                let step = &self.config.sphere;
                let mesh = self
                    .spheres
                    .get_or_build(&step.subdivisions, |&depth| shapes::geodesic_sphere(depth));
                let lit = LitObject {
                    display: &step.display,
                    object: &step.object,
                    light: &step.light,
                    ambient_light: step.ambient_light,
                    fov: step.fov,
                };
                render_lit(surface, mesh, &lit)
            }
            StepKind::Torus => {
                let step = &self.config.torus;
                let mesh = self.tori.get_or_build(&step.torus, |params| {
                    shapes::torus(
                        params.large_ring_radius,
                        params.small_ring_radius,
                        params.small_ring_divisions,
                        params.large_ring_divisions,
                    )
                });
                let lit = LitObject {
                    display: &step.display,
                    object: &step.object,
                    light: &step.light,
                    ambient_light: step.ambient_light,
                    fov: step.fov,
                };
                render_lit(surface, mesh, &lit)
            }
            StepKind::AnimatedScene => {
                let step = &mut self.config.animated;
                let sphere = self
                    .scene_spheres
                    .get_or_build(&step.sphere_subdivisions, |&depth| shapes::geodesic_sphere(depth));
                render_animated(surface, sphere, &self.cube, step)?;

                if dt != 0.0 {
                    step.animate(dt);
                }
                Ok(())
            }
        }
    }

    /// Turn the current step's object by the given angles in degrees.
    ///
    /// Horizontal input turns around y and vertical input around x. Flat
    /// steps only turn around z, and the animated scene swings its light.
    pub fn rotate(&mut self, horizontal: f64, vertical: f64) {
        let wrap = |angle: &mut f64, delta: f64| *angle = (*angle + delta).rem_euclid(360.0);

        match self.step {
            StepKind::Point => wrap(&mut self.config.point.rotation_z, horizontal),
            StepKind::Polygon => wrap(&mut self.config.polygon.rotation_z, horizontal),
            StepKind::CubeSquares => self.config.cube_squares.object.rotate(vertical, horizontal, 0.0),
            StepKind::CubeTriangles => {
                self.config.cube_triangles.object.rotate(vertical, horizontal, 0.0)
            }
            StepKind::Sphere => self.config.sphere.object.rotate(vertical, horizontal, 0.0),
            StepKind::Torus => self.config.torus.object.rotate(vertical, horizontal, 0.0),
            StepKind::AnimatedScene => {
                let light = &mut self.config.animated.light_rotation;
                wrap(&mut light[1], horizontal);
                wrap(&mut light[0], vertical);
            }
        }
    }

    /// Raise or lower the current step's level of detail.
    ///
    /// Moves the point sideways on the first step. Steps without a detail
    /// setting ignore the call.
    pub fn adjust_detail(&mut self, delta: i32) {
        let nudge = |value: usize, delta: i32, max: usize| {
            (value as i64 + i64::from(delta)).clamp(0, max as i64) as usize
        };

        match self.step {
            StepKind::Point => {
                let step = &mut self.config.point;
                step.translation_x = (step.translation_x + f64::from(delta)).clamp(-20.0, 20.0);
            }
            StepKind::Polygon => {
                let step = &mut self.config.polygon;
                step.point_count = nudge(step.point_count, delta, PolygonStep::MAX_POINT_COUNT).max(1);
            }
            StepKind::Sphere => {
                let step = &mut self.config.sphere;
                step.subdivisions = nudge(
                    step.subdivisions as usize,
                    delta,
                    SphereStep::MAX_SUBDIVISIONS as usize,
                ) as u32;
            }
            StepKind::Torus => {
                let torus = &mut self.config.torus.torus;
                torus.small_ring_divisions = nudge(
                    torus.small_ring_divisions,
                    delta,
                    TorusParams::MAX_SMALL_RING_DIVISIONS,
                );
                torus.large_ring_divisions = nudge(
                    torus.large_ring_divisions,
                    delta * 2,
                    TorusParams::MAX_LARGE_RING_DIVISIONS,
                );
            }
            StepKind::CubeSquares | StepKind::CubeTriangles | StepKind::AnimatedScene => {}
        }
    }

    /// Overlay switches of the current step; the point step has none.
    pub fn display_mut(&mut self) -> Option<&mut DisplayOptions> {
        match self.step {
            StepKind::Point => None,
            StepKind::Polygon => Some(&mut self.config.polygon.display),
            StepKind::CubeSquares => Some(&mut self.config.cube_squares.display),
            StepKind::CubeTriangles => Some(&mut self.config.cube_triangles.display),
            StepKind::Sphere => Some(&mut self.config.sphere.display),
            StepKind::Torus => Some(&mut self.config.torus.display),
            StepKind::AnimatedScene => Some(&mut self.config.animated.display),
        }
    }

    pub fn toggle_fill(&mut self) {
        if let Some(display) = self.display_mut() {
            display.fill_triangles = !display.fill_triangles;
        }
    }

    /// Step the wireframe width through `0..=MAX_LINE_WIDTH`.
    pub fn cycle_line_width(&mut self) {
        if let Some(display) = self.display_mut() {
            display.line_width = (display.line_width + 1.0) % (DisplayOptions::MAX_LINE_WIDTH + 1.0);
        }
    }

    pub fn toggle_points(&mut self) {
        match self.display_mut() {
            Some(display) => {
                display.point_width = if display.point_width > 0.0 {
                    0.0
                } else {
                    DisplayOptions::MAX_POINT_WIDTH
                };
            }
            None => {
                let step = &mut self.config.point;
                step.point_size = if step.point_size > 0.0 {
                    0.0
                } else {
                    DisplayOptions::MAX_POINT_WIDTH
                };
            }
        }
    }

    pub fn toggle_vertex_numbers(&mut self) {
        if let Some(display) = self.display_mut() {
            display.show_vertex_numbers = !display.show_vertex_numbers;
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default(), StepKind::default())
    }
}

/// The parts of a step that a lit single-object render needs
struct LitObject<'a> {
    display: &'a DisplayOptions,
    object: &'a ObjectConfig,
    light: &'a LightRig,
    ambient_light: f64,
    fov: f64,
}

fn projection_for(surface: &dyn Surface, fov: f64) -> Matrix {
    Projection::with_fov(fov, surface.width(), surface.height()).matrix()
}

fn base_options(display: &DisplayOptions, transforms: Matrix, projection: Matrix) -> RenderOptions {
    let mut options = RenderOptions::new(transforms, projection);
    display.apply(&mut options);
    options
}

fn project_point(
    transforms: &Matrix,
    projection: &Matrix,
    position: &Vector4,
    (width, height): (u32, u32),
) -> Result<ScreenPoint> {
    let view = transforms.multiply(&Matrix::from_point(position))?;
    let mut clip = projection.multiply(&view)?;
    project_to_screen(&mut clip, width, height)
}

fn draw_light_marker(
    surface: &mut dyn Surface,
    light_transforms: &Matrix,
    projection: &Matrix,
    light_position: &Vector4,
) -> Result<()> {
    let scale = Transform::scale(LIGHT_MARKER_SCALE, LIGHT_MARKER_SCALE, LIGHT_MARKER_SCALE);
    let marker = light_transforms.multiply(&scale)?;
    let size = (surface.width(), surface.height());
    let center = project_point(&marker, projection, light_position, size)?;
    surface.fill_circle(center, LIGHT_MARKER_RADIUS, LIGHT_MARKER_COLOR);
    Ok(())
}

fn render_point(surface: &mut dyn Surface, mesh: &Mesh, step: &PointStep) -> Result<()> {
    let transforms = Transform::rotation_z(step.rotation_z.to_radians())
        .multiply(&Transform::translation(step.translation_x, 0.0, 200.0))?;
    let projection = projection_for(surface, Projection::DEFAULT_FOV);
    let size = (surface.width(), surface.height());

    for vertex in mesh.vertices() {
        let center = project_point(&transforms, &projection, vertex, size)?;
        surface.fill_circle(center, step.point_size, "white");
    }
    Ok(())
}

fn render_polygon(surface: &mut dyn Surface, mesh: &Mesh, step: &PolygonStep) -> Result<()> {
    let transforms = Matrix::chain(
        &Transform::rotation_z(step.rotation_z.to_radians()),
        &[
            &Transform::translation(0.0, 0.0, 200.0),
            &Transform::scale(step.scale, step.scale, step.scale),
        ],
    )?;
    let projection = projection_for(surface, Projection::DEFAULT_FOV);

    let mut options = base_options(&step.display, transforms, projection);
    options.color = Some(FaceColor::Lit(SKY_BLUE));
    draw_geometry(surface, mesh, &options)
}

/// Cube corners and edges drawn straight from the projected vertices,
/// without faces.
fn render_cube_squares(surface: &mut dyn Surface, cube: &Mesh, step: &CubeStep) -> Result<()> {
    let transforms = step.object.placement().matrix()?;
    let projection = projection_for(surface, step.fov);
    let size = (surface.width(), surface.height());

    let projected = cube
        .vertices()
        .iter()
        .map(|vertex| project_point(&transforms, &projection, vertex, size))
        .collect::<Result<Vec<_>>>()?;

    let display = &step.display;
    if display.line_width > 0.0 {
        for [from, to] in CUBE_EDGES {
            surface.stroke_line(projected[from], projected[to], display.line_width, "white");
        }
    }

    for (index, corner) in projected.iter().enumerate() {
        surface.fill_circle(*corner, display.point_width, "white");
        if display.show_vertex_numbers {
            surface.fill_text(*corner, &index.to_string(), "royalblue", "30px Arial");
        }
    }
    Ok(())
}

fn render_cube_triangles(surface: &mut dyn Surface, cube: &Mesh, step: &CubeStep) -> Result<()> {
    let transforms = step.object.placement().matrix()?;
    let projection = projection_for(surface, step.fov);

    let mut options = base_options(&step.display, transforms, projection);
    options.color = Some(FaceColor::Lit(SKY_BLUE));
    draw_geometry(surface, cube, &options)
}

/// One object lit by a light orbiting its centre.
fn render_lit(surface: &mut dyn Surface, mesh: &Mesh, lit: &LitObject<'_>) -> Result<()> {
    let transforms = lit.object.placement().matrix()?;
    let projection = projection_for(surface, lit.fov);

    let [tx, ty, tz] = lit.object.translation;
    let [rx, ry, rz] = lit.light.rotation;
    let light_transforms = Matrix::chain(
        &Transform::translation(tx, ty, tz),
        &[
            &Transform::rotation_z(rz.to_radians()),
            &Transform::rotation_y(ry.to_radians()),
            &Transform::rotation_x(rx.to_radians()),
        ],
    )?;

    let [lx, ly, lz] = lit.light.position;
    let light_origin = point(lx, ly, lz);
    let light_position = light_transforms.transform_point(&light_origin)?;

    let mut options = base_options(lit.display, transforms, projection.clone());
    options.color = Some(FaceColor::Lit(SKY_BLUE));
    options.light_position = Some(light_position);
    options.ambient_light = lit.ambient_light;
    draw_geometry(surface, mesh, &options)?;

    draw_light_marker(surface, &light_transforms, &projection, &light_origin)
}

fn render_animated(
    surface: &mut dyn Surface,
    sphere: &Mesh,
    cube: &Mesh,
    step: &AnimatedStep,
) -> Result<()> {
    let projection = projection_for(surface, step.fov);

    let [rx, ry, rz] = step.light_rotation;
    let [lx, ly, lz] = step.light_translation;
    let light_transforms = Matrix::chain(
        &Transform::rotation_z(rz.to_radians()),
        &[
            &Transform::rotation_y(ry.to_radians()),
            &Transform::rotation_x(rx.to_radians()),
            &Transform::translation(lx, ly, lz),
        ],
    )?;

    let light_origin = point(0.0, 0.0, 0.0);
    let light_position = light_transforms.transform_point(&light_origin)?;

    let mut sphere_options =
        base_options(&step.display, step.sphere.placement().matrix()?, projection.clone());
    sphere_options.color = Some(FaceColor::Lit(MINT));
    sphere_options.light_position = Some(light_position);
    sphere_options.ambient_light = step.ambient_light;
    draw_geometry(surface, sphere, &sphere_options)?;

    let mut cube_light = light_position;
    cube_light.z -= CUBE_LIGHT_OFFSET;

    let mut cube_options =
        base_options(&step.display, step.cube.placement().matrix()?, projection.clone());
    cube_options.color = Some(FaceColor::Lit(SKY_BLUE));
    cube_options.light_position = Some(cube_light);
    cube_options.ambient_light = step.ambient_light;
    draw_geometry(surface, cube, &cube_options)?;

    draw_light_marker(surface, &light_transforms, &projection, &light_origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DisplayList, DrawCall};

    fn render(scene: &mut Scene, dt: f64) -> DisplayList {
        let mut list = DisplayList::new(800, 600);
        scene.render(dt, &mut list).unwrap();
        list
    }

    fn is_light_marker(call: &DrawCall) -> bool {
        matches!(call, DrawCall::Circle { radius, color, .. }
            if *radius == LIGHT_MARKER_RADIUS && color == LIGHT_MARKER_COLOR)
    }

    #[test]
    fn test_step_kind_parsing() {
        assert_eq!("sphere".parse::<StepKind>().unwrap(), StepKind::Sphere);
        assert_eq!("Cube-Squares".parse::<StepKind>().unwrap(), StepKind::CubeSquares);
        assert_eq!("7".parse::<StepKind>().unwrap(), StepKind::AnimatedScene);
        assert!("0".parse::<StepKind>().is_err());
        assert_eq!(
            "teapot".parse::<StepKind>(),
            Err(Error::UnknownStep("teapot".to_string()))
        );

        for kind in StepKind::ALL {
            assert_eq!(StepKind::from_number(kind.number()), Some(kind));
            assert_eq!(kind.to_string().parse::<StepKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_point_step_centered() {
        let mut scene = Scene::new(SceneConfig::default(), StepKind::Point);
        let list = render(&mut scene, 16.0);

        assert_eq!(
            list.calls(),
            &[DrawCall::Circle {
                center: ScreenPoint::new(0.0, 0.0),
                radius: 10.0,
                color: "white".to_string(),
            }]
        );
    }

    #[test]
    fn test_point_step_moves_right() {
        let mut scene = Scene::new(SceneConfig::default(), StepKind::Point);
        scene.adjust_detail(5);
        let list = render(&mut scene, 0.0);

        match &list.calls()[0] {
            DrawCall::Circle { center, .. } => assert!(center.x > 0.0),
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn test_point_rotation_turns_counterclockwise_on_screen() {
        let mut config = SceneConfig::default();
        config.point.translation_x = 5.0;
        config.point.rotation_z = 90.0;
        let mut scene = Scene::new(config, StepKind::Point);
        let list = render(&mut scene, 0.0);

        match &list.calls()[0] {
            DrawCall::Circle { center, .. } => {
                assert!(center.x.abs() < 1e-9);
                assert!(center.y < 0.0);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn test_loaded_detail_is_clamped() {
        let mut config = SceneConfig::default();
        config.sphere.subdivisions = 32;
        config.animated.sphere_subdivisions = 32;
        let scene = Scene::new(config, StepKind::Sphere);

        assert_eq!(scene.config().sphere.subdivisions, SphereStep::MAX_SUBDIVISIONS);
        assert_eq!(scene.config().animated.sphere_subdivisions, SphereStep::MAX_SUBDIVISIONS);
    }

    #[test]
    fn test_polygon_cache_follows_point_count() {
        let mut scene = Scene::new(SceneConfig::default(), StepKind::Polygon);
        render(&mut scene, 0.0);
        render(&mut scene, 0.0);
        assert_eq!(scene.polygons.builds(), 1);
        assert_eq!(scene.mesh_stats(), Some((1, 0)));

        scene.adjust_detail(5);
        let list = render(&mut scene, 0.0);
        assert_eq!(scene.polygons.builds(), 2);
        assert_eq!(scene.mesh_stats(), Some((7, 6)));
        assert_eq!(list.calls().len(), 7);

        scene.adjust_detail(100);
        assert_eq!(scene.config().polygon.point_count, PolygonStep::MAX_POINT_COUNT);
        scene.adjust_detail(-100);
        assert_eq!(scene.config().polygon.point_count, 1);
    }

    #[test]
    fn test_cube_squares_edges_and_labels() {
        let mut scene = Scene::new(SceneConfig::default(), StepKind::CubeSquares);
        scene.cycle_line_width();
        scene.toggle_vertex_numbers();
        let list = render(&mut scene, 0.0);

        assert_eq!(list.lines().count(), 12);
        let circles = list
            .calls()
            .iter()
            .filter(|call| matches!(call, DrawCall::Circle { .. }))
            .count();
        assert_eq!(circles, 8);
        assert!(matches!(&list.calls()[13], DrawCall::Text { text, .. } if text == "0"));
    }

    #[test]
    fn test_cube_triangles_culls_back_face() {
        let mut scene = Scene::new(SceneConfig::default(), StepKind::CubeTriangles);
        scene.toggle_fill();
        scene.toggle_points();
        let list = render(&mut scene, 0.0);

        // the back face is culled, edge-on side faces are kept
        let triangles: Vec<_> = list.triangles().collect();
        assert_eq!(triangles.len(), 10);
        assert!(triangles.iter().all(|(_, color)| *color == "rgb(0,178,255)"));
    }

    #[test]
    fn test_sphere_step_draws_light_marker_last() {
        let mut scene = Scene::new(SceneConfig::default(), StepKind::Sphere);
        let list = render(&mut scene, 0.0);

        assert_eq!(scene.mesh_stats(), Some((240, 80)));
        assert_eq!(list.calls().len(), 241);
        assert!(is_light_marker(&list.calls()[240]));
    }

    #[test]
    fn test_torus_step_is_lit() {
        let mut scene = Scene::new(SceneConfig::default(), StepKind::Torus);
        scene.adjust_detail(-40);
        let list = render(&mut scene, 0.0);

        let torus = scene.config().torus.torus;
        assert_eq!(torus.small_ring_divisions, 10);
        assert_eq!(torus.large_ring_divisions, 20);
        assert_eq!(scene.mesh_stats(), Some((11 * 21, 2 * 10 * 20)));

        assert!(list.triangles().count() > 0);
        assert!(list.triangles().any(|(_, color)| color != "rgb(0,178,255)"));
        assert!(list.calls().last().is_some_and(is_light_marker));
    }

    #[test]
    fn test_animated_scene_advances_only_with_time() {
        let mut scene = Scene::new(SceneConfig::default(), StepKind::AnimatedScene);
        let before = scene.config().animated;

        let list = render(&mut scene, 0.0);
        assert_eq!(scene.config().animated, before);
        assert!(list.triangles().any(|(_, color)| color.starts_with("rgb(")));
        assert!(list.calls().last().is_some_and(is_light_marker));
        assert_eq!(scene.scene_spheres.mesh().map(Mesh::face_count), Some(1280));

        render(&mut scene, 500.0);
        let after = scene.config().animated;
        assert!((after.sphere.rotation[1] - 45.0).abs() < 1e-9);
        assert!((after.light_rotation[2] - 315.0).abs() < 1e-9);
    }

    #[test]
    fn test_display_toggles() {
        let mut scene = Scene::new(SceneConfig::default(), StepKind::Sphere);
        scene.toggle_points();
        assert_eq!(scene.config().sphere.display.point_width, 0.0);

        for _ in 0..6 {
            scene.cycle_line_width();
        }
        assert_eq!(scene.config().sphere.display.line_width, 0.0);

        scene.set_step(StepKind::Point);
        assert!(scene.display_mut().is_none());
        scene.toggle_points();
        assert_eq!(scene.config().point.point_size, 0.0);
    }
}
