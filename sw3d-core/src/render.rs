/// The geometry rasterization pipeline
///
/// [`draw_geometry`] transforms and projects a mesh, orders its faces back to
/// front (painter's algorithm), shades or culls each face, then optionally
/// overlays the wireframe, vertex markers and vertex numbers.
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::Result;
use crate::geometry::{Face, Mesh, Triangle};
use crate::matrix::Matrix;
use crate::projection::{project_to_screen, ScreenPoint};
use crate::surface::Surface;
use crate::vector::{self, Vector4};

/// Direction the viewer looks along for backface culling.
const VIEW_DIRECTION: Vector4 = Vector4::new(0.0, 0.0, -1.0, 1.0);

/// An RGB triple with channels nominally in `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Every channel multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    /// CSS `rgb(r,g,b)` string with each channel clamped to `0..=255`.
    pub fn to_css(&self) -> String {
        let clamp = |c: f64| c.clamp(0.0, 255.0);
        format!("rgb({},{},{})", clamp(self.r), clamp(self.g), clamp(self.b))
    }
}

/// How filled triangles get their color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FaceColor {
    /// Used as is, never shaded.
    Flat(String),
    /// Shaded by the light when one is set, flat otherwise.
    Lit(Rgb),
}

/// Per-call settings for [`draw_geometry`]
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Model transform applied to every vertex.
    pub transforms: Matrix,
    /// Projection applied after `transforms`.
    pub projection: Matrix,
    pub fill_triangles: bool,
    /// Without a color, filling draws nothing.
    pub color: Option<FaceColor>,
    /// Light position in the same space as the transformed vertices.
    pub light_position: Option<Vector4>,
    /// Added to the light coefficient before clamping.
    pub ambient_light: f64,
    pub line_width: f64,
    pub line_color: String,
    /// Radius of vertex markers; zero hides them.
    pub point_width: f64,
    pub point_color: String,
    pub show_point_numbers: bool,
    pub point_number_color: String,
    pub point_number_font: String,
}

impl RenderOptions {
    pub fn new(transforms: Matrix, projection: Matrix) -> Self {
        Self {
            transforms,
            projection,
            fill_triangles: false,
            color: None,
            light_position: None,
            ambient_light: 0.0,
            line_width: 0.0,
            line_color: "white".to_string(),
            point_width: 0.0,
            point_color: "white".to_string(),
            show_point_numbers: false,
            point_number_color: "royalblue".to_string(),
            point_number_font: "30px Arial".to_string(),
        }
    }
}

/// Draw a mesh onto `surface`.
///
/// Fails only when the option matrices have the wrong shape. The mesh is
/// borrowed for this call and never modified.
pub fn draw_geometry(surface: &mut dyn Surface, mesh: &Mesh, options: &RenderOptions) -> Result<()> {
    let (width, height) = (surface.width(), surface.height());

    let mut transformed = Vec::with_capacity(mesh.vertex_count());
    let mut projected = Vec::with_capacity(mesh.vertex_count());

    for vertex in mesh.vertices() {
        let view = options.transforms.multiply(&Matrix::from_point(vertex))?;
        let mut clip = options.projection.multiply(&view)?;

        transformed.push(view.to_point()?);
        projected.push(project_to_screen(&mut clip, width, height)?);
    }

    if options.fill_triangles {
        draw_triangles(surface, &transformed, &projected, mesh.faces(), options);
    }

    if options.line_width > 0.0 {
        draw_lines(surface, &projected, mesh.faces(), options.line_width, &options.line_color);
    }

    if options.point_width > 0.0 {
        for point in &projected {
            surface.fill_circle(*point, options.point_width, &options.point_color);
        }
    }

    if options.show_point_numbers {
        for (index, point) in projected.iter().enumerate() {
            surface.fill_text(
                *point,
                &index.to_string(),
                &options.point_number_color,
                &options.point_number_font,
            );
        }
    }

    Ok(())
}

/// Face indices ordered farthest first by the sum of their vertices' z.
///
/// Ties keep mesh order. This is the painter's approximation: it can misorder
/// interpenetrating or very large triangles.
pub fn depth_order(transformed: &[Vector4], faces: &[Face]) -> Vec<usize> {
    let depth = |face: &Face| face.iter().map(|&i| transformed[i].z).sum::<f64>();

    let mut order: Vec<usize> = (0..faces.len()).collect();
    order.sort_by(|&a, &b| {
        depth(&faces[b])
            .partial_cmp(&depth(&faces[a]))
            .unwrap_or(Ordering::Equal)
    });
    order
}

/// Color of one face, or `None` when it is culled or has no color.
///
/// Faces whose normal points away from the viewer are culled. Lit colors are
/// shaded with `clamp(dot(light, normal) + ambient, 0, 1)` squared, measured
/// from the bounding-box centre of the face.
pub fn compute_color(transformed: &[Vector4], face: &Face, options: &RenderOptions) -> Option<String> {
    let triangle = Triangle::from_face(transformed, face);
    let normal = triangle.calculate_normal();

    if vector::dot(&VIEW_DIRECTION, &normal) < 0.0 {
        return None;
    }

    match (&options.color, &options.light_position) {
        (Some(FaceColor::Flat(color)), _) => Some(color.clone()),
        (Some(FaceColor::Lit(rgb)), Some(light)) => {
            let center = triangle.bounding_center();
            let light_vector = vector::normalize(&vector::subtract(light, &center));

            let light_coefficient =
                (vector::dot(&light_vector, &normal) + options.ambient_light).clamp(0.0, 1.0);
            let color_coefficient = light_coefficient * light_coefficient;

            Some(rgb.scaled(color_coefficient).to_css())
        }
        (Some(FaceColor::Lit(rgb)), None) => Some(rgb.to_css()),
        (None, _) => None,
    }
}

fn draw_triangles(
    surface: &mut dyn Surface,
    transformed: &[Vector4],
    projected: &[ScreenPoint],
    faces: &[Face],
    options: &RenderOptions,
) {
    let mut culled = 0usize;

    for index in depth_order(transformed, faces) {
        let face = &faces[index];

        match compute_color(transformed, face, options) {
            Some(color) => surface.fill_triangle(
                projected[face[0]],
                projected[face[1]],
                projected[face[2]],
                &color,
            ),
            None => culled += 1,
        }
    }

    trace!(faces = faces.len(), culled, "filled triangles");
}

fn draw_lines(surface: &mut dyn Surface, projected: &[ScreenPoint], faces: &[Face], width: f64, color: &str) {
    for face in faces {
        let [p0, p1, p2] = face.map(|i| projected[i]);

        surface.stroke_line(p0, p1, width, color);
        surface.stroke_line(p0, p2, width, color);
        surface.stroke_line(p1, p2, width, color);
    }
}
