/// SW3D Web - the software pipeline drawing onto an HTML canvas
///
/// The host page owns the animation loop: it calls [`WebRenderer::render`]
/// from `requestAnimationFrame` with the elapsed milliseconds.
use std::f64::consts::TAU;

use sw3d_core::{Scene, ScreenPoint, StepKind, Surface};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// A [`Surface`] over a 2D canvas context whose origin is already centred
pub struct CanvasSurface<'a> {
    context: &'a CanvasRenderingContext2d,
    width: u32,
    height: u32,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(context: &'a CanvasRenderingContext2d, width: u32, height: u32) -> Self {
        Self {
            context,
            width,
            height,
        }
    }
}

impl Surface for CanvasSurface<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_triangle(&mut self, p1: ScreenPoint, p2: ScreenPoint, p3: ScreenPoint, color: &str) {
        let ctx = self.context;
        ctx.begin_path();
        ctx.move_to(p1.x, p1.y);
        ctx.line_to(p2.x, p2.y);
        ctx.line_to(p3.x, p3.y);
        ctx.close_path();

        ctx.set_fill_style_str(color);
        ctx.fill();

        // stroking closes the hairline gaps between neighbouring triangles
        ctx.set_stroke_style_str(color);
        ctx.stroke();
    }

    fn stroke_line(&mut self, from: ScreenPoint, to: ScreenPoint, width: f64, color: &str) {
        let ctx = self.context;
        ctx.begin_path();
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(width);
        ctx.move_to(from.x, from.y);
        ctx.line_to(to.x, to.y);
        ctx.stroke();
    }

    fn fill_circle(&mut self, center: ScreenPoint, radius: f64, color: &str) {
        let ctx = self.context;
        ctx.begin_path();
        ctx.set_fill_style_str(color);
        if let Err(err) = ctx.arc(center.x, center.y, radius, 0.0, TAU) {
            warn!(?err, radius, "arc rejected");
            return;
        }
        ctx.fill();
    }

    fn fill_text(&mut self, position: ScreenPoint, text: &str, color: &str, font: &str) {
        let ctx = self.context;
        ctx.set_fill_style_str(color);
        ctx.set_font(font);
        if let Err(err) = ctx.fill_text(text, position.x, position.y) {
            warn!(?err, text, "fill_text rejected");
        }
    }
}

#[wasm_bindgen]
pub struct WebRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    scene: Scene,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Attach to the canvas with the given element id.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebRenderer, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;

        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id `{canvas_id}`")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("`{canvas_id}` is not a canvas")))?;

        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(WebRenderer {
            canvas,
            context,
            scene: Scene::default(),
        })
    }

    pub fn step_count() -> usize {
        StepKind::ALL.len()
    }

    /// Name of the step at `index` (0-based), for building a selector.
    pub fn step_name(index: usize) -> Option<String> {
        StepKind::ALL.get(index).map(|step| step.name().to_string())
    }

    pub fn step_message(index: usize) -> Option<String> {
        StepKind::ALL.get(index).map(|step| step.message().to_string())
    }

    /// Switch step by name or 1-based number.
    pub fn select_step(&mut self, step: &str) -> Result<(), JsValue> {
        let step = step
            .parse::<StepKind>()
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        self.scene.set_step(step);
        Ok(())
    }

    /// Draw one frame; `dt` is the time since the previous frame in milliseconds.
    pub fn render(&mut self, dt: f64) -> Result<(), JsValue> {
        let width = self.canvas.client_width().max(0) as u32;
        let height = self.canvas.client_height().max(0) as u32;

        // Assigning the size also resets the context transform.
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        let (half_width, half_height) = (f64::from(width) / 2.0, f64::from(height) / 2.0);
        self.context.translate(half_width, half_height)?;
        self.context
            .clear_rect(-half_width, -half_height, f64::from(width), f64::from(height));

        if width == 0 || height == 0 {
            return Ok(());
        }

        let mut surface = CanvasSurface::new(&self.context, width, height);
        self.scene
            .render(dt, &mut surface)
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    pub fn rotate(&mut self, horizontal: f64, vertical: f64) {
        self.scene.rotate(horizontal, vertical);
    }

    pub fn adjust_detail(&mut self, delta: i32) {
        self.scene.adjust_detail(delta);
    }

    pub fn toggle_fill(&mut self) {
        self.scene.toggle_fill();
    }

    pub fn cycle_line_width(&mut self) {
        self.scene.cycle_line_width();
    }

    pub fn toggle_points(&mut self) {
        self.scene.toggle_points();
    }

    pub fn toggle_vertex_numbers(&mut self) {
        self.scene.toggle_vertex_numbers();
    }

    /// Vertex count of the current step's mesh, once generated.
    pub fn vertex_count(&self) -> Option<u32> {
        self.scene.mesh_stats().map(|(vertices, _)| vertices as u32)
    }

    pub fn triangle_count(&self) -> Option<u32> {
        self.scene.mesh_stats().map(|(_, triangles)| triangles as u32)
    }
}
