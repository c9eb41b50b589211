//! Canvas 2D backing for [`DrawSurface`]
//!
//! Browser-only. Draw errors (degenerate radii, detached contexts) are
//! swallowed: a failed primitive must never take down the frame loop.

use std::f64::consts::TAU;

use glam::DVec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::render::surface::{DrawSurface, Fill, GlowFill, Stroke};

/// [`DrawSurface`] over an HTML canvas 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2D context of `canvas`.
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Resize the backing store (clears the canvas as a side effect).
    pub fn set_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn reset_shadow(&self) {
        self.ctx.set_shadow_blur(0.0);
        self.ctx.set_shadow_color("transparent");
    }
}

impl DrawSurface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn line(&mut self, from: DVec2, to: DVec2, stroke: &Stroke) {
        self.ctx.set_global_alpha(stroke.alpha);
        self.ctx.set_stroke_style_str(stroke.color);
        self.ctx.set_line_width(stroke.width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn stroke_arc(
        &mut self,
        center: DVec2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        stroke: &Stroke,
    ) {
        self.ctx.set_global_alpha(stroke.alpha);
        self.ctx.set_stroke_style_str(stroke.color);
        self.ctx.set_line_width(stroke.width);
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x, center.y, radius, start_angle, end_angle)
            .is_ok()
        {
            self.ctx.stroke();
        }
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, fill: &Fill) {
        self.ctx.set_global_alpha(fill.alpha);
        self.ctx.set_fill_style_str(fill.color);
        self.ctx.begin_path();
        if self.ctx.arc(center.x, center.y, radius, 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
    }

    fn fill_circle_glow(&mut self, center: DVec2, radius: f64, glow: &GlowFill) {
        let Ok(gradient) = self.ctx.create_radial_gradient(
            center.x,
            center.y,
            0.0,
            center.x,
            center.y,
            glow.gradient_radius.max(f64::EPSILON),
        ) else {
            return;
        };
        if gradient.add_color_stop(0.0, glow.inner).is_err()
            || gradient.add_color_stop(1.0, glow.outer).is_err()
        {
            return;
        }

        self.ctx.set_global_alpha(glow.alpha);
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.set_shadow_color(glow.shadow_color);
        self.ctx.set_shadow_blur(glow.shadow_blur);
        self.ctx.begin_path();
        if self.ctx.arc(center.x, center.y, radius, 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
        self.reset_shadow();
    }
}
