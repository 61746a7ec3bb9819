use std::f64::consts::PI;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use dresstour_shared::brush::{Mark, Shape, SPARKLE_STOPS};
use dresstour_shared::geometry::{Rect, CANVAS_HEIGHT, CANVAS_WIDTH};

pub fn paint_marks(ctx: &CanvasRenderingContext2d, marks: &[Mark]) -> Result<(), JsValue> {
    for mark in marks {
        ctx.save();
        let painted = paint_mark(ctx, mark);
        ctx.restore();
        painted?;
    }
    Ok(())
}

fn paint_mark(ctx: &CanvasRenderingContext2d, mark: &Mark) -> Result<(), JsValue> {
    ctx.set_global_composite_operation(mark.composite.operation())?;
    ctx.set_global_alpha(mark.alpha);
    if let Some(shadow) = mark.shadow {
        ctx.set_shadow_color(shadow.color);
        ctx.set_shadow_blur(shadow.blur);
        ctx.set_shadow_offset_x(shadow.offset);
        ctx.set_shadow_offset_y(shadow.offset);
    }
    match &mark.shape {
        Shape::Line {
            from,
            to,
            color,
            width,
            cap,
        } => {
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(*width);
            ctx.set_line_cap(cap.name());
            ctx.set_line_join("round");
            ctx.begin_path();
            ctx.move_to(from.x, from.y);
            ctx.line_to(to.x, to.y);
            ctx.stroke();
        }
        Shape::Square {
            center,
            size,
            color,
        } => {
            ctx.set_fill_style_str(color);
            ctx.fill_rect(center.x - size / 2.0, center.y - size / 2.0, *size, *size);
        }
        Shape::Ring {
            center,
            radius,
            color,
            width,
        } => {
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(*width);
            ctx.begin_path();
            ctx.arc(center.x, center.y, *radius, 0.0, PI * 2.0)?;
            ctx.stroke();
        }
        Shape::Cross {
            center,
            half,
            rotation,
            color,
            width,
        } => {
            ctx.translate(center.x, center.y)?;
            ctx.rotate(*rotation)?;
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(*width);
            ctx.begin_path();
            ctx.move_to(-half, 0.0);
            ctx.line_to(*half, 0.0);
            ctx.move_to(0.0, -half);
            ctx.line_to(0.0, *half);
            ctx.stroke();
        }
        Shape::Dot {
            center,
            radius,
            color,
        } => {
            ctx.set_fill_style_str(color);
            ctx.begin_path();
            ctx.arc(center.x, center.y, *radius, 0.0, PI * 2.0)?;
            ctx.fill();
        }
        Shape::Petal {
            center,
            radius_x,
            radius_y,
            rotation,
            color,
            width,
        } => {
            ctx.set_fill_style_str(color);
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(*width);
            ctx.begin_path();
            ctx.ellipse(center.x, center.y, *radius_x, *radius_y, *rotation, 0.0, PI * 2.0)?;
            ctx.fill();
            ctx.stroke();
        }
        Shape::Sparkle {
            center,
            size,
            rotation,
        } => {
            ctx.translate(center.x, center.y)?;
            ctx.rotate(*rotation)?;
            let gradient = ctx.create_radial_gradient(0.0, 0.0, 0.0, 0.0, 0.0, *size)?;
            for (offset, color) in SPARKLE_STOPS {
                gradient.add_color_stop(offset as f32, color)?;
            }
            ctx.set_fill_style_canvas_gradient(&gradient);
            ctx.begin_path();
            ctx.move_to(0.0, -size);
            ctx.line_to(size * 0.7, 0.0);
            ctx.line_to(0.0, *size);
            ctx.line_to(-size * 0.7, 0.0);
            ctx.close_path();
            ctx.fill();
        }
    }
    Ok(())
}

/// White fill first so transparent silhouettes never show through.
pub fn paint_background(ctx: &CanvasRenderingContext2d, image: &HtmlImageElement) -> Result<(), JsValue> {
    clear_background(ctx);
    ctx.draw_image_with_html_image_element_and_dw_and_dh(image, 0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT)
}

pub fn clear_background(ctx: &CanvasRenderingContext2d) {
    ctx.set_fill_style_str("white");
    ctx.fill_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);
}

pub fn clear_layer(ctx: &CanvasRenderingContext2d) {
    ctx.clear_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);
}

pub fn draw_overlay(
    ctx: &CanvasRenderingContext2d,
    image: &HtmlImageElement,
    rect: Rect,
) -> Result<(), JsValue> {
    ctx.draw_image_with_html_image_element_and_dw_and_dh(image, rect.x, rect.y, rect.width, rect.height)
}

pub fn draw_layer(ctx: &CanvasRenderingContext2d, layer: &HtmlCanvasElement) -> Result<(), JsValue> {
    ctx.draw_image_with_html_canvas_element(layer, 0.0, 0.0)
}
