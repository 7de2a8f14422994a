//! Software rasterizer for gauge scenes.
//!
//! This is the collaborator side of the engine: it consumes a [`Scene`] and
//! paints RGBA pixels. The engine never depends on it; anything that can
//! place arcs, lines, dots, and text may consume a scene instead.
//!
//! Text needs font data, which is supplied at runtime; without it, text
//! primitives are skipped with a warning and everything else still paints.

use rusttype::{point, Font, PositionedGlyph, Scale as FontScale};
use tracing::warn;

use crate::config::Color;
use crate::error::GaugeError;
use crate::scene::{AngleConvention, DrawCommand, Scene, TextBackground};

/// Margin in pixels between the outermost radius and the surface edge.
const SURFACE_MARGIN: f64 = 8.0;

/// An RGBA frame to paint into, 4 bytes per pixel, row-major.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }
}

/// Paints scenes into a [`Canvas`].
pub struct Renderer {
    font: Option<Font<'static>>,
}

impl Renderer {
    /// A renderer without text support.
    pub fn new() -> Self {
        Self { font: None }
    }

    /// A renderer that rasterizes text with the given font bytes.
    pub fn with_font(data: Vec<u8>) -> Result<Self, GaugeError> {
        let font = Font::try_from_vec(data).ok_or(GaugeError::BadFont)?;
        Ok(Self { font: Some(font) })
    }

    /// Paint a scene over `background`. Commands are painted in ascending
    /// z-order; the scene's radial limit maps onto the surface's shorter
    /// half-dimension minus a small margin.
    pub fn paint(&self, scene: &Scene, canvas: &mut Canvas, background: Color) {
        canvas.clear(background);

        let cx = canvas.width as f64 / 2.0;
        let cy = canvas.height as f64 / 2.0;
        let half = (canvas.width.min(canvas.height) as f64) / 2.0;
        let px_per_unit = ((half - SURFACE_MARGIN) / scene.radial_limit).max(1.0);

        let mut ordered: Vec<&DrawCommand> = scene.commands().iter().collect();
        ordered.sort_by_key(|c| c.z());

        let mut missing_font_warned = false;
        for command in ordered {
            match command {
                DrawCommand::ArcFill {
                    thetas,
                    inner_radius,
                    outer_radius,
                    color,
                    edge_color,
                    edge_width,
                    z: _,
                } => {
                    self.fill_arc(
                        canvas,
                        scene.convention,
                        (cx, cy),
                        px_per_unit,
                        thetas,
                        *inner_radius,
                        *outer_radius,
                        *color,
                    );
                    if let Some(edge) = edge_color {
                        if *edge_width > 0.0 && !thetas.is_empty() {
                            for &theta in &[thetas[0], thetas[thetas.len() - 1]] {
                                let (x0, y0) = project(
                                    scene.convention,
                                    (cx, cy),
                                    px_per_unit,
                                    theta,
                                    *inner_radius,
                                );
                                let (x1, y1) = project(
                                    scene.convention,
                                    (cx, cy),
                                    px_per_unit,
                                    theta,
                                    *outer_radius,
                                );
                                draw_thick_line_aa(
                                    canvas, x0, y0, x1, y1, *edge_width, *edge,
                                );
                            }
                        }
                    }
                }
                DrawCommand::Line {
                    path,
                    color,
                    width,
                    z: _,
                } => {
                    for pair in path.windows(2) {
                        let (x0, y0) = project(
                            scene.convention,
                            (cx, cy),
                            px_per_unit,
                            pair[0].theta,
                            pair[0].r,
                        );
                        let (x1, y1) = project(
                            scene.convention,
                            (cx, cy),
                            px_per_unit,
                            pair[1].theta,
                            pair[1].r,
                        );
                        draw_thick_line_aa(canvas, x0, y0, x1, y1, *width, *color);
                    }
                }
                DrawCommand::Dot {
                    theta,
                    radius,
                    dot_radius,
                    color,
                    z: _,
                } => {
                    let (x, y) =
                        project(scene.convention, (cx, cy), px_per_unit, *theta, *radius);
                    draw_circle(canvas, x, y, (dot_radius * px_per_unit).round() as i32, *color);
                }
                DrawCommand::Text {
                    theta,
                    radius,
                    text,
                    font_size,
                    color,
                    line_spacing,
                    background,
                    z: _,
                } => match &self.font {
                    Some(font) => {
                        let (x, y) =
                            project(scene.convention, (cx, cy), px_per_unit, *theta, *radius);
                        draw_text_block(
                            canvas,
                            font,
                            x,
                            y,
                            text,
                            *font_size,
                            *line_spacing,
                            *color,
                            *background,
                        );
                    }
                    None => {
                        if !missing_font_warned {
                            warn!("no font loaded, skipping text primitives");
                            missing_font_warned = true;
                        }
                    }
                },
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Surface position of a polar point under the scene's convention.
fn project(
    convention: AngleConvention,
    center: (f64, f64),
    px_per_unit: f64,
    theta: f64,
    r: f64,
) -> (i32, i32) {
    let (ux, uy) = convention.to_screen(theta, r);
    (
        (center.0 + ux * px_per_unit).round() as i32,
        (center.1 + uy * px_per_unit).round() as i32,
    )
}

impl Renderer {
    /// Per-pixel band fill between two radii over the swept theta range.
    #[allow(clippy::too_many_arguments)]
    fn fill_arc(
        &self,
        canvas: &mut Canvas,
        convention: AngleConvention,
        center: (f64, f64),
        px_per_unit: f64,
        thetas: &[f64],
        inner_radius: f64,
        outer_radius: f64,
        color: Color,
    ) {
        if thetas.is_empty() {
            return;
        }
        let lo = thetas.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = thetas.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let inner_px = inner_radius * px_per_unit;
        let outer_px = outer_radius * px_per_unit;

        let x_min = ((center.0 - outer_px).floor() as i32 - 1).max(0);
        let x_max = ((center.0 + outer_px).ceil() as i32 + 1).min(canvas.width as i32 - 1);
        let y_min = ((center.1 - outer_px).floor() as i32 - 1).max(0);
        let y_max = ((center.1 + outer_px).ceil() as i32 + 1).min(canvas.height as i32 - 1);

        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let dx = x as f64 - center.0;
                let dy = y as f64 - center.1;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist > outer_px + 1.0 || dist < inner_px - 1.0 {
                    continue;
                }
                let theta = convention.theta_of(dx, dy);
                if theta < lo || theta > hi {
                    continue;
                }
                let aa = if dist > outer_px {
                    1.0 - (dist - outer_px).min(1.0)
                } else if dist < inner_px {
                    1.0 - (inner_px - dist).min(1.0)
                } else {
                    1.0
                };
                if aa > 0.0 {
                    set_pixel(canvas, x as usize, y as usize, color, aa as f32);
                }
            }
        }
    }
}

fn set_pixel(canvas: &mut Canvas, x: usize, y: usize, color: Color, alpha: f32) {
    if x < canvas.width && y < canvas.height {
        let idx = (y * canvas.width + x) * 4;
        let (r, g, b) = color.as_tuple();
        let src = [r as f32, g as f32, b as f32];
        let dst = [
            canvas.frame[idx] as f32,
            canvas.frame[idx + 1] as f32,
            canvas.frame[idx + 2] as f32,
        ];
        let a = alpha.clamp(0.0, 1.0);
        let out = [
            (src[0] * a + dst[0] * (1.0 - a)).round() as u8,
            (src[1] * a + dst[1] * (1.0 - a)).round() as u8,
            (src[2] * a + dst[2] * (1.0 - a)).round() as u8,
            0xff,
        ];
        canvas.frame[idx..idx + 4].copy_from_slice(&out);
    }
}

fn draw_thick_line_aa(
    canvas: &mut Canvas,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    thickness: f32,
    color: Color,
) {
    let min_x = x0.min(x1) - thickness.ceil() as i32 - 1;
    let max_x = x0.max(x1) + thickness.ceil() as i32 + 1;
    let min_y = y0.min(y1) - thickness.ceil() as i32 - 1;
    let max_y = y0.max(y1) + thickness.ceil() as i32 + 1;
    let dx = (x1 - x0) as f32;
    let dy = (y1 - y0) as f32;
    let len_sq = (dx * dx + dy * dy).max(1e-6);
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if x < 0 || y < 0 {
                continue;
            }
            let px = x as f32 - x0 as f32;
            let py = y as f32 - y0 as f32;
            let t = ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0);
            let lx = x0 as f32 + t * dx;
            let ly = y0 as f32 + t * dy;
            let dist = ((lx - x as f32).powi(2) + (ly - y as f32).powi(2)).sqrt();
            let aa = (1.0 - (dist - thickness / 2.0).clamp(0.0, 1.0)).clamp(0.0, 1.0);
            if aa > 0.01 {
                set_pixel(canvas, x as usize, y as usize, color, aa);
            }
        }
    }
}

fn draw_circle(canvas: &mut Canvas, cx: i32, cy: i32, radius: i32, color: Color) {
    for y in -radius..=radius {
        for x in -radius..=radius {
            let dist = ((x * x + y * y) as f64).sqrt();
            let aa = if dist > radius as f64 {
                1.0 - (dist - radius as f64).min(1.0)
            } else {
                1.0
            };
            if dist <= radius as f64 + 1.0 && aa > 0.0 {
                let px = cx + x;
                let py = cy + y;
                if px >= 0 && py >= 0 {
                    set_pixel(canvas, px as usize, py as usize, color, aa as f32);
                }
            }
        }
    }
}

fn line_width_px(line: &str, font: &Font, scale: FontScale) -> i32 {
    let glyphs: Vec<PositionedGlyph> = font.layout(line, scale, point(0.0, 0.0)).collect();
    let (min_x, max_x) = glyphs
        .iter()
        .filter_map(|g| g.pixel_bounding_box())
        .fold((i32::MAX, i32::MIN), |(min_x, max_x), bb| {
            (min_x.min(bb.min.x), max_x.max(bb.max.x))
        });
    if min_x < max_x {
        max_x - min_x
    } else {
        0
    }
}

/// Draw a multi-line text block centered at `(x, y)`, with an optional
/// background box sized to the block.
#[allow(clippy::too_many_arguments)]
fn draw_text_block(
    canvas: &mut Canvas,
    font: &Font,
    x: i32,
    y: i32,
    text: &str,
    font_size: f32,
    line_spacing: f32,
    color: Color,
    background: Option<TextBackground>,
) {
    let scale = FontScale::uniform(font_size);
    let lines: Vec<&str> = text.split('\n').collect();
    let line_height = font_size * line_spacing;
    let block_height = line_height * lines.len() as f32;

    if let Some(bg) = background {
        let block_width = lines
            .iter()
            .map(|line| line_width_px(line, font, scale))
            .max()
            .unwrap_or(0) as f32;
        let pad = bg.padding as f32 * font_size;
        let left = x - ((block_width / 2.0 + pad) as i32);
        let right = x + ((block_width / 2.0 + pad) as i32);
        let top = y - ((block_height / 2.0 + pad) as i32);
        let bottom = y + ((block_height / 2.0 + pad) as i32);
        if let Some((xs, ys)) = clip_box(left, top, right, bottom, canvas.width, canvas.height) {
            for py in ys {
                for px in xs.clone() {
                    set_pixel(canvas, px, py, bg.color, bg.alpha as f32);
                }
            }
        }
    }

    for (i, line) in lines.iter().enumerate() {
        let line_y = y as f32 - block_height / 2.0 + (i as f32 + 0.5) * line_height;
        draw_text_line(canvas, font, x, line_y.round() as i32, line, scale, color);
    }
}

/// Intersect an inclusive pixel box with the canvas. `None` when the box
/// lies entirely outside, so off-surface boxes paint nothing at all.
fn clip_box(
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
    width: usize,
    height: usize,
) -> Option<(std::ops::Range<usize>, std::ops::Range<usize>)> {
    if right < 0 || bottom < 0 || left >= width as i32 || top >= height as i32 {
        return None;
    }
    let xs = left.max(0) as usize..(right as usize + 1).min(width);
    let ys = top.max(0) as usize..(bottom as usize + 1).min(height);
    Some((xs, ys))
}

/// Draw one line of text centered at `(x, y)`.
fn draw_text_line(
    canvas: &mut Canvas,
    font: &Font,
    x: i32,
    y: i32,
    text: &str,
    scale: FontScale,
    color: Color,
) {
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<PositionedGlyph> = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .collect();
    let (min_x, max_x, min_y, max_y) = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
        (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
        |(min_x, max_x, min_y, max_y), bb| {
            (
                min_x.min(bb.min.x),
                max_x.max(bb.max.x),
                min_y.min(bb.min.y),
                max_y.max(bb.max.y),
            )
        },
    );
    let width_px = if min_x < max_x { max_x - min_x } else { 0 };
    let height_px = if min_y < max_y { max_y - min_y } else { 0 };
    let offset_x = x - width_px / 2;
    let offset_y = y - height_px / 2;
    for glyph in glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = offset_x + gx as i32 + bb.min.x - min_x;
                let py = offset_y + gy as i32 + bb.min.y - min_y;
                if px >= 0 && px < canvas.width as i32 && py >= 0 && py < canvas.height as i32 {
                    set_pixel(canvas, px as usize, py as usize, color, v);
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DonutGauge, DonutGaugeInput, DonutStyle, Section, SectionScale};

    fn pixel(frame: &[u8], width: usize, x: usize, y: usize) -> (u8, u8, u8) {
        let idx = (y * width + x) * 4;
        (frame[idx], frame[idx + 1], frame[idx + 2])
    }

    fn full_donut_scene() -> crate::Scene {
        let sections = SectionScale::new(
            vec![Section {
                description: "All".to_string(),
                span: 100.0,
                color: Color::new(0x11, 0x22, 0x33),
            }],
            0.0,
        )
        .unwrap();
        let gauge = DonutGauge::new(DonutStyle::builder().build());
        gauge
            .render(&DonutGaugeInput {
                value: 100.0,
                format_mode: "integer".to_string(),
                decimal_separator: "dot".to_string(),
                sections,
            })
            .unwrap()
    }

    #[test]
    fn progress_band_paints_at_the_top_of_the_semicircle() {
        let scene = full_donut_scene();
        let (width, height) = (100usize, 100usize);
        let mut frame = vec![0u8; width * height * 4];
        let mut canvas = Canvas::new(&mut frame, width, height);
        Renderer::new().paint(&scene, &mut canvas, Color::WHITE);

        // Straight up from center, in the middle of the progress band
        // (radius 0.75..1.0, limit 1.3, scale (50-8)/1.3 px per unit).
        let px_per_unit: f64 = (50.0 - 8.0) / 1.3;
        let r = 0.875 * px_per_unit;
        let (x, y) = (50usize, (50.0 - r).round() as usize);
        // Full progress: the band takes the single section's color.
        assert_eq!(pixel(&frame, width, x, y), (0x11, 0x22, 0x33));
    }

    #[test]
    fn pixels_below_the_semicircle_stay_background() {
        let scene = full_donut_scene();
        let (width, height) = (100usize, 100usize);
        let mut frame = vec![0u8; width * height * 4];
        let mut canvas = Canvas::new(&mut frame, width, height);
        Renderer::new().paint(&scene, &mut canvas, Color::WHITE);

        // The sweep covers 0°..180°; straight down is outside it.
        let px_per_unit: f64 = (50.0 - 8.0) / 1.3;
        let r = 0.875 * px_per_unit;
        let (x, y) = (50usize, (50.0 + r).round() as usize);
        assert_eq!(pixel(&frame, width, x, y), (0xff, 0xff, 0xff));
    }

    #[test]
    fn missing_font_skips_text_but_paints_shapes() {
        // The scene contains a Text command; painting without a font must
        // not panic and must still fill the arcs.
        let scene = full_donut_scene();
        let (width, height) = (64usize, 64usize);
        let mut frame = vec![0u8; width * height * 4];
        let mut canvas = Canvas::new(&mut frame, width, height);
        Renderer::new().paint(&scene, &mut canvas, Color::WHITE);
        assert!(frame
            .chunks_exact(4)
            .any(|c| (c[0], c[1], c[2]) == (0x11, 0x22, 0x33)));
    }

    #[test]
    fn boxes_outside_the_canvas_clip_to_nothing() {
        assert!(clip_box(-20, -20, -5, -5, 64, 64).is_none());
        assert!(clip_box(70, 10, 90, 20, 64, 64).is_none());
        assert!(clip_box(10, 64, 20, 80, 64, 64).is_none());
    }

    #[test]
    fn partially_visible_boxes_clip_to_their_overlap() {
        let (xs, ys) = clip_box(-5, -5, 5, 5, 64, 64).unwrap();
        assert_eq!(xs, 0..6);
        assert_eq!(ys, 0..6);

        let (xs, ys) = clip_box(60, 60, 80, 80, 64, 64).unwrap();
        assert_eq!(xs, 60..64);
        assert_eq!(ys, 60..64);
    }
}
