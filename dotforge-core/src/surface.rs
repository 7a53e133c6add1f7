//! The in-memory drawing surface layers paint onto.
//!
//! A [`Surface`] is a display-sized RGBA8 buffer plus a coverage channel.
//! Coverage records which pixels a layer's draw pass touched, including the
//! invisible full-bounds stamp that text and other sparse layers apply so
//! the backing store always records their complete region. Surfaces are
//! owned by the session and lent to layers per draw call; layers never hold
//! one between calls.

use crate::color::Rgba;
use crate::error::{EditorError, EditorResult};
use crate::geometry::{Point, Rect};

/// Raw RGBA raster data carried by image layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 bytes, `width * height * 4` long.
    pub rgba: Vec<u8>,
}

impl ImageData {
    /// A fully transparent raster of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Wrap raw RGBA bytes, validating the length against the dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::MalformedState`] when the byte count does not
    /// match `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> EditorResult<Self> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(EditorError::MalformedState(format!(
                "raster is {} bytes, expected {expected} for {width}x{height}",
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Color at `(x, y)`, or transparent when out of range.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        if x >= self.width || y >= self.height {
            return Rgba::TRANSPARENT;
        }
        let i = ((y * self.width + x) * 4) as usize;
        Rgba([
            self.rgba[i],
            self.rgba[i + 1],
            self.rgba[i + 2],
            self.rgba[i + 3],
        ])
    }

    /// Overwrite the color at `(x, y)`; out-of-range plots are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = ((y * self.width + x) * 4) as usize;
        self.rgba[i..i + 4].copy_from_slice(&color.0);
    }

    /// Copy `src` verbatim (transparent pixels included) with its top-left
    /// corner at `(offset_x, offset_y)`. Rows falling outside are cropped.
    pub fn blit(&mut self, offset_x: u32, offset_y: u32, src: &ImageData) {
        for y in 0..src.height {
            let dst_y = offset_y + y;
            if dst_y >= self.height {
                break;
            }
            for x in 0..src.width {
                let dst_x = offset_x + x;
                if dst_x >= self.width {
                    break;
                }
                let from = ((y * src.width + x) * 4) as usize;
                let to = ((dst_y * self.width + dst_x) * 4) as usize;
                self.rgba[to..to + 4].copy_from_slice(&src.rgba[from..from + 4]);
            }
        }
    }
}

/// A display-sized RGBA raster with per-pixel coverage.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    coverage: Vec<bool>,
}

impl Surface {
    /// A cleared surface of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let area = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![0; area * 4],
            coverage: vec![false; area],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw row-major RGBA8 bytes.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Reset every pixel to transparent and drop all coverage.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
        self.coverage.fill(false);
    }

    /// Color at `(x, y)`, or `None` outside the surface.
    #[must_use]
    pub fn pixel_at(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        Some(Rgba([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]))
    }

    /// Whether any draw op or coverage stamp has touched `(x, y)`.
    #[must_use]
    pub fn is_covered(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.coverage[(y * self.width + x) as usize]
    }

    /// Number of covered pixels.
    #[must_use]
    pub fn coverage_count(&self) -> usize {
        self.coverage.iter().filter(|c| **c).count()
    }

    #[allow(clippy::cast_sign_loss)] // Guarded by the negative checks above the cast
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        self.coverage[i] = true;
        blend_pixel(&mut self.pixels[i * 4..i * 4 + 4], color);
    }

    /// Plot one pixel (source-over), marking it covered.
    pub fn draw_pixel(&mut self, point: Point, color: Rgba) {
        let p = point.round();
        #[allow(clippy::cast_possible_truncation)]
        self.set_pixel(p.x as i32, p.y as i32, color);
    }

    /// Mark every pixel inside `rect` as covered without changing colors.
    ///
    /// This is the invisible bounds stamp: a layer's draw pass applies it
    /// over its full bounds so the surface records the complete region even
    /// where no visible pixel lands.
    #[allow(clippy::cast_possible_truncation)]
    pub fn stamp_coverage(&mut self, rect: Rect) {
        let r = rect.round();
        let (x0, y0) = (r.x as i32, r.y as i32);
        let (w, h) = (r.w as i32, r.h as i32);
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                if let Some(i) = self.index(x, y) {
                    self.coverage[i] = true;
                }
            }
        }
    }

    /// Bresenham line between two points, endpoints inclusive.
    pub fn line(&mut self, from: Point, to: Point, color: Rgba) {
        for (x, y) in line_points(from, to) {
            self.set_pixel(x, y, color);
        }
    }

    /// Fill a rectangle.
    #[allow(clippy::cast_possible_truncation)]
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let r = rect.round();
        let (x0, y0) = (r.x as i32, r.y as i32);
        let (w, h) = (r.w as i32, r.h as i32);
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Outline a rectangle with a 1px stroke just inside its edges. Every
    /// perimeter pixel is plotted exactly once, so translucent strokes stay
    /// uniform at the corners.
    #[allow(clippy::cast_possible_truncation)]
    pub fn stroke_rect(&mut self, rect: Rect, color: Rgba) {
        let r = rect.round();
        if r.w < 1.0 || r.h < 1.0 {
            return;
        }
        let (x0, y0) = (r.x as i32, r.y as i32);
        let (x1, y1) = (x0 + r.w as i32 - 1, y0 + r.h as i32 - 1);
        for x in x0..=x1 {
            self.set_pixel(x, y0, color);
            if y1 > y0 {
                self.set_pixel(x, y1, color);
            }
        }
        for y in y0 + 1..y1 {
            self.set_pixel(x0, y, color);
            if x1 > x0 {
                self.set_pixel(x1, y, color);
            }
        }
    }

    /// Midpoint circle outline. `center` is the circle center; the stroke
    /// spans `2 * radius + 1` pixels on each axis.
    #[allow(clippy::cast_possible_truncation)]
    pub fn stroke_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        let c = center.round();
        let (cx, cy) = (c.x as i32, c.y as i32);
        let r = radius.round() as i32;
        if r <= 0 {
            self.set_pixel(cx, cy, color);
            return;
        }
        let mut x = r;
        let mut y = 0;
        let mut err = 1 - r;
        while x >= y {
            for (px, py) in [
                (cx + x, cy + y),
                (cx - x, cy + y),
                (cx + x, cy - y),
                (cx - x, cy - y),
                (cx + y, cy + x),
                (cx - y, cy + x),
                (cx + y, cy - x),
                (cx - y, cy - x),
            ] {
                self.set_pixel(px, py, color);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Filled circle with the same extents as [`Surface::stroke_circle`].
    #[allow(clippy::cast_possible_truncation)]
    pub fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        let c = center.round();
        let (cx, cy) = (c.x as i32, c.y as i32);
        let r = radius.round() as i32;
        for dy in -r..=r {
            let span = f64::from(r * r - dy * dy).sqrt().floor() as i32;
            for dx in -span..=span {
                self.set_pixel(cx + dx, cy + dy, color);
            }
        }
    }

    /// Axis-aligned ellipse outline spanning `2rx + 1` by `2ry + 1` pixels.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn stroke_ellipse(&mut self, center: Point, rx: f32, ry: f32, color: Rgba) {
        let c = center.round();
        let (cx, cy) = (c.x as i32, c.y as i32);
        let (rx, ry) = (
            i64::from(rx.round() as i32).max(0),
            i64::from(ry.round() as i32).max(0),
        );
        if rx == 0 || ry == 0 {
            // Degenerate axis: the outline collapses to a line through the center.
            self.line(
                Point::new(c.x - rx as f32, c.y - ry as f32),
                Point::new(c.x + rx as f32, c.y + ry as f32),
                color,
            );
            return;
        }
        // Midpoint ellipse, region 1 then region 2.
        let (rx2, ry2) = (rx * rx, ry * ry);
        let mut x: i64 = 0;
        let mut y = ry;
        let mut dx = 2 * ry2 * x;
        let mut dy = 2 * rx2 * y;
        let mut d1 = ry2 - rx2 * ry + rx2 / 4;
        while dx < dy {
            self.plot_quadrants(cx, cy, x as i32, y as i32, color);
            if d1 < 0 {
                x += 1;
                dx += 2 * ry2;
                d1 += dx + ry2;
            } else {
                x += 1;
                y -= 1;
                dx += 2 * ry2;
                dy -= 2 * rx2;
                d1 += dx - dy + ry2;
            }
        }
        let mut d2 =
            ry2 * (2 * x + 1) * (2 * x + 1) / 4 + rx2 * (y - 1) * (y - 1) - rx2 * ry2;
        while y >= 0 {
            self.plot_quadrants(cx, cy, x as i32, y as i32, color);
            if d2 > 0 {
                y -= 1;
                dy -= 2 * rx2;
                d2 += rx2 - dy;
            } else {
                y -= 1;
                x += 1;
                dx += 2 * ry2;
                dy -= 2 * rx2;
                d2 += dx - dy + rx2;
            }
        }
    }

    /// Filled ellipse with the same extents as [`Surface::stroke_ellipse`].
    #[allow(clippy::cast_possible_truncation)]
    pub fn fill_ellipse(&mut self, center: Point, rx: f32, ry: f32, color: Rgba) {
        let c = center.round();
        let (cx, cy) = (c.x as i32, c.y as i32);
        let (rx, ry) = (rx.round().max(0.0), ry.round().max(0.0));
        if ry == 0.0 {
            self.line(
                Point::new(c.x - rx, c.y),
                Point::new(c.x + rx, c.y),
                color,
            );
            return;
        }
        let ry_i = ry as i32;
        for dy in -ry_i..=ry_i {
            let frac = 1.0 - (f64::from(dy) / f64::from(ry)).powi(2);
            let span = (f64::from(rx) * frac.max(0.0).sqrt()).floor() as i32;
            for dx in -span..=span {
                self.set_pixel(cx + dx, cy + dy, color);
            }
        }
    }

    fn plot_quadrants(&mut self, cx: i32, cy: i32, x: i32, y: i32, color: Rgba) {
        self.set_pixel(cx + x, cy + y, color);
        self.set_pixel(cx - x, cy + y, color);
        self.set_pixel(cx + x, cy - y, color);
        self.set_pixel(cx - x, cy - y, color);
    }

    /// Outline a rectangle with a dashed 1px stroke (`dash` pixels on, then
    /// `dash` pixels off, running clockwise from the top-left corner).
    #[allow(clippy::cast_possible_truncation)]
    pub fn dashed_stroke_rect(&mut self, rect: Rect, dash: u32, color: Rgba) {
        let r = rect.round();
        let (x0, y0) = (r.x as i32, r.y as i32);
        let (w, h) = (r.w.max(1.0) as i32, r.h.max(1.0) as i32);
        let (x1, y1) = (x0 + w - 1, y0 + h - 1);
        let mut perimeter = Vec::new();
        for x in x0..=x1 {
            perimeter.push((x, y0));
        }
        for y in y0 + 1..=y1 {
            perimeter.push((x1, y));
        }
        for x in (x0..x1).rev() {
            perimeter.push((x, y1));
        }
        for y in (y0 + 1..y1).rev() {
            perimeter.push((x0, y));
        }
        let period = (dash.max(1) * 2) as usize;
        for (step, (x, y)) in perimeter.into_iter().enumerate() {
            if step % period < dash as usize {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Copy an RGBA raster onto the surface at `top_left` (source-over);
    /// fully transparent source pixels are skipped.
    #[allow(clippy::cast_possible_truncation)]
    pub fn draw_image(&mut self, top_left: Point, image: &ImageData) {
        let anchor = top_left.round();
        let (ax, ay) = (anchor.x as i32, anchor.y as i32);
        for y in 0..image.height {
            for x in 0..image.width {
                let px = image.pixel(x, y);
                if px.a() == 0 {
                    continue;
                }
                self.set_pixel(ax + x as i32, ay + y as i32, px);
            }
        }
    }

    /// Source-over composite another surface onto this one, merging its
    /// coverage. Surfaces larger than `self` are cropped.
    pub fn blend(&mut self, other: &Surface) {
        let w = self.width.min(other.width);
        let h = self.height.min(other.height);
        for y in 0..h {
            for x in 0..w {
                let src = ((y * other.width + x) * 4) as usize;
                let dst_i = (y * self.width + x) as usize;
                self.coverage[dst_i] |= other.coverage[(y * other.width + x) as usize];
                let color = Rgba([
                    other.pixels[src],
                    other.pixels[src + 1],
                    other.pixels[src + 2],
                    other.pixels[src + 3],
                ]);
                if color.a() > 0 {
                    blend_pixel(&mut self.pixels[dst_i * 4..dst_i * 4 + 4], color);
                }
            }
        }
    }
}

/// Integer pixel positions of a Bresenham line, endpoints inclusive.
///
/// Shared by [`Surface::line`] and the freehand paint stroke plotting, which
/// rasterizes into layer-owned [`ImageData`] instead of a surface.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn line_points(from: Point, to: Point) -> Vec<(i32, i32)> {
    let (f, t) = (from.round(), to.round());
    let (mut x0, mut y0) = (f.x as i32, f.y as i32);
    let (x1, y1) = (t.x as i32, t.y as i32);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut points = Vec::new();
    loop {
        points.push((x0, y0));
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
    points
}

/// Straight-alpha source-over blend of `src` into a 4-byte RGBA destination
/// slice. The destination's own alpha weights its color contribution, so
/// translucent paint over a transparent pixel keeps its color instead of
/// darkening toward black.
#[allow(clippy::cast_possible_truncation)]
fn blend_pixel(dst: &mut [u8], src: Rgba) {
    let a = u32::from(src.a());
    if a == 255 {
        dst.copy_from_slice(&src.0);
        return;
    }
    if a == 0 {
        return;
    }
    // Channel weights scaled by 255; `a > 0` here, so `out` is never zero.
    let src_w = a * 255;
    let dst_w = u32::from(dst[3]) * (255 - a);
    let out = src_w + dst_w;
    for c in 0..3 {
        dst[c] = ((u32::from(src.0[c]) * src_w + u32::from(dst[c]) * dst_w) / out) as u8;
    }
    dst[3] = (out / 255) as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_pixel_and_read_back() {
        let mut s = Surface::new(8, 8);
        s.draw_pixel(Point::new(3.0, 4.0), Rgba::WHITE);
        assert_eq!(s.pixel_at(3, 4), Some(Rgba::WHITE));
        assert!(s.is_covered(3, 4));
        assert!(!s.is_covered(4, 3));
    }

    #[test]
    fn test_out_of_range_plots_are_ignored() {
        let mut s = Surface::new(4, 4);
        s.draw_pixel(Point::new(-1.0, 2.0), Rgba::WHITE);
        s.draw_pixel(Point::new(7.0, 7.0), Rgba::WHITE);
        assert_eq!(s.coverage_count(), 0);
    }

    #[test]
    fn test_line_hits_both_endpoints() {
        let mut s = Surface::new(16, 16);
        s.line(Point::new(2.0, 3.0), Point::new(11.0, 9.0), Rgba::WHITE);
        assert_eq!(s.pixel_at(2, 3), Some(Rgba::WHITE));
        assert_eq!(s.pixel_at(11, 9), Some(Rgba::WHITE));
    }

    #[test]
    fn test_fill_rect_covers_exact_area() {
        let mut s = Surface::new(16, 16);
        s.fill_rect(
            Rect::new(Point::new(2.0, 2.0), Point::new(5.0, 3.0)),
            Rgba::WHITE,
        );
        assert_eq!(s.coverage_count(), 15);
        assert_eq!(s.pixel_at(6, 4), Some(Rgba::WHITE));
        assert_eq!(s.pixel_at(7, 4), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_stroke_rect_leaves_interior_empty() {
        let mut s = Surface::new(16, 16);
        s.stroke_rect(
            Rect::new(Point::new(1.0, 1.0), Point::new(6.0, 5.0)),
            Rgba::WHITE,
        );
        assert_eq!(s.pixel_at(1, 1), Some(Rgba::WHITE));
        assert_eq!(s.pixel_at(6, 5), Some(Rgba::WHITE));
        assert_eq!(s.pixel_at(3, 3), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_stroke_rect_paints_corners_once() {
        let mut s = Surface::new(16, 16);
        let translucent = Rgba([255, 255, 255, 128]);
        s.stroke_rect(
            Rect::new(Point::new(1.0, 1.0), Point::new(6.0, 5.0)),
            translucent,
        );
        // A corner blended twice would land at alpha 191.
        for (x, y) in [(1, 1), (6, 1), (1, 5), (6, 5)] {
            assert_eq!(s.pixel_at(x, y).expect("pixel").a(), 128, "corner ({x},{y})");
        }
    }

    #[test]
    fn test_circle_extremes() {
        let mut s = Surface::new(16, 16);
        s.stroke_circle(Point::new(8.0, 8.0), 3.0, Rgba::WHITE);
        for (x, y) in [(11, 8), (5, 8), (8, 11), (8, 5)] {
            assert_eq!(s.pixel_at(x, y), Some(Rgba::WHITE), "extreme ({x},{y})");
        }
        assert_eq!(s.pixel_at(8, 8), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_fill_circle_span() {
        let mut s = Surface::new(16, 16);
        s.fill_circle(Point::new(8.0, 8.0), 2.0, Rgba::WHITE);
        assert_eq!(s.pixel_at(8, 8), Some(Rgba::WHITE));
        assert_eq!(s.pixel_at(10, 8), Some(Rgba::WHITE));
        assert_eq!(s.pixel_at(11, 8), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_ellipse_extents() {
        let mut s = Surface::new(32, 32);
        s.stroke_ellipse(Point::new(16.0, 16.0), 6.0, 3.0, Rgba::WHITE);
        for (x, y) in [(22, 16), (10, 16), (16, 19), (16, 13)] {
            assert_eq!(s.pixel_at(x, y), Some(Rgba::WHITE), "extreme ({x},{y})");
        }
        assert_eq!(s.pixel_at(16, 16), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_stamp_coverage_sets_no_pixels() {
        let mut s = Surface::new(8, 8);
        s.stamp_coverage(Rect::new(Point::new(1.0, 1.0), Point::new(4.0, 2.0)));
        assert_eq!(s.coverage_count(), 8);
        assert!(s.is_covered(4, 2));
        assert!(s.pixels().iter().all(|b| *b == 0));
    }

    #[test]
    fn test_dashed_stroke_has_gaps() {
        let mut s = Surface::new(32, 32);
        let rect = Rect::new(Point::new(2.0, 2.0), Point::new(20.0, 12.0));
        s.dashed_stroke_rect(rect, 5, Rgba::WHITE);
        let lit = s.coverage_count();
        assert!(lit > 0);
        // Perimeter of a 20x12 box is 60; half the pattern is off.
        assert!(lit < 60, "expected gaps, got {lit} lit pixels");
    }

    #[test]
    fn test_blend_composites_color_and_coverage() {
        let mut frame = Surface::new(8, 8);
        let mut layer = Surface::new(8, 8);
        layer.draw_pixel(Point::new(2.0, 2.0), Rgba::rgb(255, 0, 0));
        layer.stamp_coverage(Rect::new(Point::new(5.0, 5.0), Point::new(2.0, 2.0)));
        frame.blend(&layer);
        assert_eq!(frame.pixel_at(2, 2), Some(Rgba::rgb(255, 0, 0)));
        assert!(frame.is_covered(5, 6));
        assert_eq!(frame.pixel_at(5, 6), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_blend_semi_transparent() {
        let mut frame = Surface::new(2, 1);
        frame.fill_rect(Rect::new(Point::ZERO, Point::new(2.0, 1.0)), Rgba::BLACK);
        let mut layer = Surface::new(2, 1);
        layer.draw_pixel(Point::ZERO, Rgba::WHITE.with_alpha(128));
        frame.blend(&layer);
        let px = frame.pixel_at(0, 0).expect("in range");
        assert!(px.r() > 100 && px.r() < 150, "got {}", px.r());
        assert_eq!(frame.pixel_at(1, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn test_blend_onto_transparent_keeps_color() {
        let mut s = Surface::new(1, 1);
        s.draw_pixel(Point::ZERO, Rgba([255, 255, 255, 128]));
        assert_eq!(s.pixel_at(0, 0), Some(Rgba([255, 255, 255, 128])));
    }

    #[test]
    fn test_draw_image_skips_transparent_pixels() {
        let mut s = Surface::new(8, 8);
        let mut img = ImageData::new(2, 2);
        img.set_pixel(0, 0, Rgba::WHITE);
        s.draw_image(Point::new(3.0, 3.0), &img);
        assert_eq!(s.pixel_at(3, 3), Some(Rgba::WHITE));
        assert!(!s.is_covered(4, 4));
    }

    #[test]
    fn test_image_data_length_validation() {
        assert!(ImageData::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            ImageData::from_rgba(2, 2, vec![0; 15]),
            Err(EditorError::MalformedState(_))
        ));
    }
}
