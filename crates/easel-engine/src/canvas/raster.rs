use easel_bridge::{GeometrySink, Point};

use super::color;
use super::shape::Shape;

/// Stroke and fill state. `None` disables that part.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Style {
    pub fill: Option<u32>,
    pub stroke: Option<u32>,
    pub stroke_weight: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Some(color::WHITE),
            stroke: Some(color::BLACK),
            stroke_weight: 1.0,
        }
    }
}

/// The displayed frame: what the presenter shows.
///
/// Coordinates arriving here are in sketch units and are scaled by the pixel
/// density. Depth is ignored.
#[derive(Debug, Clone)]
pub struct Raster {
    width: u32,
    height: u32,
    density: u32,
    pixels: Vec<u32>,
    pub style: Style,
    shape: Option<Shape>,
}

impl Raster {
    pub fn new(width: u32, height: u32, density: u32) -> Self {
        let density = density.max(1);
        let len = (width * density) as usize * (height * density) as usize;
        Self {
            width,
            height,
            density,
            pixels: vec![color::DEFAULT_BACKGROUND; len],
            style: Style::default(),
            shape: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn density(&self) -> u32 {
        self.density
    }

    /// Physical pixel dimensions.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width * self.density, self.height * self.density)
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    pub fn background(&mut self, c: u32) {
        self.pixels.fill(c);
    }

    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x as i64, y as i64).map(|i| self.pixels[i])
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let (w, h) = self.pixel_size();
        if x < 0 || y < 0 || x >= w as i64 || y >= h as i64 {
            return None;
        }
        Some(y as usize * w as usize + x as usize)
    }

    fn plot(&mut self, x: i64, y: i64, c: u32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color::blend(self.pixels[i], c);
        }
    }

    fn to_pixel(&self, p: Point) -> (f32, f32) {
        let d = self.density as f32;
        (p.x * d, p.y * d)
    }

    fn brush_size(&self) -> i64 {
        (self.style.stroke_weight * self.density as f32).round().max(1.0) as i64
    }

    /// Square brush of the current stroke weight centered on `(x, y)`.
    fn stamp(&mut self, x: i64, y: i64, c: u32) {
        let size = self.brush_size();
        let lo = -(size - 1) / 2;
        for dy in lo..lo + size {
            for dx in lo..lo + size {
                self.plot(x.saturating_add(dx), y.saturating_add(dy), c);
            }
        }
    }

    fn stroke_segment(&mut self, a: (f32, f32), b: (f32, f32)) {
        let Some(c) = self.style.stroke else {
            return;
        };

        // Clip to the raster grown by one brush so stamps at the border still
        // land; the walk below is then bounded by the canvas size.
        let pad = self.brush_size() as f64;
        let (w, h) = self.pixel_size();
        let a = (a.0 as f64, a.1 as f64);
        let b = (b.0 as f64, b.1 as f64);
        let Some((a, b)) = clip_segment(a, b, (-pad, -pad), (w as f64 + pad, h as f64 + pad)) else {
            return;
        };

        let (mut x0, mut y0) = (a.0.round() as i64, a.1.round() as i64);
        let (x1, y1) = (b.0.round() as i64, b.1.round() as i64);

        // Bresenham
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.stamp(x0, y0, c);
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
    }

    /// Even-odd scanline fill, sampling pixel centers.
    fn fill_polygon(&mut self, pts: &[(f32, f32)], c: u32) {
        if pts.len() < 3 {
            return;
        }
        let (w, h) = self.pixel_size();
        let min_y = pts.iter().map(|p| p.1).fold(f32::INFINITY, f32::min).floor().max(0.0) as u32;
        let max_y = pts.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max).ceil().min(h as f32) as u32;

        let mut xs = Vec::new();
        for y in min_y..max_y {
            let sy = y as f32 + 0.5;
            xs.clear();
            for (i, &(ax, ay)) in pts.iter().enumerate() {
                let (bx, by) = pts[(i + 1) % pts.len()];
                if (ay <= sy && by > sy) || (by <= sy && ay > sy) {
                    xs.push(ax + (sy - ay) / (by - ay) * (bx - ax));
                }
            }
            xs.sort_by(f32::total_cmp);
            for span in xs.chunks_exact(2) {
                let start = (span[0] - 0.5).ceil().max(0.0) as i64;
                let end = (span[1] - 0.5).floor().min(w as f32 - 1.0) as i64;
                for x in start..=end {
                    self.plot(x, y as i64, c);
                }
            }
        }
    }

    pub fn begin_shape(&mut self) {
        if self.shape.is_some() {
            log::debug!("begin_shape while a shape is open; previous shape discarded");
        }
        self.shape = Some(Shape::default());
    }

    pub fn end_shape(&mut self, close: bool) {
        let Some(shape) = self.shape.take() else {
            log::debug!("end_shape without begin_shape");
            return;
        };
        let pts: Vec<(f32, f32)> = shape.into_points().into_iter().map(|p| self.to_pixel(p)).collect();

        if let Some(fill) = self.style.fill {
            self.fill_polygon(&pts, fill);
        }
        for pair in pts.windows(2) {
            self.stroke_segment(pair[0], pair[1]);
        }
        if close && pts.len() > 2 {
            self.stroke_segment(pts[pts.len() - 1], pts[0]);
        }
    }

    fn with_shape(&mut self, what: &str, f: impl FnOnce(&mut Shape)) {
        match self.shape.as_mut() {
            Some(shape) => f(shape),
            None => log::debug!("{what} outside begin_shape/end_shape ignored"),
        }
    }
}

/// Liang–Barsky clip of segment `a`-`b` to the box `lo`..`hi`.
///
/// `None` when the segment misses the box or has a non-finite endpoint.
fn clip_segment(a: (f64, f64), b: (f64, f64), lo: (f64, f64), hi: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
    if ![a.0, a.1, b.0, b.1].iter().all(|v| v.is_finite()) {
        return None;
    }
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [(-dx, a.0 - lo.0), (dx, hi.0 - a.0), (-dy, a.1 - lo.1), (dy, hi.1 - a.1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some(((a.0 + t0 * dx, a.1 + t0 * dy), (a.0 + t1 * dx, a.1 + t1 * dy)))
}

impl GeometrySink for Raster {
    fn point(&mut self, p: Point) {
        if let Some(c) = self.style.stroke {
            let (x, y) = self.to_pixel(p);
            if x.is_finite() && y.is_finite() {
                self.stamp(x.floor() as i64, y.floor() as i64, c);
            }
        }
    }

    fn line(&mut self, a: Point, b: Point) {
        let (a, b) = (self.to_pixel(a), self.to_pixel(b));
        self.stroke_segment(a, b);
    }

    fn vertex(&mut self, p: Point) {
        self.with_shape("vertex", |s| s.vertex(p));
    }

    fn bezier_vertex(&mut self, c1: Point, c2: Point, anchor: Point) {
        self.with_shape("bezier_vertex", |s| s.bezier(c1, c2, anchor));
    }

    fn curve_vertex(&mut self, p: Point) {
        self.with_shape("curve_vertex", |s| s.curve(p));
    }

    fn quadratic_vertex(&mut self, control: Point, anchor: Point) {
        self.with_shape("quadratic_vertex", |s| s.quadratic(control, anchor));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: u32 = 0xFFFF0000;

    fn blank(w: u32, h: u32) -> Raster {
        let mut r = Raster::new(w, h, 1);
        r.background(color::BLACK);
        r.style.stroke = Some(RED);
        r
    }

    #[test]
    fn density_scales_the_buffer() {
        let r = Raster::new(10, 5, 2);
        assert_eq!(r.pixel_size(), (20, 10));
        assert_eq!(r.pixels().len(), 200);
    }

    #[test]
    fn points_are_plotted_and_clipped() {
        let mut r = blank(4, 4);
        r.point(Point::xy(1.0, 2.0));
        r.point(Point::xy(-3.0, 9.0));
        assert_eq!(r.get(1, 2), Some(RED));
        assert_eq!(r.pixels().iter().filter(|&&p| p == RED).count(), 1);
    }

    #[test]
    fn diagonal_line_hits_both_ends() {
        let mut r = blank(5, 5);
        r.line(Point::xy(0.0, 0.0), Point::xy(4.0, 4.0));
        for i in 0..5 {
            assert_eq!(r.get(i, i), Some(RED), "({i},{i})");
        }
        assert_eq!(r.get(4, 0), Some(color::BLACK));
    }

    #[test]
    fn far_off_canvas_endpoints_are_clipped() {
        let mut r = blank(4, 4);
        r.line(Point::xy(-1e10, 1.0), Point::xy(1e10, 1.0));
        for x in 0..4 {
            assert_eq!(r.get(x, 1), Some(RED), "({x},1)");
        }
        assert_eq!(r.get(0, 0), Some(color::BLACK));
        assert_eq!(r.get(0, 2), Some(color::BLACK));

        r.line(Point::xy(-1e10, 0.0), Point::xy(1e10, 0.0));
        assert_eq!(r.get(3, 0), Some(RED));
    }

    #[test]
    fn non_finite_or_missing_segments_draw_nothing() {
        let mut r = blank(4, 4);
        r.line(Point::xy(f32::NEG_INFINITY, 0.0), Point::xy(f32::INFINITY, 0.0));
        r.line(Point::xy(0.0, f32::NAN), Point::xy(2.0, 2.0));
        r.line(Point::xy(100.0, 100.0), Point::xy(200.0, 300.0));
        r.point(Point::xy(f32::INFINITY, 1.0));
        r.point(Point::xy(3e9, -3e9));
        assert!(r.pixels().iter().all(|&p| p == color::BLACK));
    }

    #[test]
    fn huge_shapes_fill_only_the_canvas() {
        let mut r = blank(4, 4);
        r.style.stroke = None;
        r.style.fill = Some(RED);
        r.begin_shape();
        for (x, y) in [(-1e9, -1e9), (1e9, -1e9), (1e9, 1e9), (-1e9, 1e9)] {
            r.vertex(Point::xy(x, y));
        }
        r.end_shape(true);
        assert!(r.pixels().iter().all(|&p| p == RED));
    }

    #[test]
    fn no_stroke_draws_nothing() {
        let mut r = blank(3, 3);
        r.style.stroke = None;
        r.line(Point::xy(0.0, 0.0), Point::xy(2.0, 0.0));
        assert!(r.pixels().iter().all(|&p| p == color::BLACK));
    }

    #[test]
    fn closed_shape_is_filled() {
        let mut r = blank(10, 10);
        r.style.stroke = None;
        r.style.fill = Some(RED);
        r.begin_shape();
        for (x, y) in [(2.0, 2.0), (8.0, 2.0), (8.0, 8.0), (2.0, 8.0)] {
            r.vertex(Point::xy(x, y));
        }
        r.end_shape(true);

        assert_eq!(r.get(5, 5), Some(RED));
        assert_eq!(r.get(2, 2), Some(RED));
        assert_eq!(r.get(8, 8), Some(color::BLACK));
        assert_eq!(r.get(1, 5), Some(color::BLACK));
    }

    #[test]
    fn vertices_outside_a_shape_are_dropped() {
        let mut r = blank(3, 3);
        r.vertex(Point::xy(1.0, 1.0));
        r.end_shape(false);
        assert!(r.pixels().iter().all(|&p| p == color::BLACK));
    }
}
