//! CPU surface: an RGBA8 pixel buffer with the small 2D drawing
//! vocabulary the motion generators use.
//!
//! Shapes are rasterized with a one-pixel smoothed edge (signed-distance
//! coverage) and composited source-over with straight alpha, so stacked
//! translucent dots and lines accumulate the way embedders expect.

use glam::Vec2;

use crate::color::Rgba;
use crate::error::HaloError;

/// Maximum side length accepted for a surface.
pub const MAX_DIMENSION: u32 = 8192;

fn validate_dims(width: u32, height: u32) -> Result<(), HaloError> {
    if width == 0 || height == 0 {
        return Err(HaloError::Surface(format!(
            "zero-area surface: {width}x{height}"
        )));
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(HaloError::Surface(format!(
            "surface {width}x{height} exceeds the {MAX_DIMENSION} px limit"
        )));
    }
    Ok(())
}

/// An owned RGBA8 pixel surface.
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Allocate a cleared surface.
    ///
    /// # Errors
    /// `HaloError::Surface` when either dimension is zero or exceeds
    /// [`MAX_DIMENSION`].
    pub fn new(width: u32, height: u32) -> Result<Self, HaloError> {
        validate_dims(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        })
    }

    /// Surface width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Geometric center of the surface.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    /// Raw RGBA8 bytes, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Reallocate to a new size. The surface comes back cleared.
    ///
    /// # Errors
    /// `HaloError::Surface` on invalid dimensions; the old buffer is left
    /// untouched in that case.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), HaloError> {
        validate_dims(width, height)?;
        self.width = width;
        self.height = height;
        self.pixels = vec![0; width as usize * height as usize * 4];
        Ok(())
    }

    /// Fill the whole surface with the background color. A fully
    /// transparent background zeroes the buffer.
    pub fn clear(&mut self, background: Rgba) {
        if !background.is_visible() {
            self.pixels.fill(0);
            return;
        }
        let px = [
            to_byte(background.r),
            to_byte(background.g),
            to_byte(background.b),
            to_byte(background.a),
        ];
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Color at a pixel, converted back to unit-range components.
    #[must_use]
    pub fn sample(&self, x: u32, y: u32) -> Rgba {
        if x >= self.width || y >= self.height {
            return Rgba::TRANSPARENT;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Rgba::new(
            f32::from(self.pixels[i]) / 255.0,
            f32::from(self.pixels[i + 1]) / 255.0,
            f32::from(self.pixels[i + 2]) / 255.0,
            f32::from(self.pixels[i + 3]) / 255.0,
        )
    }

    /// Count of pixels with nonzero alpha. Diagnostic helper.
    #[must_use]
    pub fn lit_pixels(&self) -> usize {
        self.pixels
            .chunks_exact(4)
            .filter(|chunk| chunk[3] > 0)
            .count()
    }

    /// Filled circle.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if !color.is_visible() || !radius.is_finite() || radius <= 0.0 {
            return;
        }
        if !center.is_finite() {
            return;
        }
        self.scan_bbox(
            center - Vec2::splat(radius),
            center + Vec2::splat(radius),
            |p| {
                let coverage = (radius - p.distance(center) + 0.5)
                    .clamp(0.0, 1.0);
                coverage * color.a
            },
            color,
        );
    }

    /// Circle outline of the given stroke width.
    pub fn stroke_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        line_width: f32,
        color: Rgba,
    ) {
        if !color.is_visible() || !radius.is_finite() || radius <= 0.0 {
            return;
        }
        if !center.is_finite() || !line_width.is_finite() || line_width <= 0.0
        {
            return;
        }
        let reach = radius + line_width * 0.5;
        self.scan_bbox(
            center - Vec2::splat(reach),
            center + Vec2::splat(reach),
            |p| {
                let d = (p.distance(center) - radius).abs();
                let coverage =
                    (line_width * 0.5 - d + 0.5).clamp(0.0, 1.0);
                coverage * color.a
            },
            color,
        );
    }

    /// Straight line segment of the given stroke width.
    pub fn stroke_line(
        &mut self,
        a: Vec2,
        b: Vec2,
        line_width: f32,
        color: Rgba,
    ) {
        if !color.is_visible() || !a.is_finite() || !b.is_finite() {
            return;
        }
        if !line_width.is_finite() || line_width <= 0.0 {
            return;
        }
        let pad = Vec2::splat(line_width * 0.5);
        self.scan_bbox(a.min(b) - pad, a.max(b) + pad, |p| {
            let d = segment_distance(p, a, b);
            let coverage = (line_width * 0.5 - d + 0.5).clamp(0.0, 1.0);
            coverage * color.a
        }, color);
    }

    /// Open polyline; callers close paths by repeating the first point.
    pub fn stroke_polyline(
        &mut self,
        points: &[Vec2],
        line_width: f32,
        color: Rgba,
    ) {
        for pair in points.windows(2) {
            self.stroke_line(pair[0], pair[1], line_width, color);
        }
    }

    /// Visit every pixel center in the clamped bounding box and blend the
    /// shape color at the coverage the closure reports.
    fn scan_bbox(
        &mut self,
        min: Vec2,
        max: Vec2,
        coverage_at: impl Fn(Vec2) -> f32,
        color: Rgba,
    ) {
        // Expand by the feather radius, then clamp to the surface.
        let x0 = (min.x - 1.0).floor().max(0.0) as u32;
        let y0 = (min.y - 1.0).floor().max(0.0) as u32;
        let x1 = (max.x + 1.0).ceil().min(self.width as f32 - 1.0);
        let y1 = (max.y + 1.0).ceil().min(self.height as f32 - 1.0);
        if x1 < 0.0 || y1 < 0.0 {
            return;
        }
        let (x1, y1) = (x1 as u32, y1 as u32);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let alpha = coverage_at(p);
                if alpha > 0.0 {
                    self.blend(x, y, color.with_alpha(alpha));
                }
            }
        }
    }

    /// Source-over blend of one pixel with straight alpha.
    fn blend(&mut self, x: u32, y: u32, src: Rgba) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let dst_a = f32::from(self.pixels[i + 3]) / 255.0;
        let src_a = src.a.clamp(0.0, 1.0);
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return;
        }
        let mix = |dst: u8, s: f32| {
            let d = f32::from(dst) / 255.0;
            to_byte((s * src_a + d * dst_a * (1.0 - src_a)) / out_a)
        };
        self.pixels[i] = mix(self.pixels[i], src.r);
        self.pixels[i + 1] = mix(self.pixels[i + 1], src.g);
        self.pixels[i + 2] = mix(self.pixels[i + 2], src.b);
        self.pixels[i + 3] = to_byte(out_a);
    }
}

fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Distance from a point to a line segment.
fn segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
