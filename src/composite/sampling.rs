//! Rotation as an explicit coordinate transform plus bilinear sampling
//!
//! Rather than rotating a drawing context and restoring it afterwards, the
//! tile builder maps every destination pixel back into motif space. The
//! transform is a plain value, so no rotation state can outlive the call
//! that uses it.

use image::{Rgba, RgbaImage};
use std::ops::Range;

/// Inverse mapping from tile pixels into a centered, rotated motif
///
/// Positive angles rotate clockwise on screen (y axis pointing down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotifTransform {
    center: [f64; 2],
    half_extent: [f64; 2],
    cos: f64,
    sin: f64,
}

impl MotifTransform {
    /// Transform placing a `motif_width × motif_height` raster at the
    /// midpoint of a `tile_size` square, rotated by `rotation_degrees`
    pub fn new(tile_size: u32, motif_width: u32, motif_height: u32, rotation_degrees: f64) -> Self {
        let half_tile = f64::from(tile_size) / 2.0;
        let (sin, cos) = rotation_degrees.to_radians().sin_cos();

        Self {
            center: [half_tile, half_tile],
            half_extent: [f64::from(motif_width) / 2.0, f64::from(motif_height) / 2.0],
            cos,
            sin,
        }
    }

    /// Continuous motif coordinates seen by the center of tile pixel `(x, y)`
    pub fn to_motif(&self, x: u32, y: u32) -> [f64; 2] {
        let dx = f64::from(x) + 0.5 - self.center[0];
        let dy = f64::from(y) + 0.5 - self.center[1];

        // Inverse of the clockwise rotation [cos -sin; sin cos]
        let u = dx.mul_add(self.cos, dy * self.sin);
        let v = dy.mul_add(self.cos, -dx * self.sin);

        [u + self.half_extent[0], v + self.half_extent[1]]
    }

    /// Tile columns and rows the rotated motif can touch
    ///
    /// Uses the motif's circumscribed circle so the bound holds for any
    /// angle; one extra pixel covers the bilinear fringe.
    pub fn footprint(&self, tile_size: u32) -> (Range<u32>, Range<u32>) {
        let radius = self.half_extent[0].hypot(self.half_extent[1]) + 1.0;
        let span = |center: f64| {
            let start = (center - radius).floor().max(0.0);
            let end = (center + radius).ceil().min(f64::from(tile_size));
            if end <= start {
                0..0
            } else {
                (start as u32)..(end as u32)
            }
        };

        (span(self.center[0]), span(self.center[1]))
    }
}

/// Bilinear sample at continuous coordinates against a transparent surround
///
/// Pixel `i` covers `[i, i + 1)`, so the sample at `x` blends the pixels
/// whose centers bracket `x`. Channels are interpolated premultiplied to
/// keep transparent neighbours from darkening edges. Returns `None` when
/// the position lies wholly outside the raster.
pub fn bilinear_sample(img: &RgbaImage, x: f64, y: f64) -> Option<Rgba<u8>> {
    let width = i64::from(img.width());
    let height = i64::from(img.height());

    let sx = x - 0.5;
    let sy = y - 0.5;
    let x0 = sx.floor() as i64;
    let y0 = sy.floor() as i64;

    if x0 < -1 || y0 < -1 || x0 >= width || y0 >= height {
        return None;
    }

    let fx = sx - x0 as f64;
    let fy = sy - y0 as f64;

    let fetch = |px: i64, py: i64| -> [f64; 4] {
        if px < 0 || py < 0 || px >= width || py >= height {
            return [0.0; 4];
        }
        let Rgba([r, g, b, a]) = *img.get_pixel(px as u32, py as u32);
        let alpha = f64::from(a) / 255.0;
        [
            f64::from(r) * alpha,
            f64::from(g) * alpha,
            f64::from(b) * alpha,
            f64::from(a),
        ]
    };

    let tl = fetch(x0, y0);
    let tr = fetch(x0 + 1, y0);
    let bl = fetch(x0, y0 + 1);
    let br = fetch(x0 + 1, y0 + 1);

    let lerp = |a: f64, b: f64, t: f64| (b - a).mul_add(t, a);
    let mut mixed = [0.0; 4];
    for (channel, out) in mixed.iter_mut().enumerate() {
        let top = lerp(tl[channel], tr[channel], fx);
        let bottom = lerp(bl[channel], br[channel], fx);
        *out = lerp(top, bottom, fy);
    }

    let [r, g, b, a] = mixed;
    if a <= 0.0 {
        return None;
    }

    let unpremultiply = |c: f64| (c * 255.0 / a).round().clamp(0.0, 255.0) as u8;
    Some(Rgba([
        unpremultiply(r),
        unpremultiply(g),
        unpremultiply(b),
        a.round().clamp(0.0, 255.0) as u8,
    ]))
}

/// Composite `src` over `dst` in place (straight alpha, source-over)
///
/// Opaque sources replace the destination exactly and fully transparent
/// sources leave it untouched.
pub fn composite_over(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    match src[3] {
        0 => {}
        255 => *dst = src,
        src_alpha => {
            let fg_a = f64::from(src_alpha) / 255.0;
            let bg_a = f64::from(dst[3]) / 255.0;
            let out_a = fg_a + bg_a * (1.0 - fg_a);

            let channel = |fg: u8, bg: u8| {
                let premultiplied =
                    f64::from(fg).mul_add(fg_a, f64::from(bg) * bg_a * (1.0 - fg_a));
                (premultiplied / out_a).round().clamp(0.0, 255.0) as u8
            };

            *dst = Rgba([
                channel(src[0], dst[0]),
                channel(src[1], dst[1]),
                channel(src[2], dst[2]),
                (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
            ]);
        }
    }
}
