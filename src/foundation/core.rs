use crate::foundation::error::{CompositorError, CompositorResult};

/// Output canvas dimensions in pixels (the configured subtitle frame size).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions that fit the signed fragment
    /// coordinate space.
    pub fn new(width: u32, height: u32) -> CompositorResult<Self> {
        if width == 0 || height == 0 {
            return Err(CompositorError::validation(
                "canvas width and height must be > 0",
            ));
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(CompositorError::validation(
                "canvas dimensions must fit in i32",
            ));
        }
        let canvas = Self { width, height };
        canvas.pixel_count()?;
        Ok(canvas)
    }

    /// Number of pixels in a full-canvas buffer.
    pub fn pixel_count(self) -> CompositorResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or_else(|| CompositorError::validation("canvas pixel count overflows usize"))
    }

    /// Width as a signed coordinate (saturating).
    pub fn width_i32(self) -> i32 {
        i32::try_from(self.width).unwrap_or(i32::MAX)
    }

    /// Height as a signed coordinate (saturating).
    pub fn height_i32(self) -> i32 {
        i32::try_from(self.height).unwrap_or(i32::MAX)
    }
}

/// Half-open rectangle `[left, right) × [top, bottom)` in canvas coordinates.
///
/// A box with `right <= left` or `bottom <= top` means "no content".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    /// Inclusive left edge.
    pub left: i32,
    /// Inclusive top edge.
    pub top: i32,
    /// Exclusive right edge.
    pub right: i32,
    /// Exclusive bottom edge.
    pub bottom: i32,
}

impl BoundingBox {
    /// Construct a box from its four edges.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The canonical empty box for `canvas`: `(canvas_w, canvas_h, 0, 0)`.
    pub fn empty(canvas: Canvas) -> Self {
        Self::new(canvas.width_i32(), canvas.height_i32(), 0, 0)
    }

    /// Return `true` when the box contains no pixels.
    pub fn is_empty(self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Width in pixels, `0` when empty.
    pub fn width(self) -> u32 {
        if self.is_empty() {
            return 0;
        }
        self.right.abs_diff(self.left)
    }

    /// Height in pixels, `0` when empty.
    pub fn height(self) -> u32 {
        if self.is_empty() {
            return 0;
        }
        self.bottom.abs_diff(self.top)
    }

    /// Return `true` when `(x, y)` lies inside the box.
    pub fn contains(self, x: i32, y: i32) -> bool {
        self.left <= x && x < self.right && self.top <= y && y < self.bottom
    }

    /// Return `true` when the box lies fully inside `canvas`.
    pub fn within(self, canvas: Canvas) -> bool {
        self.left >= 0
            && self.top >= 0
            && self.right <= canvas.width_i32()
            && self.bottom <= canvas.height_i32()
    }

    /// As `[left, top, right, bottom]`, the layout hosts expect for the output rect.
    pub fn to_array(self) -> [i32; 4] {
        [self.left, self.top, self.right, self.bottom]
    }
}

/// Pack channels into a `0xAARRGGBB` pixel.
#[inline]
pub fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Unpack a `0xAARRGGBB` pixel into `[a, r, g, b]`.
#[inline]
pub fn unpack_argb(px: u32) -> [u8; 4] {
    [(px >> 24) as u8, (px >> 16) as u8, (px >> 8) as u8, px as u8]
}

/// Convert `0xAARRGGBB` pixels into tightly packed RGBA8 bytes.
pub fn argb_to_rgba8(pixels: &[u32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixels.len().saturating_mul(4));
    for &px in pixels {
        let [a, r, g, b] = unpack_argb(px);
        out.extend_from_slice(&[r, g, b, a]);
    }
    out
}

/// Uniform tint of one fragment, decoded from its packed `0xRRGGBBAA` color.
///
/// The low byte is an *inverted* alpha: `0` is a fully opaque tint and `255` a fully
/// transparent one. Coverage bytes in the mask use the opposite convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TintColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Inverted alpha as stored in the packed color.
    pub alpha_inv: u8,
}

impl TintColor {
    /// Decode a packed `0xRRGGBBAA` color.
    pub fn from_packed(color: u32) -> Self {
        Self {
            r: (color >> 24) as u8,
            g: (color >> 16) as u8,
            b: (color >> 8) as u8,
            alpha_inv: color as u8,
        }
    }

    /// Re-encode into the packed `0xRRGGBBAA` form.
    pub fn to_packed(self) -> u32 {
        (u32::from(self.r) << 24)
            | (u32::from(self.g) << 16)
            | (u32::from(self.b) << 8)
            | u32::from(self.alpha_inv)
    }

    /// Conventional (non-inverted) opacity: `255 - alpha_inv`.
    #[inline]
    pub fn opacity(self) -> u8 {
        255 - self.alpha_inv
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
