use crate::foundation::error::{CompositorError, CompositorResult};
use crate::fragment::mask::MaskFragment;
use serde::{Deserialize, Serialize};

/// Packed `0xRRGGBBAA` fragment color as it appears in JSON fixtures.
///
/// Accepts either the raw integer or a `"#RRGGBBAA"` / `"0xRRGGBBAA"` string. The low byte
/// keeps the rasterizer's inverted-alpha meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PackedColor(pub u32);

impl Serialize for PackedColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("#{:08X}", self.0))
    }
}

impl<'de> Deserialize<'de> for PackedColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Int(u32),
            Hex(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Int(v) => Ok(Self(v)),
            Repr::Hex(s) => parse_packed_hex(&s)
                .map(Self)
                .map_err(serde::de::Error::custom),
        }
    }
}

fn parse_packed_hex(s: &str) -> Result<u32, String> {
    let digits = s
        .strip_prefix('#')
        .or_else(|| s.strip_prefix("0x"))
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.len() != 8 {
        return Err(format!(
            "packed color '{s}' must have exactly 8 hex digits (RRGGBBAA)"
        ));
    }
    u32::from_str_radix(digits, 16).map_err(|e| format!("packed color '{s}': {e}"))
}

/// Owned, serializable copy of one [`MaskFragment`].
///
/// Used for fixtures and the CLI's timeline files; the compositor itself only ever sees
/// borrowed fragments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentDump {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Row length in bytes. Defaults to `width` when omitted.
    #[serde(default)]
    pub stride: Option<i32>,
    /// Canvas column of the top-left corner.
    #[serde(default)]
    pub dst_x: i32,
    /// Canvas row of the top-left corner.
    #[serde(default)]
    pub dst_y: i32,
    /// Packed tint color.
    pub color: PackedColor,
    /// Coverage bytes, `height * stride` long.
    pub bitmap: Vec<u8>,
}

impl FragmentDump {
    /// Capture a borrowed fragment, copying only the bytes covered by its rows.
    pub fn capture(frag: &MaskFragment<'_>) -> Self {
        let mut bitmap = Vec::new();
        for (_, row) in frag.rows() {
            bitmap.extend_from_slice(row);
        }
        Self {
            width: frag.width,
            height: frag.height,
            stride: Some(frag.width.max(0)),
            dst_x: frag.dst_x,
            dst_y: frag.dst_y,
            color: PackedColor(frag.color),
            bitmap,
        }
    }

    /// Effective row stride.
    pub fn stride(&self) -> i32 {
        self.stride.unwrap_or(self.width)
    }

    /// Check stride and bitmap length. Degenerate sizes are allowed: they are skipped later.
    pub fn validate(&self) -> CompositorResult<()> {
        if self.width <= 0 || self.height <= 0 {
            return Ok(());
        }
        let stride = self.stride();
        if stride < self.width {
            return Err(CompositorError::validation(format!(
                "fragment stride {stride} is smaller than width {}",
                self.width
            )));
        }
        let need = (self.height as usize)
            .checked_mul(stride as usize)
            .ok_or_else(|| CompositorError::validation("fragment bitmap size overflow"))?;
        if self.bitmap.len() < need {
            return Err(CompositorError::validation(format!(
                "fragment bitmap has {} bytes, expected at least {need}",
                self.bitmap.len()
            )));
        }
        Ok(())
    }

    /// Borrow as a [`MaskFragment`].
    pub fn as_fragment(&self) -> MaskFragment<'_> {
        MaskFragment {
            width: self.width,
            height: self.height,
            stride: self.stride(),
            bitmap: &self.bitmap,
            color: self.color.0,
            dst_x: self.dst_x,
            dst_y: self.dst_y,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fragment/dump.rs"]
mod tests;
