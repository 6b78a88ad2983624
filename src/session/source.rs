use crate::foundation::core::Canvas;
use crate::foundation::error::CompositorResult;
use crate::fragment::mask::MaskFragment;

/// How a rasterizer's output differs from the previous call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameChange {
    /// Identical to the previous frame.
    Unchanged,
    /// Same content, different positions.
    Moved,
    /// Content changed.
    Changed,
    /// The source does not track changes.
    Unknown,
}

impl FrameChange {
    /// Map a libass-style change code (`0` none, `1` positions, `2` content).
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Unchanged,
            1 => Self::Moved,
            2 => Self::Changed,
            _ => Self::Unknown,
        }
    }

    /// Return `true` unless the frame is known to be unchanged.
    pub fn is_changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Fragments produced for one timestamp, borrowed from the source.
#[derive(Clone, Debug)]
pub struct SourceFrame<'a> {
    /// Fragments in compositing order (later fragments on top).
    pub fragments: Vec<MaskFragment<'a>>,
    /// Change relative to the source's previous frame.
    pub change: FrameChange,
}

/// The subtitle rasterizer seam.
///
/// Implementations turn a timestamp into mask fragments. Fragments borrow from the source and
/// are dropped before the next call.
pub trait FragmentSource {
    /// Inform the source of the output frame size. Called before the first render and on
    /// every resize.
    fn set_frame_size(&mut self, _canvas: Canvas) -> CompositorResult<()> {
        Ok(())
    }

    /// Rasterize the frame at `time_ms`.
    fn render(&mut self, time_ms: i64) -> CompositorResult<SourceFrame<'_>>;
}
