use crate::foundation::core::Canvas;
use crate::foundation::error::{CompositorError, CompositorResult};
use crate::fragment::dump::FragmentDump;
use crate::fragment::mask::MaskFragment;
use crate::session::source::{FragmentSource, FrameChange, SourceFrame};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One pre-rasterized subtitle event, visible during `[start_ms, end_ms)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Inclusive start time in milliseconds.
    pub start_ms: i64,
    /// Exclusive end time in milliseconds.
    pub end_ms: i64,
    /// Stacking layer; higher layers composite on top.
    #[serde(default)]
    pub layer: i32,
    /// Fragments in compositing order.
    #[serde(default)]
    pub fragments: Vec<FragmentDump>,
}

impl TimelineEvent {
    /// Return `true` when the event is visible at `time_ms`.
    pub fn is_active(&self, time_ms: i64) -> bool {
        self.start_ms <= time_ms && time_ms < self.end_ms
    }
}

/// Pre-rasterized fragment timeline, the JSON-facing input of the CLI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentTimeline {
    /// Frame size the fragments were rasterized for.
    pub canvas: Canvas,
    /// Events in file order.
    #[serde(default)]
    pub events: Vec<TimelineEvent>,
}

impl FragmentTimeline {
    /// Parse a timeline from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CompositorResult<Self> {
        let tl: Self = serde_json::from_reader(r)
            .map_err(|e| CompositorError::serde(format!("parse fragment timeline JSON: {e}")))?;
        tl.validate()?;
        Ok(tl)
    }

    /// Parse a timeline from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CompositorResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CompositorError::validation(format!("open timeline JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check the canvas, event ranges, and every fragment buffer.
    pub fn validate(&self) -> CompositorResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        for (i, ev) in self.events.iter().enumerate() {
            if ev.end_ms < ev.start_ms {
                return Err(CompositorError::validation(format!(
                    "event {i}: end_ms must be >= start_ms"
                )));
            }
            for (j, frag) in ev.fragments.iter().enumerate() {
                frag.validate().map_err(|e| {
                    CompositorError::validation(format!("event {i} fragment {j}: {e}"))
                })?;
            }
        }
        Ok(())
    }

    /// Indices of events visible at `time_ms`, in stacking order (layer, then file order).
    pub fn active_events(&self, time_ms: i64) -> Vec<usize> {
        let mut idx: Vec<usize> = self
            .events
            .iter()
            .enumerate()
            .filter(|(_, ev)| ev.is_active(time_ms))
            .map(|(i, _)| i)
            .collect();
        idx.sort_by_key(|&i| (self.events[i].layer, i));
        idx
    }
}

/// In-memory [`FragmentSource`] replaying a [`FragmentTimeline`].
///
/// Reports [`FrameChange::Changed`] whenever the set of visible events differs from the
/// previous call, [`FrameChange::Unchanged`] otherwise.
pub struct TimelineSource {
    timeline: FragmentTimeline,
    frame_size: Option<Canvas>,
    last_active: Option<Vec<usize>>,
}

impl TimelineSource {
    /// Wrap a validated timeline.
    pub fn new(timeline: FragmentTimeline) -> Self {
        Self {
            timeline,
            frame_size: None,
            last_active: None,
        }
    }

    /// The replayed timeline.
    pub fn timeline(&self) -> &FragmentTimeline {
        &self.timeline
    }
}

impl FragmentSource for TimelineSource {
    fn set_frame_size(&mut self, canvas: Canvas) -> CompositorResult<()> {
        if canvas != self.timeline.canvas {
            tracing::warn!(
                frame = ?(canvas.width, canvas.height),
                rasterized = ?(self.timeline.canvas.width, self.timeline.canvas.height),
                "frame size differs from the timeline's rasterization size; fragments are not rescaled"
            );
        }
        self.frame_size = Some(canvas);
        self.last_active = None;
        Ok(())
    }

    fn render(&mut self, time_ms: i64) -> CompositorResult<SourceFrame<'_>> {
        let active = self.timeline.active_events(time_ms);
        let change = match &self.last_active {
            Some(prev) if *prev == active => FrameChange::Unchanged,
            _ => FrameChange::Changed,
        };

        let fragments: Vec<MaskFragment<'_>> = active
            .iter()
            .flat_map(|&i| self.timeline.events[i].fragments.iter())
            .map(FragmentDump::as_fragment)
            .collect();
        self.last_active = Some(active);

        Ok(SourceFrame { fragments, change })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/timeline.rs"]
mod tests;
