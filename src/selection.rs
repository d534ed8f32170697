use std::ops::Range;

/// One rectangular gesture over the waveform, in sample-index coordinates.
/// The two edges may come in either order and may lie outside the buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSelection {
    pub x: [f64; 2],
}

impl BoxSelection {
    pub fn new(a: f64, b: f64) -> Self {
        Self { x: [a, b] }
    }
}

/// Resolve the list of box gestures into the sample range the spectrum works
/// on. An empty list means "no selection" and yields `None`. Only the first
/// box counts. Edges are truncated toward zero
/// and clamped to `[0, len]`; `start == end` is a valid, empty range.
pub fn selected_range(boxes: &[BoxSelection], len: usize) -> Option<Range<usize>> {
    let first = boxes.first()?;
    let lo = first.x[0].min(first.x[1]);
    let hi = first.x[0].max(first.x[1]);
    let clamp = |v: f64| -> usize {
        if v.is_nan() || v <= 0.0 {
            0
        } else {
            (v.trunc() as usize).min(len)
        }
    };
    Some(clamp(lo)..clamp(hi))
}

/// In-progress keyboard or mouse gesture. `anchor` is where the box started,
/// `current` follows the cursor until the gesture is committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub anchor: f64,
    pub current: f64,
}

impl Gesture {
    pub fn new(at: f64) -> Self {
        Self {
            anchor: at,
            current: at,
        }
    }

    /// Both edges truncate to the same sample, so the box would be empty.
    pub fn is_click(self) -> bool {
        self.anchor.trunc() == self.current.trunc()
    }

    pub fn to_box(self) -> BoxSelection {
        BoxSelection::new(self.anchor, self.current)
    }
}
