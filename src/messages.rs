use std::sync::Arc;

use crate::audio::buffer::AudioBuffer;
use crate::params::Params;

/// Messages from UI thread → Controller
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    StartRecording,
    CancelRecording,
    FocusNext,
    FocusPrev,
    /// Step the focused parameter up (`true`) or down
    Adjust(bool),
    /// Move the waveform cursor by a fraction of the buffer
    MoveCursor(f64),
    /// Anchor a box at the cursor, or commit the open one
    ToggleAnchor,
    ClearSelection,
    ToggleDataView,
    /// Switch between raw and per-sample magnitudes
    ToggleScaling,
    /// Scroll the raw data table by rows
    ScrollData(i64),
    /// Mouse press/drag/release at terminal (column, row)
    PointerDown(u16, u16),
    PointerDrag(u16, u16),
    PointerUp(u16, u16),
    Quit,
}

/// Messages from Controller → Recorder worker
#[derive(Debug, Clone)]
pub enum RecorderCmd {
    Start(Params),
    Shutdown,
}

/// Messages from Recorder worker → Controller
#[derive(Debug, Clone)]
pub enum RecorderMsg {
    Progress { captured: usize, total: usize },
    Finished(Arc<AudioBuffer>),
    Failed(String),
    Cancelled,
}
