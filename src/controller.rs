use tracing::{debug, info, warn};

use crate::app::{AppState, Focus, Phase};
use crate::audio::recorder::{RecordError, RecorderHandle};
use crate::constants::DATA_PAGE_ROWS;
use crate::messages::{RecorderMsg, UiEvent};
use crate::params::Params;
use crate::selection::Gesture;

/// What the controller needs from the recorder worker.
pub trait RecorderControl {
    fn start(&self, params: Params) -> Result<bool, RecordError>;
    fn cancel(&self);
}

impl RecorderControl for RecorderHandle {
    fn start(&self, params: Params) -> Result<bool, RecordError> {
        RecorderHandle::start(self, params)
    }

    fn cancel(&self) {
        RecorderHandle::cancel(self)
    }
}

pub fn handle_ui_event(state: &mut AppState, event: UiEvent, recorder: &dyn RecorderControl) {
    match event {
        UiEvent::Quit => {
            if state.phase == Phase::Recording {
                recorder.cancel();
            }
            state.should_quit = true;
        }
        UiEvent::StartRecording => {
            if state.phase == Phase::Recording {
                return;
            }
            match recorder.start(state.params) {
                Ok(true) => {
                    info!(
                        sample_rate = state.params.sample_rate(),
                        duration = state.params.duration_secs(),
                        "start requested"
                    );
                    state.phase = Phase::Recording;
                    state.progress = (0, state.params.expected_frames());
                    state.error = None;
                    state.gesture = None;
                }
                Ok(false) => warn!("recorder busy, start ignored"),
                Err(e) => state.error = Some(e.to_string()),
            }
        }
        UiEvent::CancelRecording => {
            if state.phase == Phase::Recording {
                recorder.cancel();
            }
        }
        UiEvent::FocusNext => {
            state.focus = state.focus.next(state.has_recording());
        }
        UiEvent::FocusPrev => {
            state.focus = state.focus.prev(state.has_recording());
        }
        UiEvent::Adjust(up) => {
            let Focus::Param(field) = state.focus else {
                return;
            };
            if state.params_locked() {
                return;
            }
            let before = state.params;
            state.params.step(field, up);
            if state.params != before && state.has_recording() {
                state.refresh_spectrum();
            }
        }
        UiEvent::MoveCursor(fraction) => {
            let len = state.buffer_len();
            if len == 0 || state.focus != Focus::Waveform {
                return;
            }
            let max = len as f64;
            state.cursor = (state.cursor + fraction * max).clamp(0.0, max);
            if let Some(g) = state.gesture.as_mut() {
                g.current = state.cursor;
            }
        }
        UiEvent::ToggleAnchor => {
            if !state.has_recording() || state.focus != Focus::Waveform {
                return;
            }
            match state.gesture.take() {
                None => state.gesture = Some(Gesture::new(state.cursor)),
                Some(g) => commit_gesture(state, g),
            }
        }
        UiEvent::ClearSelection => {
            state.gesture = None;
            if !state.boxes.is_empty() {
                state.boxes.clear();
                debug!("selection cleared");
                state.refresh_spectrum();
            }
        }
        UiEvent::ToggleDataView => {
            if state.has_recording() {
                state.show_data = !state.show_data;
            }
        }
        UiEvent::ToggleScaling => {
            let scaling = state.scaling().toggled();
            debug!(scaling = scaling.label(), "scaling changed");
            state.set_scaling(scaling);
        }
        UiEvent::ScrollData(rows) => {
            let len = state.buffer_len();
            if len == 0 {
                return;
            }
            let max = len.saturating_sub(1) as i64;
            state.data_offset = (state.data_offset as i64 + rows).clamp(0, max) as usize;
        }
        UiEvent::PointerDown(col, row) => {
            if let Some(x) = pointer_to_sample(state, col, row) {
                state.focus = Focus::Waveform;
                state.cursor = x;
                state.gesture = Some(Gesture::new(x));
            }
        }
        UiEvent::PointerDrag(col, _row) => {
            if state.gesture.is_none() {
                return;
            }
            if let Some(x) = column_to_sample(state, col) {
                state.cursor = x;
                if let Some(g) = state.gesture.as_mut() {
                    g.current = x;
                }
            }
        }
        UiEvent::PointerUp(col, _row) => {
            let Some(mut g) = state.gesture.take() else {
                return;
            };
            if let Some(x) = column_to_sample(state, col) {
                g.current = x;
                state.cursor = x;
            }
            commit_gesture(state, g);
        }
    }
}

/// A finished gesture replaces the selection list with a single box. A
/// gesture that starts and ends on the same sample is a click, not a box, and
/// leaves the selection alone.
fn commit_gesture(state: &mut AppState, gesture: Gesture) {
    if gesture.is_click() {
        debug!(at = gesture.anchor, "click on waveform, selection kept");
        return;
    }
    state.boxes = vec![gesture.to_box()];
    debug!(range = ?state.selected_range(), "selection committed");
    state.refresh_spectrum();
}

pub fn handle_recorder_msg(state: &mut AppState, msg: RecorderMsg) {
    match msg {
        RecorderMsg::Progress { captured, total } => {
            if state.phase == Phase::Recording {
                state.progress = (captured, total);
            }
        }
        RecorderMsg::Finished(buffer) => {
            info!(samples = buffer.len(), "recording ready");
            state.set_buffer(buffer);
            state.phase = Phase::Viewing;
        }
        RecorderMsg::Failed(err) => {
            state.error = Some(err);
            state.phase = resting_phase(state);
        }
        RecorderMsg::Cancelled => {
            state.phase = resting_phase(state);
        }
    }
}

fn resting_phase(state: &AppState) -> Phase {
    if state.has_recording() {
        Phase::Viewing
    } else {
        Phase::Idle
    }
}

/// Page-jump helper for the data table.
pub fn page_rows(down: bool) -> i64 {
    if down {
        DATA_PAGE_ROWS as i64
    } else {
        -(DATA_PAGE_ROWS as i64)
    }
}

fn pointer_to_sample(state: &AppState, col: u16, row: u16) -> Option<f64> {
    let plot = state.waveform_plot?;
    if row < plot.y || row >= plot.y + plot.height {
        return None;
    }
    if col < plot.x || col >= plot.x + plot.width {
        return None;
    }
    column_to_sample(state, col)
}

/// Map a terminal column over the waveform plot to a sample position. Columns
/// left or right of the plot clamp to its edges.
fn column_to_sample(state: &AppState, col: u16) -> Option<f64> {
    let plot = state.waveform_plot?;
    let len = state.buffer_len();
    if len == 0 || plot.width == 0 {
        return None;
    }
    let span = plot.width.saturating_sub(1).max(1) as f64;
    let offset = col.saturating_sub(plot.x).min(plot.width.saturating_sub(1)) as f64;
    Some(offset / span * len as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::buffer::AudioBuffer;
    use crate::dsp::spectrum::Scaling;
    use crate::params::ParamField;
    use ratatui::layout::Rect;
    use std::cell::{Cell, RefCell};
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeRecorder {
        started: RefCell<Vec<Params>>,
        cancelled: Cell<bool>,
        busy: Cell<bool>,
    }

    impl RecorderControl for FakeRecorder {
        fn start(&self, params: Params) -> Result<bool, RecordError> {
            if self.busy.get() {
                return Ok(false);
            }
            self.started.borrow_mut().push(params);
            Ok(true)
        }

        fn cancel(&self) {
            self.cancelled.set(true);
        }
    }

    fn viewing_state(len: usize) -> AppState {
        let mut state = AppState::new(Params::default(), Scaling::Raw);
        let samples: Vec<f32> = (0..len).map(|i| (i as f32 * 0.01).sin()).collect();
        handle_recorder_msg(
            &mut state,
            RecorderMsg::Finished(Arc::new(AudioBuffer::new(samples, 44_100))),
        );
        state
    }

    #[test]
    fn start_moves_idle_to_recording() {
        let rec = FakeRecorder::default();
        let mut state = AppState::new(Params::default(), Scaling::Raw);
        assert_eq!(state.phase, Phase::Idle);

        handle_ui_event(&mut state, UiEvent::StartRecording, &rec);
        assert_eq!(state.phase, Phase::Recording);
        assert_eq!(rec.started.borrow().len(), 1);
        assert_eq!(state.progress, (0, 441_000));

        // a second start while recording is ignored
        handle_ui_event(&mut state, UiEvent::StartRecording, &rec);
        assert_eq!(rec.started.borrow().len(), 1);
    }

    #[test]
    fn finished_moves_to_viewing_with_full_spectrum() {
        let state = viewing_state(441_000);
        assert_eq!(state.phase, Phase::Viewing);
        assert_eq!(state.spectrum.window_len, 441_000);
        assert!(state
            .spectrum
            .points
            .iter()
            .all(|&(f, _)| (0.0..=100.0).contains(&f)));
        assert_eq!(state.spectrum.len(), 1_001);
    }

    #[test]
    fn failure_without_recording_returns_to_idle() {
        let rec = FakeRecorder::default();
        let mut state = AppState::new(Params::default(), Scaling::Raw);
        handle_ui_event(&mut state, UiEvent::StartRecording, &rec);
        handle_recorder_msg(&mut state, RecorderMsg::Failed("no audio input device available".into()));
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.error.as_deref(), Some("no audio input device available"));
        assert!(state.buffer.is_none());
    }

    #[test]
    fn cancel_keeps_previous_recording() {
        let rec = FakeRecorder::default();
        let mut state = viewing_state(1_000);
        handle_ui_event(&mut state, UiEvent::StartRecording, &rec);
        handle_ui_event(&mut state, UiEvent::CancelRecording, &rec);
        assert!(rec.cancelled.get());
        handle_recorder_msg(&mut state, RecorderMsg::Cancelled);
        assert_eq!(state.phase, Phase::Viewing);
        assert_eq!(state.buffer_len(), 1_000);
    }

    #[test]
    fn params_locked_while_recording() {
        let rec = FakeRecorder::default();
        let mut state = AppState::new(Params::default(), Scaling::Raw);
        state.focus = Focus::Param(ParamField::Duration);
        handle_ui_event(&mut state, UiEvent::StartRecording, &rec);
        handle_ui_event(&mut state, UiEvent::Adjust(true), &rec);
        assert_eq!(state.params.duration_secs(), 10);
    }

    #[test]
    fn band_change_recomputes_spectrum() {
        let rec = FakeRecorder::default();
        let mut state = viewing_state(44_100);
        state.focus = Focus::Param(ParamField::MaxHz);
        handle_ui_event(&mut state, UiEvent::Adjust(true), &rec);
        assert_eq!(state.params.max_hz(), 200);
        assert_eq!(state.spectrum.points.last().map(|p| p.0), Some(200.0));
    }

    #[test]
    fn inverted_band_gives_empty_spectrum() {
        let rec = FakeRecorder::default();
        let mut state = viewing_state(44_100);
        state.focus = Focus::Param(ParamField::MinHz);
        for _ in 0..5 {
            handle_ui_event(&mut state, UiEvent::Adjust(true), &rec);
        }
        assert_eq!(state.params.min_hz(), 500);
        assert!(state.spectrum.is_empty());
    }

    #[test]
    fn keyboard_box_selects_window() {
        let rec = FakeRecorder::default();
        let mut state = viewing_state(1_000);
        state.focus = Focus::Waveform;

        handle_ui_event(&mut state, UiEvent::MoveCursor(0.1), &rec);
        handle_ui_event(&mut state, UiEvent::ToggleAnchor, &rec);
        handle_ui_event(&mut state, UiEvent::MoveCursor(0.1), &rec);
        handle_ui_event(&mut state, UiEvent::ToggleAnchor, &rec);

        assert_eq!(state.selected_range(), Some(100..200));
        assert_eq!(state.spectrum.window_len, 100);

        handle_ui_event(&mut state, UiEvent::ClearSelection, &rec);
        assert_eq!(state.selected_range(), None);
        assert_eq!(state.spectrum.window_len, 1_000);
    }

    #[test]
    fn cursor_ignored_without_waveform_focus() {
        let rec = FakeRecorder::default();
        let mut state = viewing_state(1_000);
        handle_ui_event(&mut state, UiEvent::MoveCursor(0.5), &rec);
        assert_eq!(state.cursor, 0.0);
    }

    #[test]
    fn mouse_drag_selects_window() {
        let rec = FakeRecorder::default();
        let mut state = viewing_state(1_001);
        state.waveform_plot = Some(Rect::new(10, 5, 11, 10));

        handle_ui_event(&mut state, UiEvent::PointerDown(12, 6), &rec);
        assert_eq!(state.focus, Focus::Waveform);
        handle_ui_event(&mut state, UiEvent::PointerDrag(15, 6), &rec);
        handle_ui_event(&mut state, UiEvent::PointerUp(16, 7), &rec);

        // columns 12 and 16 of a 11-wide plot starting at 10: 2/10 and 6/10
        assert_eq!(state.selected_range(), Some(200..600));
    }

    #[test]
    fn click_without_drag_keeps_spectrum() {
        let rec = FakeRecorder::default();
        let mut state = viewing_state(1_001);
        state.waveform_plot = Some(Rect::new(10, 5, 11, 10));
        let full = state.spectrum.clone();

        handle_ui_event(&mut state, UiEvent::PointerDown(20, 6), &rec);
        handle_ui_event(&mut state, UiEvent::PointerUp(20, 6), &rec);
        assert_eq!(state.focus, Focus::Waveform);
        assert!(state.boxes.is_empty());
        assert_eq!(state.spectrum, full);

        // an existing box survives a click too
        handle_ui_event(&mut state, UiEvent::PointerDown(12, 6), &rec);
        handle_ui_event(&mut state, UiEvent::PointerUp(16, 6), &rec);
        let selected = state.spectrum.clone();
        handle_ui_event(&mut state, UiEvent::PointerDown(18, 6), &rec);
        handle_ui_event(&mut state, UiEvent::PointerUp(18, 6), &rec);
        assert_eq!(state.selected_range(), Some(200..600));
        assert_eq!(state.spectrum, selected);
    }

    #[test]
    fn anchor_twice_in_place_keeps_spectrum() {
        let rec = FakeRecorder::default();
        let mut state = viewing_state(1_000);
        state.focus = Focus::Waveform;
        let full = state.spectrum.clone();

        handle_ui_event(&mut state, UiEvent::MoveCursor(0.1), &rec);
        handle_ui_event(&mut state, UiEvent::ToggleAnchor, &rec);
        handle_ui_event(&mut state, UiEvent::ToggleAnchor, &rec);

        assert!(state.gesture.is_none());
        assert_eq!(state.selected_range(), None);
        assert_eq!(state.spectrum, full);
    }

    #[test]
    fn click_outside_plot_does_nothing() {
        let rec = FakeRecorder::default();
        let mut state = viewing_state(1_000);
        state.waveform_plot = Some(Rect::new(10, 5, 11, 10));
        handle_ui_event(&mut state, UiEvent::PointerDown(2, 2), &rec);
        handle_ui_event(&mut state, UiEvent::PointerUp(15, 6), &rec);
        assert!(state.boxes.is_empty());
    }

    #[test]
    fn data_scroll_clamps() {
        let rec = FakeRecorder::default();
        let mut state = viewing_state(50);
        handle_ui_event(&mut state, UiEvent::ScrollData(-5), &rec);
        assert_eq!(state.data_offset, 0);
        handle_ui_event(&mut state, UiEvent::ScrollData(page_rows(true) * 10), &rec);
        assert_eq!(state.data_offset, 49);
    }

    #[test]
    fn quit_cancels_running_recording() {
        let rec = FakeRecorder::default();
        let mut state = AppState::new(Params::default(), Scaling::Raw);
        handle_ui_event(&mut state, UiEvent::StartRecording, &rec);
        handle_ui_event(&mut state, UiEvent::Quit, &rec);
        assert!(rec.cancelled.get());
        assert!(state.should_quit);
    }

    #[test]
    fn scaling_toggle_rescales_spectrum() {
        let rec = FakeRecorder::default();
        let mut state = viewing_state(44_100);
        let (_, raw) = state.spectrum.peak().expect("bins in band");

        handle_ui_event(&mut state, UiEvent::ToggleScaling, &rec);
        assert_eq!(state.scaling(), Scaling::PerSample);
        let (_, scaled) = state.spectrum.peak().expect("bins in band");
        assert!((scaled - raw / 44_100.0).abs() < 1e-6 * raw.max(1.0));

        handle_ui_event(&mut state, UiEvent::ToggleScaling, &rec);
        assert_eq!(state.scaling(), Scaling::Raw);
    }
}
