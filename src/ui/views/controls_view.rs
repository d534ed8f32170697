use ratatui::layout::Rect;
use ratatui::Frame;

use crate::app::{AppState, Focus, Phase};
use crate::params::ParamField;
use crate::ui::layout::ControlsLayout;
use crate::ui::views::View;
use crate::ui::widgets::param_panel::ParamWidget;
use crate::ui::widgets::start_bar::StartBarWidget;
use crate::ui::widgets::status_line::StatusLineWidget;

/// Parameter row, start button / progress gauge and the status line.
pub struct ControlsView;

impl View for ControlsView {
    fn render(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        let layout = ControlsLayout::new(area);
        let locked = state.params_locked();

        for (field, rect) in ParamField::ALL.iter().zip(layout.params) {
            frame.render_widget(
                ParamWidget {
                    field: *field,
                    params: state.params,
                    focused: state.focus == Focus::Param(*field),
                    locked,
                },
                rect,
            );
        }

        let (captured, total) = state.progress;
        frame.render_widget(
            StartBarWidget {
                phase: state.phase,
                ratio: state.progress_ratio(),
                sample_rate: state.params.sample_rate(),
                captured,
                total,
            },
            layout.start,
        );

        frame.render_widget(
            StatusLineWidget {
                error: state.error.as_deref(),
                note: status_note(state),
            },
            layout.status,
        );
    }
}

fn status_note(state: &AppState) -> String {
    match (state.phase, state.buffer.as_ref()) {
        (Phase::Recording, _) => format!("Capturing from {}", state.source_name),
        (_, Some(buffer)) => {
            let band = if state.params.band_inverted() {
                " (empty band)".to_string()
            } else {
                String::new()
            };
            format!(
                "{} of {} samples ({:.2}s) @ {} Hz, band {}-{} Hz{}",
                state.analysis_window().len(),
                buffer.len(),
                buffer.duration_secs(),
                buffer.sample_rate(),
                state.params.min_hz(),
                state.params.max_hz(),
                band
            )
        }
        (_, None) => format!(
            "Set the parameters and press Enter to record {}s from {}",
            state.params.duration_secs(),
            state.source_name
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::buffer::AudioBuffer;
    use crate::dsp::spectrum::Scaling;
    use crate::params::Params;
    use std::sync::Arc;

    #[test]
    fn note_follows_phase() {
        let mut state = AppState::new(Params::default(), Scaling::Raw);
        state.source_name = "mic".into();
        assert!(status_note(&state).contains("record 10s from mic"));

        state.set_buffer(Arc::new(AudioBuffer::new(vec![0.0; 441_000], 44_100)));
        state.phase = Phase::Viewing;
        assert_eq!(
            status_note(&state),
            "441000 of 441000 samples (10.00s) @ 44100 Hz, band 0-100 Hz"
        );

        state.params.set_min_hz(500);
        assert!(status_note(&state).ends_with("(empty band)"));
    }
}
