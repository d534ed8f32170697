use ratatui::layout::Rect;
use ratatui::Frame;

use crate::app::{AppState, Focus};
use crate::ui::layout::AnalysisLayout;
use crate::ui::views::View;
use crate::ui::widgets::data_table::DataTableWidget;
use crate::ui::widgets::spectrum::SpectrumChart;
use crate::ui::widgets::waveform::WaveformChart;

/// Raw data table (when expanded), waveform and spectrum of the last
/// recording. Renders nothing until a recording exists.
pub struct AnalysisView;

impl AnalysisView {
    fn waveform<'a>(state: &'a AppState) -> Option<WaveformChart<'a>> {
        let buffer = state.buffer.as_ref()?;
        let focused = state.focus == Focus::Waveform;
        Some(WaveformChart {
            samples: buffer.samples(),
            sample_rate: buffer.sample_rate(),
            selection: state.selected_range(),
            pending: state.gesture.map(|g| (g.anchor, g.current)),
            cursor: focused.then_some(state.cursor),
            focused,
        })
    }

    /// Where the waveform samples land on screen for a frame of `area`.
    pub fn plot_area(&self, state: &AppState, area: Rect) -> Option<Rect> {
        let layout = AnalysisLayout::new(area, state.show_data);
        Self::waveform(state).map(|chart| chart.plot_area(layout.waveform))
    }
}

impl View for AnalysisView {
    fn render(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        let Some(buffer) = state.buffer.as_ref() else {
            return;
        };
        let layout = AnalysisLayout::new(area, state.show_data);

        if let Some(rect) = layout.data {
            frame.render_widget(
                DataTableWidget {
                    samples: buffer.samples(),
                    sample_rate: buffer.sample_rate(),
                    offset: state.data_offset,
                },
                rect,
            );
        }

        if let Some(chart) = Self::waveform(state) {
            frame.render_widget(chart, layout.waveform);
        }

        frame.render_widget(
            SpectrumChart {
                series: &state.spectrum,
                min_hz: state.params.min_hz() as f64,
                max_hz: state.params.max_hz() as f64,
                sample_rate: buffer.sample_rate(),
                scaling: state.scaling(),
                selected: !state.boxes.is_empty(),
            },
            layout.spectrum,
        );
    }
}
