use std::ops::Range;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::Line;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget};

use crate::audio::buffer::envelope;
use crate::ui::theme;

/// Time-domain plot of the recording with the committed selection drawn in a
/// second colour. The x axis runs over sample indices `[0, len]`.
pub struct WaveformChart<'a> {
    pub samples: &'a [f32],
    pub sample_rate: u32,
    pub selection: Option<Range<usize>>,
    /// Box being drawn: anchor and current edge
    pub pending: Option<(f64, f64)>,
    pub cursor: Option<f64>,
    pub focused: bool,
}

impl WaveformChart<'_> {
    fn block(&self) -> Block<'static> {
        let border = if self.focused { theme::ACCENT } else { theme::DIM };
        let rate = self.sample_rate.max(1) as f64;
        let footer = match &self.selection {
            Some(range) => format!(
                " sel {}..{} ({:.2}s) ",
                range.start,
                range.end,
                range.len() as f64 / rate
            ),
            None => format!(
                " {} samples, {:.2}s ",
                self.samples.len(),
                self.samples.len() as f64 / rate
            ),
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Line::styled(
                " Waveform ",
                Style::default().fg(theme::WAVE_BLUE).add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::styled(footer, Style::default().fg(theme::DIM)))
    }

    /// Screen rectangle the samples are plotted into when rendered at `area`.
    pub fn plot_area(&self, area: Rect) -> Rect {
        self.block().inner(area)
    }
}

fn vertical(x: f64, half: f64) -> [(f64, f64); 2] {
    [(x, -half), (x, half)]
}

impl Widget for WaveformChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 2 || inner.height < 2 {
            return;
        }

        let len = self.samples.len();
        let columns = inner.width as usize * 2;
        let peak = self
            .samples
            .iter()
            .fold(0.0f32, |acc, s| acc.max(s.abs()))
            .max(1e-3) as f64
            * 1.05;

        let wave = envelope(self.samples, 0, columns);

        let highlight = match &self.selection {
            Some(range) if !range.is_empty() && len > 0 => {
                let share = (columns * range.len()).div_ceil(len).max(1);
                envelope(&self.samples[range.clone()], range.start, share)
            }
            _ => Vec::new(),
        };
        let edges: Vec<[(f64, f64); 2]> = match (&self.selection, self.pending) {
            (_, Some((a, b))) => vec![vertical(a, peak), vertical(b, peak)],
            (Some(range), None) => vec![
                vertical(range.start as f64, peak),
                vertical(range.end as f64, peak),
            ],
            (None, None) => Vec::new(),
        };
        let cursor = self.cursor.map(|c| vertical(c, peak));

        let mut datasets = vec![Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::WAVE_BLUE))
            .data(&wave)];
        if !highlight.is_empty() {
            datasets.push(
                Dataset::default()
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(theme::SELECTION))
                    .data(&highlight),
            );
        }
        for edge in &edges {
            datasets.push(
                Dataset::default()
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(theme::SELECTION))
                    .data(edge),
            );
        }
        if let Some(line) = &cursor {
            datasets.push(
                Dataset::default()
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(theme::CURSOR))
                    .data(line),
            );
        }

        // No axis labels, so the chart's graph area is the whole inner rect
        // and pointer columns map straight onto it.
        Chart::new(datasets)
            .x_axis(Axis::default().bounds([0.0, len.max(1) as f64]))
            .y_axis(Axis::default().bounds([-peak, peak]))
            .render(inner, buf);
    }
}
