use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::Line;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget};

use crate::dsp::spectrum::{decimate_peaks, Scaling, SpectrumSeries};
use crate::ui::theme;

/// Amplitude spectrum over `[min_hz, max_hz]`.
pub struct SpectrumChart<'a> {
    pub series: &'a SpectrumSeries,
    pub min_hz: f64,
    pub max_hz: f64,
    pub sample_rate: u32,
    pub scaling: Scaling,
    pub selected: bool,
}

impl Widget for SpectrumChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" Spectrum {:.0}-{:.0} Hz [{}] ", self.min_hz, self.max_hz, self.scaling.label());
        let footer = match self.series.peak() {
            Some((freq, amp)) => format!(
                " peak {:.2} Hz @ {:.3}  df {:.3} Hz ",
                freq,
                amp,
                self.series.resolution_hz(self.sample_rate)
            ),
            None => format!(" window {} samples ", self.series.window_len),
        };
        let subject = if self.selected { "selection" } else { "full recording" };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::DIM))
            .title(Line::styled(
                title,
                Style::default().fg(theme::SPECTRUM).add_modifier(Modifier::BOLD),
            ))
            .title(Line::styled(format!(" {subject} "), Style::default().fg(theme::DIM)).right_aligned())
            .title_bottom(Line::styled(footer, Style::default().fg(theme::DIM)));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 2 || inner.height < 2 {
            return;
        }

        if self.series.is_empty() {
            let note = if self.min_hz > self.max_hz {
                "empty band: min frequency is above max frequency"
            } else if self.series.window_len == 0 {
                "empty window: the selection holds no samples"
            } else {
                "no frequency bins in band"
            };
            let y = inner.y + inner.height / 2;
            Paragraph::new(note)
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme::WARN_YELLOW))
                .render(Rect::new(inner.x, y, inner.width, 1), buf);
            return;
        }

        let points = decimate_peaks(&self.series.points, inner.width as usize * 2);
        let top = self
            .series
            .peak()
            .map_or(0.0, |(_, amp)| amp)
            .max(1e-9)
            * 1.05;
        let (lo, hi) = if self.max_hz > self.min_hz {
            (self.min_hz, self.max_hz)
        } else {
            (self.min_hz - 0.5, self.max_hz + 0.5)
        };

        let dataset = Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::SPECTRUM))
            .data(&points);

        Chart::new(vec![dataset])
            .x_axis(Axis::default().bounds([lo, hi]))
            .y_axis(Axis::default().bounds([0.0, top]))
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn inverted_band_shows_note() {
        let series = SpectrumSeries::default();
        let area = Rect::new(0, 0, 70, 8);
        let mut buf = Buffer::empty(area);
        SpectrumChart {
            series: &series,
            min_hz: 500.0,
            max_hz: 100.0,
            sample_rate: 44_100,
            scaling: Scaling::Raw,
            selected: false,
        }
        .render(area, &mut buf);
        assert!(text(&buf).contains("empty band"));
    }

    #[test]
    fn footer_shows_peak() {
        let series = SpectrumSeries {
            points: vec![(0.0, 1.0), (10.0, 8.0), (20.0, 2.0)],
            window_len: 4_410,
        };
        let area = Rect::new(0, 0, 70, 8);
        let mut buf = Buffer::empty(area);
        SpectrumChart {
            series: &series,
            min_hz: 0.0,
            max_hz: 20.0,
            sample_rate: 44_100,
            scaling: Scaling::Raw,
            selected: true,
        }
        .render(area, &mut buf);
        let all = text(&buf);
        assert!(all.contains("peak 10.00 Hz"), "{all}");
        assert!(all.contains("selection"));
    }

    #[test]
    fn empty_window_has_its_own_note() {
        let series = SpectrumSeries::default();
        let area = Rect::new(0, 0, 70, 8);
        let mut buf = Buffer::empty(area);
        SpectrumChart {
            series: &series,
            min_hz: 0.0,
            max_hz: 100.0,
            sample_rate: 44_100,
            scaling: Scaling::Raw,
            selected: true,
        }
        .render(area, &mut buf);
        let all = text(&buf);
        assert!(all.contains("empty window"), "{all}");
        assert!(!all.contains("no frequency bins"));
    }
}
