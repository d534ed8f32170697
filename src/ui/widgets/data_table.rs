use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Row, Table, Widget};

use crate::ui::theme;

/// Scrollable `index | time | sample` listing of the raw recording.
pub struct DataTableWidget<'a> {
    pub samples: &'a [f32],
    pub sample_rate: u32,
    pub offset: usize,
}

impl Widget for DataTableWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let len = self.samples.len();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::DIM))
            .title(format!(" Data {}/{} ", self.offset.min(len), len));

        // header takes one row of the inner area
        let visible = block.inner(area).height.saturating_sub(1) as usize;
        let start = self.offset.min(len);
        let end = (start + visible).min(len);
        let rate = self.sample_rate.max(1) as f64;

        let rows = (start..end).map(|i| {
            Row::new(vec![
                i.to_string(),
                format!("{:.5}", i as f64 / rate),
                format!("{:+.6}", self.samples[i]),
            ])
            .style(Style::default().fg(theme::FG))
        });

        Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Length(12),
                Constraint::Min(10),
            ],
        )
        .header(
            Row::new(vec!["index", "time (s)", "sample"])
                .style(Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)),
        )
        .block(block)
        .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn rows_start_at_offset() {
        let samples: Vec<f32> = (0..100).map(|i| i as f32 / 100.0).collect();
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        DataTableWidget {
            samples: &samples,
            sample_rate: 100,
            offset: 42,
        }
        .render(area, &mut buf);
        assert!(line(&buf, 1).contains("index"));
        assert!(line(&buf, 2).trim_start_matches('│').trim_start().starts_with("42"));
        assert!(line(&buf, 2).contains("+0.420000"));
    }
}
