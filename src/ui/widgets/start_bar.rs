use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Widget};

use crate::app::{time_display, Phase};
use crate::ui::theme;

/// Full-width Start button; turns into a progress gauge while recording.
pub struct StartBarWidget {
    pub phase: Phase,
    pub ratio: f64,
    pub sample_rate: u32,
    pub captured: usize,
    pub total: usize,
}

impl Widget for StartBarWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        match self.phase {
            Phase::Recording => {
                let rate = self.sample_rate.max(1) as f64;
                let label = format!(
                    "Recording audio... {} / {}",
                    time_display(self.captured as f64 / rate),
                    time_display(self.total as f64 / rate)
                );
                Gauge::default()
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(theme::RECORD_RED)),
                    )
                    .gauge_style(Style::default().fg(theme::RECORD_RED).bg(theme::BG))
                    .ratio(self.ratio.clamp(0.0, 1.0))
                    .label(label)
                    .render(area, buf);
            }
            Phase::Idle | Phase::Viewing => {
                let label = if self.phase == Phase::Idle { "Start" } else { "Start again" };
                Paragraph::new(label)
                    .alignment(Alignment::Center)
                    .style(
                        Style::default()
                            .fg(theme::ACCENT)
                            .add_modifier(Modifier::BOLD),
                    )
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(theme::ACCENT)),
                    )
                    .render(area, buf);
            }
        }
    }
}
