use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use crate::app::Phase;
use crate::constants::PAGE_TITLE;
use crate::ui::theme;

/// Page title with the current phase badge and capture source on the right
pub struct TitleBarWidget<'a> {
    pub phase: Phase,
    pub source: &'a str,
}

impl Widget for TitleBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 10 {
            return;
        }

        buf.set_style(area, Style::default().bg(theme::HEADER_BG));
        buf.set_string(
            area.x + 1,
            area.y,
            PAGE_TITLE,
            Style::default()
                .fg(theme::FG)
                .bg(theme::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        );

        let badge_color = match self.phase {
            Phase::Idle => theme::DIM,
            Phase::Recording => theme::RECORD_RED,
            Phase::Viewing => theme::VIEWING_GREEN,
        };
        let badge = format!(" {} ", self.phase.label());
        let source = format!(" {} ", self.source);
        let right_len = (badge.chars().count() + source.chars().count() + 1) as u16;
        if area.width <= right_len + PAGE_TITLE.len() as u16 + 2 {
            return;
        }

        let mut x = area.x + area.width - right_len;
        buf.set_string(
            x,
            area.y,
            &source,
            Style::default().fg(theme::DIM).bg(theme::HEADER_BG),
        );
        x += source.chars().count() as u16;
        buf.set_string(x, area.y, &badge, Style::default().fg(theme::BG).bg(badge_color));
    }
}
