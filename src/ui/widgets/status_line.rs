use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::ui::theme;

/// One line under the start bar: the last error in red, or a neutral note.
pub struct StatusLineWidget<'a> {
    pub error: Option<&'a str>,
    pub note: String,
}

impl Widget for StatusLineWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 4 {
            return;
        }
        let width = area.width.saturating_sub(2) as usize;
        match self.error {
            Some(err) => {
                let text = format!("✖ {err}");
                buf.set_stringn(area.x + 1, area.y, &text, width, Style::default().fg(theme::RECORD_RED));
            }
            None => {
                buf.set_stringn(area.x + 1, area.y, &self.note, width, Style::default().fg(theme::DIM));
            }
        }
    }
}
