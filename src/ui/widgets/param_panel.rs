use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Widget};

use crate::constants::SAMPLE_RATES;
use crate::params::{ParamField, Params};
use crate::ui::theme;

/// One column of the parameter row: a bordered box with the field label as
/// title. The sampling rate renders as a radio group, the rest as
/// `◂ value ▸` steppers.
pub struct ParamWidget {
    pub field: ParamField,
    pub params: Params,
    pub focused: bool,
    pub locked: bool,
}

impl Widget for ParamWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 8 || area.height < 3 {
            return;
        }

        let border = if self.focused && !self.locked {
            theme::ACCENT
        } else {
            theme::DIM
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(self.field.label());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let value_style = if self.locked {
            Style::default().fg(theme::DIM)
        } else if self.focused {
            Style::default().fg(theme::FG).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::FG)
        };

        let text = match self.field {
            ParamField::SampleRate => SAMPLE_RATES
                .iter()
                .map(|&rate| {
                    let mark = if rate == self.params.sample_rate() { "●" } else { "○" };
                    format!("{mark} {rate}")
                })
                .collect::<Vec<_>>()
                .join("  "),
            field => format!("◂ {} ▸", self.params.value(field)),
        };

        let width = text.chars().count() as u16;
        let x = inner.x + inner.width.saturating_sub(width) / 2;
        buf.set_stringn(x, inner.y, &text, inner.width as usize, value_style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn radio_marks_selected_rate() {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        ParamWidget {
            field: ParamField::SampleRate,
            params: Params::default(),
            focused: true,
            locked: false,
        }
        .render(area, &mut buf);
        let line = row_text(&buf, 1);
        assert!(line.contains("● 44100"), "{line}");
        assert!(line.contains("○ 96000"), "{line}");
    }

    #[test]
    fn stepper_shows_value() {
        let area = Rect::new(0, 0, 26, 3);
        let mut buf = Buffer::empty(area);
        ParamWidget {
            field: ParamField::MaxHz,
            params: Params::default(),
            focused: false,
            locked: false,
        }
        .render(area, &mut buf);
        assert!(row_text(&buf, 1).contains("◂ 100 ▸"));
        assert!(row_text(&buf, 0).contains("Max Frequency"));
    }
}
