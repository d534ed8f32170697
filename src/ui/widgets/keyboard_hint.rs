use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::ui::theme;

/// Footer line of `key:action` pairs. Pairs that do not fit are dropped from
/// the right, and a dimmed `…` marks the cut.
pub struct KeyboardHintWidget {
    pub hints: Vec<(&'static str, &'static str)>,
}

impl Widget for KeyboardHintWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 2 {
            return;
        }

        let right = area.x + area.width;
        let y = area.y;
        let mut x = area.x + 1;

        for (i, (key, desc)) in self.hints.iter().enumerate() {
            let key_w = key.chars().count() as u16;
            let desc_w = desc.chars().count() as u16;
            // key + ':' + desc, plus room for the ellipsis if more follow
            let needed = key_w + 1 + desc_w + u16::from(i + 1 < self.hints.len()) * 2;
            if x + needed > right {
                if x < right {
                    buf.set_string(x, y, "…", Style::default().fg(theme::DIM));
                }
                break;
            }
            buf.set_string(x, y, key, Style::default().fg(theme::ACCENT));
            x += key_w;
            buf.set_string(x, y, ":", Style::default().fg(theme::DIM));
            x += 1;
            buf.set_string(x, y, desc, Style::default().fg(theme::FG));
            x += desc_w + 2;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        KeyboardHintWidget {
            hints: vec![("↑/↓", "Adjust"), ("Enter", "Start"), ("Q", "Quit")],
        }
        .render(area, &mut buf);
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn all_hints_fit() {
        let line = render(60);
        assert!(line.contains("↑/↓:Adjust"));
        assert!(line.contains("Q:Quit"));
    }

    #[test]
    fn overflow_is_marked() {
        let line = render(16);
        assert!(line.contains("↑/↓:Adjust"));
        assert!(line.contains('…'));
        assert!(!line.contains("Quit"));
    }
}
