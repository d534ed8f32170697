pub mod analysis_view;
pub mod controls_view;

use ratatui::Frame;
use ratatui::layout::Rect;
use crate::app::AppState;

pub trait View {
    fn render(&self, state: &AppState, frame: &mut Frame, area: Rect);
}
