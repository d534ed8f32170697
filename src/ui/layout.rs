use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout regions
pub struct ScreenLayout {
    pub header: Rect,
    pub controls: Rect,
    pub main: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(7), // Parameter row + start bar + status
                Constraint::Min(6),    // Views
                Constraint::Length(1), // Key hints
            ])
            .split(area);

        Self {
            header: chunks[0],
            controls: chunks[1],
            main: chunks[2],
            footer: chunks[3],
        }
    }
}

/// Controls: four parameter columns, the start bar, one status line
pub struct ControlsLayout {
    pub params: [Rect; 4],
    pub start: Rect,
    pub status: Rect,
}

impl ControlsLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Parameter widgets
                Constraint::Length(3), // Start / progress
                Constraint::Length(1), // Status / error
            ])
            .split(area);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(rows[0]);

        Self {
            params: [cols[0], cols[1], cols[2], cols[3]],
            start: rows[1],
            status: rows[2],
        }
    }
}

/// Analysis area: optional raw-data strip on top, waveform and spectrum side
/// by side below
pub struct AnalysisLayout {
    pub data: Option<Rect>,
    pub waveform: Rect,
    pub spectrum: Rect,
}

impl AnalysisLayout {
    pub fn new(area: Rect, show_data: bool) -> Self {
        let (data, charts) = if show_data {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
                .split(area);
            (Some(rows[0]), rows[1])
        } else {
            (None, area)
        };

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(charts);

        Self {
            data,
            waveform: cols[0],
            spectrum: cols[1],
        }
    }
}
