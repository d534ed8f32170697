use ratatui::style::Color;

pub const BG: Color = Color::Rgb(20, 20, 25);
pub const FG: Color = Color::Rgb(200, 200, 210);
pub const DIM: Color = Color::Rgb(80, 80, 90);
pub const ACCENT: Color = Color::Rgb(0, 200, 150); // Teal/green
pub const RECORD_RED: Color = Color::Rgb(220, 50, 50);
pub const VIEWING_GREEN: Color = Color::Rgb(50, 220, 100);
pub const WARN_YELLOW: Color = Color::Rgb(220, 200, 50);
pub const WAVE_BLUE: Color = Color::Rgb(100, 200, 255);
pub const SELECTION: Color = Color::Rgb(255, 150, 100); // Coral
pub const SPECTRUM: Color = Color::Rgb(150, 255, 100); // Lime
pub const CURSOR: Color = Color::White;
pub const HEADER_BG: Color = Color::Rgb(35, 35, 45);
