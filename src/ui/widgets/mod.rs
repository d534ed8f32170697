pub mod data_table;
pub mod keyboard_hint;
pub mod param_panel;
pub mod spectrum;
pub mod start_bar;
pub mod status_line;
pub mod title_bar;
pub mod waveform;
