/// Selectable sampling rates, in radio order
pub const SAMPLE_RATES: [u32; 2] = [44_100, 96_000];
pub const DEFAULT_SAMPLE_RATE: u32 = SAMPLE_RATES[0];

/// Recording duration bounds in seconds
pub const MIN_DURATION_SECS: u32 = 10;
pub const MAX_DURATION_SECS: u32 = 360;
pub const DURATION_STEP_SECS: u32 = 10;
pub const DEFAULT_DURATION_SECS: u32 = 10;

/// Frequency band bounds in Hz
pub const MIN_FREQ_HZ: u32 = 0;
pub const MAX_FREQ_HZ: u32 = 2_000;
pub const FREQ_STEP_HZ: u32 = 100;
pub const DEFAULT_MIN_HZ: u32 = 0;
pub const DEFAULT_MAX_HZ: u32 = 100;

/// UI refresh rate target
pub const UI_FPS: u64 = 30;
/// Channel capacity for inter-thread messages
pub const CHANNEL_CAPACITY: usize = 64;
/// How often the recorder worker reports progress
pub const PROGRESS_INTERVAL_MS: u64 = 50;

/// Waveform cursor step as a fraction of the buffer
pub const CURSOR_STEP: f64 = 0.01;
pub const CURSOR_STEP_FAST: f64 = 0.10;
/// Rows scrolled per PageUp/PageDown in the data viewer
pub const DATA_PAGE_ROWS: usize = 20;

pub const APP_NAME: &str = "freqscope";
pub const PAGE_TITLE: &str = "Real-time Audio Frequency Visualization";
