use crate::constants::*;

/// Parameter panel fields, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamField {
    SampleRate,
    Duration,
    MinHz,
    MaxHz,
}

impl ParamField {
    pub const ALL: [ParamField; 4] = [
        ParamField::SampleRate,
        ParamField::Duration,
        ParamField::MinHz,
        ParamField::MaxHz,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ParamField::SampleRate => "Sampling Rate",
            ParamField::Duration => "Record Duration (sec)",
            ParamField::MinHz => "Min Frequency (hz)",
            ParamField::MaxHz => "Max Frequency (hz)",
        }
    }
}

/// The four recording/analysis settings. Every setter clamps, so a `Params`
/// can never hold an out-of-range value. `min_hz` and `max_hz` are bounded
/// independently and may cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    sample_rate: u32,
    duration_secs: u32,
    min_hz: u32,
    max_hz: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            duration_secs: DEFAULT_DURATION_SECS,
            min_hz: DEFAULT_MIN_HZ,
            max_hz: DEFAULT_MAX_HZ,
        }
    }
}

impl Params {
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn min_hz(&self) -> u32 {
        self.min_hz
    }

    pub fn max_hz(&self) -> u32 {
        self.max_hz
    }

    /// Picks the closest supported rate.
    pub fn set_sample_rate(&mut self, rate: u32) {
        self.sample_rate = SAMPLE_RATES
            .iter()
            .copied()
            .min_by_key(|r| r.abs_diff(rate))
            .unwrap_or(DEFAULT_SAMPLE_RATE);
    }

    /// Numeric setters only clamp; values between steps are kept. The step
    /// size applies to [`Params::step`].
    pub fn set_duration(&mut self, secs: u32) {
        self.duration_secs = secs.clamp(MIN_DURATION_SECS, MAX_DURATION_SECS);
    }

    pub fn set_min_hz(&mut self, hz: u32) {
        self.min_hz = hz.clamp(MIN_FREQ_HZ, MAX_FREQ_HZ);
    }

    pub fn set_max_hz(&mut self, hz: u32) {
        self.max_hz = hz.clamp(MIN_FREQ_HZ, MAX_FREQ_HZ);
    }

    /// Move `field` one step up (`up == true`) or down. The radio field
    /// cycles through its options.
    pub fn step(&mut self, field: ParamField, up: bool) {
        match field {
            ParamField::SampleRate => {
                let idx = SAMPLE_RATES
                    .iter()
                    .position(|&r| r == self.sample_rate)
                    .unwrap_or(0);
                let count = SAMPLE_RATES.len();
                let next = if up { (idx + 1) % count } else { (idx + count - 1) % count };
                self.sample_rate = SAMPLE_RATES[next];
            }
            ParamField::Duration => {
                let v = step_value(self.duration_secs, DURATION_STEP_SECS, up);
                self.set_duration(v);
            }
            ParamField::MinHz => {
                let v = step_value(self.min_hz, FREQ_STEP_HZ, up);
                self.set_min_hz(v);
            }
            ParamField::MaxHz => {
                let v = step_value(self.max_hz, FREQ_STEP_HZ, up);
                self.set_max_hz(v);
            }
        }
    }

    pub fn value(&self, field: ParamField) -> u32 {
        match field {
            ParamField::SampleRate => self.sample_rate,
            ParamField::Duration => self.duration_secs,
            ParamField::MinHz => self.min_hz,
            ParamField::MaxHz => self.max_hz,
        }
    }

    /// Number of mono frames one recording produces.
    pub fn expected_frames(&self) -> usize {
        self.sample_rate as usize * self.duration_secs as usize
    }

    /// True when the band is inverted and the spectrum will be empty.
    pub fn band_inverted(&self) -> bool {
        self.max_hz < self.min_hz
    }
}

fn step_value(value: u32, step: u32, up: bool) -> u32 {
    if up {
        value.saturating_add(step)
    } else {
        value.saturating_sub(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_panel() {
        let p = Params::default();
        assert_eq!(p.sample_rate(), 44_100);
        assert_eq!(p.duration_secs(), 10);
        assert_eq!(p.min_hz(), 0);
        assert_eq!(p.max_hz(), 100);
    }

    #[test]
    fn duration_clamps_to_bounds() {
        let mut p = Params::default();
        p.set_duration(0);
        assert_eq!(p.duration_secs(), MIN_DURATION_SECS);
        p.set_duration(10_000);
        assert_eq!(p.duration_secs(), MAX_DURATION_SECS);
        p.set_duration(360);
        assert_eq!(p.duration_secs(), 360);
    }

    #[test]
    fn values_between_steps_are_kept() {
        let mut p = Params::default();
        p.set_duration(25);
        assert_eq!(p.duration_secs(), 25);
        p.set_max_hz(149);
        assert_eq!(p.max_hz(), 149);
        p.set_max_hz(2_049);
        assert_eq!(p.max_hz(), 2_000);

        // stepping moves by a whole step from wherever the value sits
        p.step(ParamField::Duration, true);
        assert_eq!(p.duration_secs(), 35);
        p.set_min_hz(50);
        p.step(ParamField::MinHz, false);
        assert_eq!(p.min_hz(), 0);
        p.step(ParamField::MinHz, true);
        assert_eq!(p.min_hz(), 100);
    }

    #[test]
    fn sample_rate_picks_nearest_option() {
        let mut p = Params::default();
        p.set_sample_rate(48_000);
        assert_eq!(p.sample_rate(), 44_100);
        p.set_sample_rate(90_000);
        assert_eq!(p.sample_rate(), 96_000);
    }

    #[test]
    fn step_cycles_radio_and_clamps_numbers() {
        let mut p = Params::default();
        p.step(ParamField::SampleRate, true);
        assert_eq!(p.sample_rate(), 96_000);
        p.step(ParamField::SampleRate, true);
        assert_eq!(p.sample_rate(), 44_100);

        p.step(ParamField::Duration, false);
        assert_eq!(p.duration_secs(), 10);
        p.step(ParamField::MinHz, false);
        assert_eq!(p.min_hz(), 0);
        p.step(ParamField::MaxHz, true);
        assert_eq!(p.max_hz(), 200);
    }

    #[test]
    fn band_fields_are_not_cross_validated() {
        let mut p = Params::default();
        p.set_min_hz(1_500);
        p.set_max_hz(200);
        assert_eq!(p.min_hz(), 1_500);
        assert_eq!(p.max_hz(), 200);
        assert!(p.band_inverted());
    }

    #[test]
    fn expected_frames_is_rate_times_duration() {
        let mut p = Params::default();
        assert_eq!(p.expected_frames(), 441_000);
        p.set_sample_rate(96_000);
        p.set_duration(360);
        assert_eq!(p.expected_frames(), 34_560_000);
    }
}
