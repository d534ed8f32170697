use std::ops::Range;

/// One finished mono recording. Immutable once built; views share it by `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Always one channel.
    pub fn channels(&self) -> u16 {
        1
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Copy of `samples[range]`, with the range clamped to the buffer.
    pub fn slice(&self, range: Range<usize>) -> AudioBuffer {
        let end = range.end.min(self.samples.len());
        let start = range.start.min(end);
        AudioBuffer::new(self.samples[start..end].to_vec(), self.sample_rate)
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
    }
}

/// Min/max envelope of `samples` reduced to at most `columns` buckets, as
/// chart points `(index, value)`. Each bucket contributes its minimum and its
/// maximum so transients stay visible. Short inputs pass through unchanged.
pub fn envelope(samples: &[f32], offset: usize, columns: usize) -> Vec<(f64, f64)> {
    let len = samples.len();
    if len == 0 || columns == 0 {
        return Vec::new();
    }
    if len <= columns * 2 {
        return samples
            .iter()
            .enumerate()
            .map(|(i, &s)| ((offset + i) as f64, s as f64))
            .collect();
    }

    let samples_per_col = len.div_ceil(columns);
    let mut points = Vec::with_capacity(columns * 2);
    for start in (0..len).step_by(samples_per_col) {
        let end = (start + samples_per_col).min(len);
        let chunk = &samples[start..end];
        let (mut lo, mut hi) = (f32::INFINITY, f32::NEG_INFINITY);
        let (mut lo_at, mut hi_at) = (start, start);
        for (j, &s) in chunk.iter().enumerate() {
            if s < lo {
                lo = s;
                lo_at = start + j;
            }
            if s > hi {
                hi = s;
                hi_at = start + j;
            }
        }
        // Keep time order inside the bucket so the line does not double back.
        let (first, second) = if lo_at <= hi_at {
            ((lo_at, lo), (hi_at, hi))
        } else {
            ((hi_at, hi), (lo_at, lo))
        };
        points.push(((offset + first.0) as f64, first.1 as f64));
        points.push(((offset + second.0) as f64, second.1 as f64));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> AudioBuffer {
        AudioBuffer::new((0..n).map(|i| i as f32).collect(), 44_100)
    }

    #[test]
    fn slice_copies_the_window() {
        let buffer = ramp(441_000);
        let window = buffer.slice(100..200);
        assert_eq!(window.len(), 100);
        assert_eq!(window.samples()[0], 100.0);
        assert_eq!(window.samples()[99], 199.0);
        assert_eq!(window.sample_rate(), 44_100);
        // original untouched
        assert_eq!(buffer.len(), 441_000);
    }

    #[test]
    fn slice_clamps_out_of_range() {
        let buffer = ramp(10);
        assert_eq!(buffer.slice(5..50).len(), 5);
        assert!(buffer.slice(20..30).is_empty());
        assert!(buffer.slice(7..3).is_empty());
    }

    #[test]
    fn duration_and_peak() {
        let buffer = AudioBuffer::new(vec![0.1, -0.7, 0.3], 3);
        assert_eq!(buffer.duration_secs(), 1.0);
        assert_eq!(buffer.peak(), 0.7);
        assert_eq!(buffer.channels(), 1);
    }

    #[test]
    fn envelope_passes_short_input_through() {
        let points = envelope(&[0.5, -0.5], 10, 4);
        assert_eq!(points, vec![(10.0, 0.5), (11.0, -0.5)]);
    }

    #[test]
    fn envelope_keeps_extremes() {
        let mut samples = vec![0.0f32; 1_000];
        samples[123] = 0.9;
        samples[777] = -0.8;
        let points = envelope(&samples, 0, 10);
        assert!(points.len() <= 20);
        assert!(points.contains(&(123.0, 0.9f32 as f64)));
        assert!(points.contains(&(777.0, -0.8f32 as f64)));
        assert!(points.windows(2).all(|w| w[0].0 <= w[1].0));
    }

    #[test]
    fn envelope_empty() {
        assert!(envelope(&[], 0, 10).is_empty());
        assert!(envelope(&[1.0], 0, 0).is_empty());
    }
}
