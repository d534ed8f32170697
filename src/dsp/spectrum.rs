//! Band-limited magnitude spectrum of a mono sample window.
//!
//! The transform is a plain complex forward FFT over the whole window: no
//! window function, no zero padding. With [`Scaling::Raw`] magnitudes are the
//! untouched `|X[k]|`, so they grow with the window length.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};

/// How FFT magnitudes are scaled before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Scaling {
    /// `|X[k]|` as the FFT returns it
    #[default]
    Raw,
    /// `|X[k]| / N`, comparable across window lengths
    PerSample,
}

impl Scaling {
    pub fn label(self) -> &'static str {
        match self {
            Scaling::Raw => "raw",
            Scaling::PerSample => "per-sample",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Scaling::Raw => Scaling::PerSample,
            Scaling::PerSample => Scaling::Raw,
        }
    }
}

/// `(frequency_hz, amplitude)` pairs for the bins inside the requested band,
/// in FFT bin order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpectrumSeries {
    pub points: Vec<(f64, f64)>,
    /// Length of the window the FFT ran over
    pub window_len: usize,
}

impl SpectrumSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn peak(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Frequency spacing between adjacent bins.
    pub fn resolution_hz(&self, sample_rate: u32) -> f64 {
        if self.window_len == 0 {
            0.0
        } else {
            sample_rate as f64 / self.window_len as f64
        }
    }
}

/// Frequency of bin `k` for an `n`-point transform at `sample_rate`, laid out
/// like the usual `fftfreq`: bins `0..=(n-1)/2` are non-negative, the rest are
/// the negative frequencies in ascending order.
pub fn bin_frequency(k: usize, n: usize, sample_rate: u32) -> f64 {
    let positive_bins = n.div_ceil(2);
    let signed = if k < positive_bins {
        k as f64
    } else {
        k as f64 - n as f64
    };
    signed * sample_rate as f64 / n as f64
}

/// `|X[k]|` for every bin of one window's transform. Band and scaling are
/// applied afterwards, so changing either does not rerun the FFT.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Magnitudes {
    values: Vec<f32>,
    sample_rate: u32,
}

impl Magnitudes {
    pub fn window_len(&self) -> usize {
        self.values.len()
    }

    /// Bins with `min_hz <= f <= max_hz`, scaled. An inverted band gives an
    /// empty series.
    pub fn band(&self, min_hz: f64, max_hz: f64, scaling: Scaling) -> SpectrumSeries {
        let n = self.values.len();
        if n == 0 || max_hz < min_hz {
            return SpectrumSeries {
                points: Vec::new(),
                window_len: n,
            };
        }

        let scale = match scaling {
            Scaling::Raw => 1.0,
            Scaling::PerSample => 1.0 / n as f64,
        };
        let points = self
            .values
            .iter()
            .enumerate()
            .filter_map(|(k, &m)| {
                let f = bin_frequency(k, n, self.sample_rate);
                (f >= min_hz && f <= max_hz).then(|| (f, m as f64 * scale))
            })
            .collect();

        SpectrumSeries {
            points,
            window_len: n,
        }
    }
}

/// Spectrum analyser holding a reusable FFT planner.
pub struct SpectrumAnalyzer {
    planner: FftPlanner<f32>,
    scaling: Scaling,
}

impl SpectrumAnalyzer {
    pub fn new(scaling: Scaling) -> Self {
        Self {
            planner: FftPlanner::new(),
            scaling,
        }
    }

    pub fn scaling(&self) -> Scaling {
        self.scaling
    }

    pub fn set_scaling(&mut self, scaling: Scaling) {
        self.scaling = scaling;
    }

    /// Complex forward FFT of `samples`, reduced to bin magnitudes.
    pub fn transform(&mut self, samples: &[f32], sample_rate: u32) -> Magnitudes {
        if samples.is_empty() {
            return Magnitudes {
                values: Vec::new(),
                sample_rate,
            };
        }

        let fft = self.planner.plan_fft_forward(samples.len());
        let mut buffer: Vec<Complex<f32>> = samples
            .iter()
            .map(|&s| Complex { re: s, im: 0.0 })
            .collect();
        fft.process(&mut buffer);

        Magnitudes {
            values: buffer.iter().map(|c| c.norm()).collect(),
            sample_rate,
        }
    }

    /// FFT `samples` and keep the bins with `min_hz <= f <= max_hz`.
    /// An inverted band or an empty window gives an empty series.
    pub fn compute(
        &mut self,
        samples: &[f32],
        sample_rate: u32,
        min_hz: f64,
        max_hz: f64,
    ) -> SpectrumSeries {
        if samples.is_empty() || max_hz < min_hz {
            return SpectrumSeries {
                points: Vec::new(),
                window_len: samples.len(),
            };
        }
        self.transform(samples, sample_rate)
            .band(min_hz, max_hz, self.scaling)
    }
}

/// Reduce a spectrum to at most `columns` points for drawing, keeping the
/// loudest bin of each bucket.
pub fn decimate_peaks(points: &[(f64, f64)], columns: usize) -> Vec<(f64, f64)> {
    if columns == 0 {
        return Vec::new();
    }
    if points.len() <= columns {
        return points.to_vec();
    }
    let per_bucket = points.len().div_ceil(columns);
    points
        .chunks(per_bucket)
        .filter_map(|chunk| chunk.iter().copied().max_by(|a, b| a.1.total_cmp(&b.1)))
        .collect()
}
