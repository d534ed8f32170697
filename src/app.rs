use std::ops::Range;
use std::sync::Arc;

use ratatui::layout::Rect;
use tracing::debug;

use crate::audio::buffer::AudioBuffer;
use crate::dsp::spectrum::{Magnitudes, Scaling, SpectrumAnalyzer, SpectrumSeries};
use crate::params::{ParamField, Params};
use crate::selection::{selected_range, BoxSelection, Gesture};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing recorded yet; views hidden
    Idle,
    /// Worker is capturing; parameters locked
    Recording,
    /// A recording exists and both views are shown
    Viewing,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "IDLE",
            Phase::Recording => "REC",
            Phase::Viewing => "VIEW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Param(ParamField),
    Waveform,
}

impl Focus {
    /// Focus order: the four parameters, then the waveform when one is shown.
    pub fn next(self, waveform_available: bool) -> Self {
        match self {
            Focus::Param(ParamField::SampleRate) => Focus::Param(ParamField::Duration),
            Focus::Param(ParamField::Duration) => Focus::Param(ParamField::MinHz),
            Focus::Param(ParamField::MinHz) => Focus::Param(ParamField::MaxHz),
            Focus::Param(ParamField::MaxHz) if waveform_available => Focus::Waveform,
            Focus::Param(ParamField::MaxHz) | Focus::Waveform => {
                Focus::Param(ParamField::SampleRate)
            }
        }
    }

    pub fn prev(self, waveform_available: bool) -> Self {
        match self {
            Focus::Param(ParamField::SampleRate) if waveform_available => Focus::Waveform,
            Focus::Param(ParamField::SampleRate) => Focus::Param(ParamField::MaxHz),
            Focus::Param(ParamField::Duration) => Focus::Param(ParamField::SampleRate),
            Focus::Param(ParamField::MinHz) => Focus::Param(ParamField::Duration),
            Focus::Param(ParamField::MaxHz) => Focus::Param(ParamField::MinHz),
            Focus::Waveform => Focus::Param(ParamField::MaxHz),
        }
    }
}

/// Transform of one window of one recording.
struct CachedTransform {
    buffer: Arc<AudioBuffer>,
    range: Range<usize>,
    magnitudes: Magnitudes,
}

pub struct AppState {
    pub phase: Phase,
    pub params: Params,
    pub focus: Focus,
    /// Last finished recording
    pub buffer: Option<Arc<AudioBuffer>>,
    /// Committed box gestures; empty means no selection
    pub boxes: Vec<BoxSelection>,
    /// Box being drawn, not yet committed
    pub gesture: Option<Gesture>,
    /// Keyboard cursor over the waveform, in samples
    pub cursor: f64,
    /// Spectrum of the current analysis window
    pub spectrum: SpectrumSeries,
    analyzer: SpectrumAnalyzer,
    transform: Option<CachedTransform>,
    /// FFTs run so far; band and scaling changes reuse the last one
    transforms_run: usize,
    /// (captured, total) while recording
    pub progress: (usize, usize),
    /// Last recording error, shown in the banner
    pub error: Option<String>,
    /// Raw data viewer expanded
    pub show_data: bool,
    pub data_offset: usize,
    /// Plot area of the waveform chart from the last frame, for pointer mapping
    pub waveform_plot: Option<Rect>,
    /// Name of the capture source, for the title bar
    pub source_name: String,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(params: Params, scaling: Scaling) -> Self {
        Self {
            phase: Phase::Idle,
            params,
            focus: Focus::Param(ParamField::SampleRate),
            buffer: None,
            boxes: Vec::new(),
            gesture: None,
            cursor: 0.0,
            spectrum: SpectrumSeries::default(),
            analyzer: SpectrumAnalyzer::new(scaling),
            transform: None,
            transforms_run: 0,
            progress: (0, 0),
            error: None,
            show_data: false,
            data_offset: 0,
            waveform_plot: None,
            source_name: String::new(),
            should_quit: false,
        }
    }

    pub fn scaling(&self) -> Scaling {
        self.analyzer.scaling()
    }

    pub fn set_scaling(&mut self, scaling: Scaling) {
        self.analyzer.set_scaling(scaling);
        self.refresh_spectrum();
    }

    pub fn buffer_len(&self) -> usize {
        self.buffer.as_ref().map_or(0, |b| b.len())
    }

    /// Sample range the spectrum runs over, or `None` for the whole buffer.
    pub fn selected_range(&self) -> Option<Range<usize>> {
        selected_range(&self.boxes, self.buffer_len())
    }

    /// Samples the spectrum is computed from.
    pub fn analysis_window(&self) -> &[f32] {
        let Some(buffer) = self.buffer.as_ref() else {
            return &[];
        };
        match self.selected_range() {
            Some(range) => &buffer.samples()[range],
            None => buffer.samples(),
        }
    }

    /// Replace the recording, dropping any selection made on the old one.
    pub fn set_buffer(&mut self, buffer: Arc<AudioBuffer>) {
        self.buffer = Some(buffer);
        self.transform = None;
        self.boxes.clear();
        self.gesture = None;
        self.cursor = 0.0;
        self.data_offset = 0;
        self.refresh_spectrum();
    }

    /// Recompute the spectrum from buffer, selection and band. The FFT only
    /// runs when the window changed.
    pub fn refresh_spectrum(&mut self) {
        let Some(buffer) = self.buffer.clone() else {
            self.spectrum = SpectrumSeries::default();
            self.transform = None;
            return;
        };
        let range = self.selected_range().unwrap_or(0..buffer.len());
        let (min_hz, max_hz) = (self.params.min_hz() as f64, self.params.max_hz() as f64);
        if max_hz < min_hz {
            self.spectrum = SpectrumSeries {
                points: Vec::new(),
                window_len: range.len(),
            };
            return;
        }

        let stale = self
            .transform
            .as_ref()
            .map_or(true, |c| !Arc::ptr_eq(&c.buffer, &buffer) || c.range != range);
        if stale {
            let magnitudes = self
                .analyzer
                .transform(&buffer.samples()[range.clone()], buffer.sample_rate());
            self.transforms_run += 1;
            debug!(window = range.len(), count = self.transforms_run, "window transformed");
            self.transform = Some(CachedTransform {
                buffer,
                range,
                magnitudes,
            });
        }
        if let Some(cached) = &self.transform {
            self.spectrum = cached.magnitudes.band(min_hz, max_hz, self.analyzer.scaling());
        }
        debug!(
            window = self.spectrum.window_len,
            bins = self.spectrum.len(),
            min_hz = self.params.min_hz(),
            max_hz = self.params.max_hz(),
            "spectrum refreshed"
        );
    }

    pub fn progress_ratio(&self) -> f64 {
        let (captured, total) = self.progress;
        if total == 0 {
            0.0
        } else {
            (captured as f64 / total as f64).clamp(0.0, 1.0)
        }
    }

    pub fn has_recording(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn params_locked(&self) -> bool {
        self.phase == Phase::Recording
    }
}

/// `secs` as `MM:SS.ss`
pub fn time_display(secs: f64) -> String {
    let mins = (secs / 60.0) as u32;
    let s = secs % 60.0;
    format!("{:02}:{:05.2}", mins, s)
}
