use std::f64::consts::TAU;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::audio::recorder::{CaptureBackend, CaptureRequest, RecordError};

/// Frames generated between progress/cancel checks
const CHUNK_FRAMES: usize = 4_096;

/// Deterministic sine generator standing in for a microphone. With
/// `realtime` set it paces itself to the wall clock like a real device.
pub struct SyntheticBackend {
    frequency: f64,
    amplitude: f32,
    realtime: bool,
}

impl SyntheticBackend {
    pub fn new(frequency: f64, amplitude: f32) -> Self {
        Self {
            frequency,
            amplitude,
            realtime: false,
        }
    }

    pub fn realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }
}

impl CaptureBackend for SyntheticBackend {
    fn capture(
        &mut self,
        request: &CaptureRequest,
        cancel: &AtomicBool,
        progress: &mut dyn FnMut(usize),
    ) -> Result<Vec<f32>, RecordError> {
        let rate = request.sample_rate.max(1) as f64;
        let phase_step = TAU * self.frequency / rate;
        let started = Instant::now();
        let mut samples = Vec::with_capacity(request.frames);

        while samples.len() < request.frames {
            if cancel.load(Ordering::Acquire) {
                return Err(RecordError::Cancelled);
            }

            let end = (samples.len() + CHUNK_FRAMES).min(request.frames);
            for i in samples.len()..end {
                samples.push(((phase_step * i as f64).sin() as f32) * self.amplitude);
            }
            progress(samples.len());

            if self.realtime {
                let due = Duration::from_secs_f64(samples.len() as f64 / rate);
                if let Some(wait) = due.checked_sub(started.elapsed()) {
                    std::thread::sleep(wait);
                }
            }
        }

        Ok(samples)
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_frames() {
        let mut backend = SyntheticBackend::new(1.0, 1.0);
        let request = CaptureRequest {
            sample_rate: 4,
            frames: 9,
        };
        let cancel = AtomicBool::new(false);
        let mut last = 0;
        let samples = backend
            .capture(&request, &cancel, &mut |n| last = n)
            .expect("capture");
        assert_eq!(samples.len(), 9);
        assert_eq!(last, 9);
        // quarter-period steps of a 1 Hz sine at 4 Hz
        assert!(samples[0].abs() < 1e-6);
        assert!((samples[1] - 1.0).abs() < 1e-6);
        assert!((samples[3] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn stops_on_cancel() {
        let mut backend = SyntheticBackend::new(440.0, 0.5);
        let request = CaptureRequest {
            sample_rate: 44_100,
            frames: 441_000,
        };
        let cancel = AtomicBool::new(false);
        let err = backend
            .capture(&request, &cancel, &mut |n| {
                if n >= CHUNK_FRAMES * 2 {
                    cancel.store(true, Ordering::Release);
                }
            })
            .unwrap_err();
        assert!(matches!(err, RecordError::Cancelled));
    }
}
