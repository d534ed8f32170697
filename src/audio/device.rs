use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, Sample, SampleFormat, SampleRate, SizedSample, StreamConfig};
use tracing::{debug, warn};

use crate::audio::recorder::{CaptureBackend, CaptureRequest, RecordError};
use crate::constants::PROGRESS_INTERVAL_MS;

/// Samples shared between the input callback and the capture loop
struct CaptureState {
    samples: Vec<f32>,
    target: usize,
    error: Option<String>,
}

/// Captures from the host's default input device.
pub struct CpalBackend {
    device_name: String,
}

impl CpalBackend {
    pub fn new() -> Self {
        Self {
            device_name: "default input".to_string(),
        }
    }

    fn open_device() -> Result<Device, RecordError> {
        cpal::default_host()
            .default_input_device()
            .ok_or(RecordError::NoInputDevice)
    }

    /// Pick a config running at exactly `sample_rate`. Mono is preferred, then
    /// f32 samples; other channel counts are reduced to their first channel.
    fn pick_config(
        device: &Device,
        sample_rate: u32,
    ) -> Result<(StreamConfig, SampleFormat), RecordError> {
        let ranges = device
            .supported_input_configs()
            .map_err(|e| RecordError::Query(e.to_string()))?;

        let best = ranges
            .filter(|r| r.min_sample_rate().0 <= sample_rate && sample_rate <= r.max_sample_rate().0)
            .filter(|r| {
                matches!(
                    r.sample_format(),
                    SampleFormat::F32 | SampleFormat::I16 | SampleFormat::U16
                )
            })
            .min_by_key(|r| {
                (
                    r.channels() != 1,
                    r.sample_format() != SampleFormat::F32,
                    r.channels(),
                )
            })
            .ok_or(RecordError::UnsupportedConfig { sample_rate })?;

        let format = best.sample_format();
        let supported = best.with_sample_rate(SampleRate(sample_rate));
        let mut config: StreamConfig = supported.into();
        config.buffer_size = cpal::BufferSize::Default;
        Ok((config, format))
    }

    fn build_stream<T>(
        device: &Device,
        config: &StreamConfig,
        state: Arc<Mutex<CaptureState>>,
        captured: Arc<AtomicUsize>,
        done: Arc<AtomicBool>,
    ) -> Result<cpal::Stream, RecordError>
    where
        T: SizedSample,
        f32: FromSample<T>,
    {
        let channels = config.channels.max(1) as usize;
        let err_state = Arc::clone(&state);
        let err_done = Arc::clone(&done);

        let stream = device.build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                // The capture loop only reads `captured` while the stream runs,
                // so this lock is uncontended unless the error callback fired.
                let Ok(mut st) = state.try_lock() else {
                    return;
                };
                let remaining = st.target.saturating_sub(st.samples.len());
                if remaining == 0 {
                    return;
                }
                let take = (data.len() / channels).min(remaining);
                for frame in data.chunks_exact(channels).take(take) {
                    st.samples.push(f32::from_sample(frame[0]));
                }
                captured.store(st.samples.len(), Ordering::Release);
                if st.samples.len() >= st.target {
                    done.store(true, Ordering::Release);
                }
            },
            move |err| {
                warn!(error = %err, "audio input error");
                if let Ok(mut st) = err_state.lock() {
                    st.error = Some(err.to_string());
                }
                err_done.store(true, Ordering::Release);
            },
            None,
        )?;
        Ok(stream)
    }
}

impl Default for CpalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureBackend for CpalBackend {
    fn capture(
        &mut self,
        request: &CaptureRequest,
        cancel: &AtomicBool,
        progress: &mut dyn FnMut(usize),
    ) -> Result<Vec<f32>, RecordError> {
        let device = Self::open_device()?;
        if let Ok(name) = device.name() {
            self.device_name = name;
        }
        let (config, format) = Self::pick_config(&device, request.sample_rate)?;
        debug!(
            device = %self.device_name,
            channels = config.channels,
            format = ?format,
            "opening input stream"
        );

        let state = Arc::new(Mutex::new(CaptureState {
            samples: Vec::with_capacity(request.frames),
            target: request.frames,
            error: None,
        }));
        let captured = Arc::new(AtomicUsize::new(0));
        let done = Arc::new(AtomicBool::new(false));

        let (st, cap, dn) = (Arc::clone(&state), Arc::clone(&captured), Arc::clone(&done));
        let stream = match format {
            SampleFormat::I16 => Self::build_stream::<i16>(&device, &config, st, cap, dn)?,
            SampleFormat::U16 => Self::build_stream::<u16>(&device, &config, st, cap, dn)?,
            _ => Self::build_stream::<f32>(&device, &config, st, cap, dn)?,
        };
        stream.play()?;

        let poll = Duration::from_millis(PROGRESS_INTERVAL_MS);
        while !done.load(Ordering::Acquire) {
            if cancel.load(Ordering::Acquire) {
                return Err(RecordError::Cancelled);
            }
            std::thread::sleep(poll);
            progress(captured.load(Ordering::Acquire));
        }
        drop(stream);

        let mut st = state
            .lock()
            .map_err(|_| RecordError::Stream("capture state poisoned".into()))?;
        if let Some(err) = st.error.take() {
            return Err(RecordError::Stream(err));
        }
        progress(st.samples.len());
        Ok(std::mem::take(&mut st.samples))
    }

    fn name(&self) -> &str {
        &self.device_name
    }
}
