use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{bounded, Sender};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::audio::buffer::AudioBuffer;
use crate::constants::CHANNEL_CAPACITY;
use crate::messages::{RecorderCmd, RecorderMsg};
use crate::params::Params;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("no audio input device available")]
    NoInputDevice,
    #[error("input device does not support {sample_rate} Hz")]
    UnsupportedConfig { sample_rate: u32 },
    #[error("could not query input device: {0}")]
    Query(String),
    #[error("could not open input stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),
    #[error("could not start input stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
    #[error("input stream failed: {0}")]
    Stream(String),
    #[error("capture ended early: expected {expected} samples, got {got}")]
    ShortCapture { expected: usize, got: usize },
    #[error("recording cancelled")]
    Cancelled,
    #[error("recorder worker is not running")]
    WorkerGone,
}

/// What one capture must produce: `frames` mono samples at `sample_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureRequest {
    pub sample_rate: u32,
    pub frames: usize,
}

impl From<&Params> for CaptureRequest {
    fn from(params: &Params) -> Self {
        Self {
            sample_rate: params.sample_rate(),
            frames: params.expected_frames(),
        }
    }
}

/// Source of mono samples for one blocking capture. Implementations should
/// call `progress` with the running frame count and return
/// [`RecordError::Cancelled`] soon after `cancel` goes high.
pub trait CaptureBackend: Send {
    fn capture(
        &mut self,
        request: &CaptureRequest,
        cancel: &AtomicBool,
        progress: &mut dyn FnMut(usize),
    ) -> Result<Vec<f32>, RecordError>;

    fn name(&self) -> &str;
}

/// Blocking recorder over a capture backend.
pub struct Recorder {
    backend: Box<dyn CaptureBackend>,
}

impl Recorder {
    pub fn new(backend: Box<dyn CaptureBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Capture exactly `params.expected_frames()` samples. Extra frames from
    /// the backend are dropped; a short capture is an error.
    pub fn record(
        &mut self,
        params: &Params,
        cancel: &AtomicBool,
        progress: &mut dyn FnMut(usize),
    ) -> Result<AudioBuffer, RecordError> {
        let request = CaptureRequest::from(params);
        info!(
            backend = self.backend.name(),
            sample_rate = request.sample_rate,
            frames = request.frames,
            "recording started"
        );

        let mut samples = self.backend.capture(&request, cancel, progress)?;
        if samples.len() < request.frames {
            return Err(RecordError::ShortCapture {
                expected: request.frames,
                got: samples.len(),
            });
        }
        samples.truncate(request.frames);

        info!(frames = samples.len(), "recording finished");
        Ok(AudioBuffer::new(samples, request.sample_rate))
    }
}

/// UI-side handle to the background recorder.
pub struct RecorderHandle {
    cmd_tx: Sender<RecorderCmd>,
    cancel: Arc<AtomicBool>,
    busy: Arc<AtomicBool>,
}

impl RecorderHandle {
    /// Ask the worker to start a recording. Returns `Ok(false)` while one is
    /// already running.
    pub fn start(&self, params: Params) -> Result<bool, RecordError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(false);
        }
        self.cancel.store(false, Ordering::Release);
        if self.cmd_tx.try_send(RecorderCmd::Start(params)).is_err() {
            self.busy.store(false, Ordering::Release);
            return Err(RecordError::WorkerGone);
        }
        Ok(true)
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn shutdown(&self) {
        self.cancel();
        let _ = self.cmd_tx.try_send(RecorderCmd::Shutdown);
    }
}

/// Spawn the recorder worker thread. It serves one `Start` at a time and
/// reports back on `msg_tx`.
pub fn spawn_worker(
    mut recorder: Recorder,
    msg_tx: Sender<RecorderMsg>,
) -> std::io::Result<(RecorderHandle, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = bounded(CHANNEL_CAPACITY);
    let cancel = Arc::new(AtomicBool::new(false));
    let busy = Arc::new(AtomicBool::new(false));
    let handle = RecorderHandle {
        cmd_tx,
        cancel: Arc::clone(&cancel),
        busy: Arc::clone(&busy),
    };

    let join = std::thread::Builder::new()
        .name("recorder".into())
        .spawn(move || {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    RecorderCmd::Start(params) => {
                        let total = params.expected_frames();
                        let mut progress = |captured: usize| {
                            let _ = msg_tx.try_send(RecorderMsg::Progress { captured, total });
                        };
                        let msg = match recorder.record(&params, &cancel, &mut progress) {
                            Ok(buffer) => RecorderMsg::Finished(Arc::new(buffer)),
                            Err(RecordError::Cancelled) => {
                                warn!("recording cancelled");
                                RecorderMsg::Cancelled
                            }
                            Err(e) => {
                                error!(error = %e, "recording failed");
                                RecorderMsg::Failed(e.to_string())
                            }
                        };
                        busy.store(false, Ordering::Release);
                        if msg_tx.send(msg).is_err() {
                            break;
                        }
                    }
                    RecorderCmd::Shutdown => break,
                }
            }
        })?;

    Ok((handle, join))
}
