mod app;
mod audio;
mod cli;
mod constants;
mod controller;
mod dsp;
mod input;
mod logging;
mod messages;
mod params;
mod selection;
mod settings;
mod ui;

use std::io::{self, Write};
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::{bounded, Receiver, Sender};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

use crate::app::AppState;
use crate::audio::device::CpalBackend;
use crate::audio::recorder::{spawn_worker, CaptureBackend, Recorder, RecorderHandle};
use crate::audio::synthetic::SyntheticBackend;
use crate::cli::{AnalysisArgs, Cli, Command};
use crate::constants::*;
use crate::dsp::spectrum::{Scaling, SpectrumAnalyzer};
use crate::messages::RecorderMsg;
use crate::params::Params;
use crate::selection::{selected_range, BoxSelection};
use crate::settings::Settings;
use crate::ui::views::analysis_view::AnalysisView;
use crate::ui::views::controls_view::ControlsView;
use crate::ui::views::View;
use crate::ui::widgets::keyboard_hint::KeyboardHintWidget;
use crate::ui::widgets::title_bar::TitleBarWidget;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (settings, outcome) = Settings::load(cli.config.as_deref());
    let (params, scaling) = cli.analysis.resolve(&settings);

    match cli.command {
        Some(Command::Record { start, end }) => {
            logging::init_stderr(&settings.log_level)?;
            outcome.log();
            run_headless(&cli.analysis, params, scaling, start, end)
        }
        None => {
            let log_path = cli.log_file.clone().or_else(|| settings.log_path());
            match log_path {
                Some(path) => logging::init_file(&path, &settings.log_level)?,
                None => eprintln!("Warning: no log directory available, logging disabled"),
            }
            outcome.log();
            run_interactive(&cli.analysis, params, scaling)
        }
    }
}

/// Microphone, or the generated sine when `--synthetic` is given. `paced`
/// makes the sine take as long as a real capture would.
fn capture_backend(args: &AnalysisArgs, paced: bool) -> Box<dyn CaptureBackend> {
    match args.synthetic {
        Some(hz) => Box::new(SyntheticBackend::new(hz, 0.5).realtime(paced)),
        None => Box::new(CpalBackend::new()),
    }
}

/// One recording, one spectrum, printed as `frequency<TAB>amplitude` lines.
fn run_headless(
    args: &AnalysisArgs,
    params: Params,
    scaling: Scaling,
    start: Option<f64>,
    end: Option<f64>,
) -> Result<()> {
    let mut recorder = Recorder::new(capture_backend(args, false));
    let cancel = AtomicBool::new(false);
    let total = params.expected_frames();
    let mut last_report = Instant::now();
    let mut progress = |captured: usize| {
        if last_report.elapsed() >= Duration::from_secs(1) {
            info!(captured, total, "recording");
            last_report = Instant::now();
        }
    };
    let buffer = recorder
        .record(&params, &cancel, &mut progress)
        .context("recording failed")?;

    let boxes = match (start, end) {
        (None, None) => Vec::new(),
        (s, e) => vec![BoxSelection::new(
            s.unwrap_or(0.0),
            e.unwrap_or(buffer.len() as f64),
        )],
    };
    info!(
        samples = buffer.len(),
        channels = buffer.channels(),
        seconds = buffer.duration_secs(),
        peak = buffer.peak(),
        "captured"
    );
    let range = selected_range(&boxes, buffer.len()).unwrap_or(0..buffer.len());
    if range.len() != buffer.len() {
        info!(start = range.start, end = range.end, "analysing selection");
    }
    let window = buffer.slice(range);

    let mut analyzer = SpectrumAnalyzer::new(scaling);
    let series = analyzer.compute(
        window.samples(),
        window.sample_rate(),
        params.min_hz() as f64,
        params.max_hz() as f64,
    );
    if series.is_empty() {
        warn!(
            min_hz = params.min_hz(),
            max_hz = params.max_hz(),
            "no frequency bins in band"
        );
    }

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    for (freq, amp) in &series.points {
        writeln!(out, "{freq}\t{amp}")?;
    }
    out.flush()?;
    Ok(())
}

fn run_interactive(args: &AnalysisArgs, params: Params, scaling: Scaling) -> Result<()> {
    let (msg_tx, msg_rx): (Sender<RecorderMsg>, Receiver<RecorderMsg>) =
        bounded(CHANNEL_CAPACITY);

    let recorder = Recorder::new(capture_backend(args, true));
    let source_name = recorder.backend_name().to_string();
    let (handle, worker) = spawn_worker(recorder, msg_tx).context("starting recorder thread")?;
    info!(source = %source_name, "recorder ready");

    let mut state = AppState::new(params, scaling);
    state.source_name = source_name;

    // --- Terminal setup ---
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableMouseCapture)?;

    let result = run_ui_loop(&mut state, &handle, &msg_rx);

    // --- Cleanup, on every path ---
    let _ = io::stdout().execute(DisableMouseCapture);
    let _ = io::stdout().execute(LeaveAlternateScreen);
    let _ = disable_raw_mode();

    if handle.is_busy() {
        info!("stopping in-flight recording");
    }
    handle.shutdown();
    if worker.join().is_err() {
        warn!("recorder thread panicked");
    }
    result
}

fn run_ui_loop(
    state: &mut AppState,
    recorder: &RecorderHandle,
    msg_rx: &Receiver<RecorderMsg>,
) -> Result<()> {
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let frame_duration = Duration::from_millis(1000 / UI_FPS);

    // --- Main loop ---
    loop {
        let frame_start = Instant::now();

        // --- Recorder messages (non-blocking) ---
        while let Ok(msg) = msg_rx.try_recv() {
            controller::handle_recorder_msg(state, msg);
        }

        // --- Keyboard and mouse ---
        if event::poll(Duration::from_millis(1))? {
            let evt = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(key, state.phase, state.focus)
                }
                Event::Mouse(mouse) => input::handle_mouse(mouse),
                _ => None,
            };
            if let Some(evt) = evt {
                controller::handle_ui_event(state, evt, recorder);
            }
        }

        if state.should_quit {
            break;
        }

        // --- Render ---
        let mut plot = None;
        terminal.draw(|frame| {
            let layout = ui::layout::ScreenLayout::new(frame.area());

            frame.render_widget(
                TitleBarWidget {
                    phase: state.phase,
                    source: &state.source_name,
                },
                layout.header,
            );
            ControlsView.render(state, frame, layout.controls);
            AnalysisView.render(state, frame, layout.main);
            plot = AnalysisView.plot_area(state, layout.main);

            let hints = input::key_hints(state.phase, state.focus);
            frame.render_widget(KeyboardHintWidget { hints }, layout.footer);
        })?;
        state.waveform_plot = plot;

        // --- Frame rate limiting ---
        let elapsed = frame_start.elapsed();
        if elapsed < frame_duration {
            std::thread::sleep(frame_duration - elapsed);
        }
    }

    terminal.show_cursor()?;
    Ok(())
}
