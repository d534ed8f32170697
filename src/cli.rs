use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::dsp::spectrum::Scaling;
use crate::params::Params;
use crate::settings::Settings;

#[derive(Debug, Parser)]
#[command(
    name = "freqscope",
    about = "Record from the microphone, select a window of the waveform, inspect its spectrum",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Settings file (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log file for the interactive UI
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Args, Default)]
pub struct AnalysisArgs {
    /// Sampling rate in Hz (44100 or 96000)
    #[arg(long, global = true)]
    pub rate: Option<u32>,

    /// Recording duration in seconds (10-360; arrow keys step by 10)
    #[arg(long, global = true)]
    pub duration: Option<u32>,

    /// Lower edge of the displayed band in Hz (0-2000; arrow keys step by 100)
    #[arg(long, global = true)]
    pub min_hz: Option<u32>,

    /// Upper edge of the displayed band in Hz (0-2000; arrow keys step by 100)
    #[arg(long, global = true)]
    pub max_hz: Option<u32>,

    /// Magnitude scaling
    #[arg(long, value_enum, global = true)]
    pub scaling: Option<Scaling>,

    /// Use a generated sine at this frequency instead of the microphone
    #[arg(long, value_name = "HZ", global = true)]
    pub synthetic: Option<f64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record once without the UI and print `frequency<TAB>amplitude` lines
    Record {
        /// First sample of the analysis window
        #[arg(long)]
        start: Option<f64>,
        /// End of the analysis window (exclusive)
        #[arg(long)]
        end: Option<f64>,
    },
}

impl AnalysisArgs {
    /// CLI flags override the settings file; both go through the same clamps.
    pub fn resolve(&self, settings: &Settings) -> (Params, Scaling) {
        let mut params = settings.params();
        if let Some(rate) = self.rate {
            params.set_sample_rate(rate);
        }
        if let Some(secs) = self.duration {
            params.set_duration(secs);
        }
        if let Some(hz) = self.min_hz {
            params.set_min_hz(hz);
        }
        if let Some(hz) = self.max_hz {
            params.set_max_hz(hz);
        }
        (params, self.scaling.unwrap_or(settings.scaling))
    }
}
