use clap::Parser;
use std::path::PathBuf;
use supersaw_keys::audio::CpalBackend;
use supersaw_keys::input::layout::piano_color_map;
use supersaw_keys::input::KeyMap;
use supersaw_keys::instrument::{Instrument, InstrumentConfig};

mod app;

/// Play a super-saw synth on an on-screen keyboard
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Key color map image (key index in the red channel). A piano layout is
    /// generated when omitted.
    #[arg(long)]
    color_map: Option<PathBuf>,

    /// Number of keys on the instrument
    #[arg(long, default_value_t = 25)]
    keys: usize,

    /// Frequency of the lowest key in Hz
    #[arg(long)]
    bottom_freq: Option<f64>,

    /// Spread of each super-saw cluster as a fraction of its frequency
    #[arg(long)]
    detune: Option<f32>,

    /// Oscillators per super-saw cluster
    #[arg(long)]
    oscillators: Option<usize>,

    /// Master volume (0.0 to 1.0)
    #[arg(long)]
    volume: Option<f32>,
}

impl Cli {
    fn config(&self) -> InstrumentConfig {
        let mut config = InstrumentConfig {
            key_count: self.keys,
            ..Default::default()
        };
        if let Some(bottom_freq) = self.bottom_freq {
            config.synth.bottom_freq_hz = bottom_freq;
        }
        if let Some(detune) = self.detune {
            config.synth.detune = detune;
        }
        if let Some(oscillators) = self.oscillators {
            config.synth.oscillators_per_cluster = oscillators;
        }
        if let Some(volume) = self.volume {
            config.synth.master_volume = volume;
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.config();

    let key_map = match &cli.color_map {
        Some(path) => KeyMap::open(
            path,
            config.bitmap_width,
            config.bitmap_height,
            config.key_count,
        )?,
        None => KeyMap::new(
            piano_color_map(config.key_count, config.bitmap_width, config.bitmap_height),
            config.key_count,
        )?,
    };
    log::info!(
        "key map {}x{} with {} keys",
        key_map.width(),
        key_map.height(),
        config.key_count
    );

    // The audio device is only opened when the first key is played
    let backend = CpalBackend::new(config.synth.clone());
    let instrument = Instrument::new(config, key_map, backend);

    app::run(instrument)
}
