use crate::audio::AudioBackend;
use crate::synth::config::SynthConfig;
use crate::synth::engine::SynthEngine;
use crate::synth::note::VoiceCommand;
use anyhow::anyhow;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream};
use std::sync::mpsc::Sender;

/// Plays the synth engine on the default cpal output device.
///
/// Nothing touches the audio host until [`AudioBackend::start`], which moves a
/// freshly built engine into the stream callback and keeps only its command sender.
pub struct CpalBackend {
    config: SynthConfig,
    stream: Option<Stream>,
    command_sender: Option<Sender<VoiceCommand>>,
}

impl CpalBackend {
    pub fn new(config: SynthConfig) -> Self {
        Self {
            config,
            stream: None,
            command_sender: None,
        }
    }

    fn build_stream(&self, mut synth_engine: SynthEngine) -> anyhow::Result<Stream> {
        let host = cpal::default_host();
        log::info!("cpal host: {}", host.id().name());
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("no output device available"))?;
        log::info!(
            "selected device: {}",
            device.name().unwrap_or_else(|_| "(no name)".to_string())
        );
        let config = device.default_output_config()?;
        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;
        log::info!("sample rate: {}, channels: {}", sample_rate, channels);

        let stream = match config.sample_format() {
            SampleFormat::F32 => {
                let mut buffer = Vec::new();
                device.build_output_stream(
                    &config.into(),
                    move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                        buffer.resize(data.len() / channels, 0.0);
                        synth_engine.process(&mut buffer, sample_rate as f32);

                        for (frame, &value) in data.chunks_mut(channels).zip(buffer.iter()) {
                            for sample in frame.iter_mut() {
                                *sample = value;
                            }
                        }
                    },
                    |err| log::error!("an error occurred on stream: {}", err),
                    None,
                )?
            }
            other => return Err(anyhow!("unsupported sample format: {:?}", other)),
        };

        Ok(stream)
    }
}

impl AudioBackend for CpalBackend {
    fn start(&mut self) -> anyhow::Result<()> {
        let synth_engine = SynthEngine::new(self.config.clone());
        let command_sender = synth_engine.get_command_sender();
        let stream = self.build_stream(synth_engine)?;
        stream.play()?;
        self.stream = Some(stream);
        self.command_sender = Some(command_sender);
        Ok(())
    }

    fn send(&mut self, command: VoiceCommand) -> anyhow::Result<()> {
        let sender = self
            .command_sender
            .as_ref()
            .ok_or_else(|| anyhow!("audio stream has not been started"))?;
        sender
            .send(command)
            .map_err(|_| anyhow!("audio thread stopped listening for commands"))
    }
}
