use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use log::warn;

/// 440 Hz sine fed to the default output device while the sound timer is
/// nonzero. A machine without audio output still runs; the beep is just
/// dropped.
pub struct Beeper {
    stream: Option<cpal::Stream>,
}

impl Beeper {
    pub fn new() -> Self {
        let stream = Self::build_stream();
        if stream.is_none() {
            warn!("no usable audio output, sound timer will be silent");
        }
        Self { stream }
    }

    pub fn set_active(&self, on: bool) {
        if let Some(stream) = &self.stream {
            if on {
                let _ = stream.play();
            } else {
                let _ = stream.pause();
            }
        }
    }

    fn build_stream() -> Option<cpal::Stream> {
        let host = cpal::default_host();
        let device = host.default_output_device()?;
        let config = device.default_output_config().ok()?;
        let stream = match config.sample_format() {
            cpal::SampleFormat::I16 => Self::run::<i16>(&device, &config.into()),
            cpal::SampleFormat::U16 => Self::run::<u16>(&device, &config.into()),
            cpal::SampleFormat::F32 => Self::run::<f32>(&device, &config.into()),
            other => {
                warn!("unsupported sample format {other}");
                return None;
            }
        };
        stream.ok()
    }

    fn run<T>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
    ) -> Result<cpal::Stream, cpal::BuildStreamError>
    where
        T: SizedSample + FromSample<f32>,
    {
        let sample_rate = config.sample_rate.0 as f32;
        let channels = config.channels as usize;

        let mut sample_clock = 0f32;
        let mut next_value = move || {
            sample_clock = (sample_clock + 1.0) % sample_rate;
            (sample_clock * 440.0 * 2.0 * std::f32::consts::PI / sample_rate).sin()
        };

        let err_fn = |err| warn!("audio stream error: {err}");

        let stream = device.build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                for frame in data.chunks_mut(channels) {
                    let value: T = T::from_sample(next_value());
                    for sample in frame.iter_mut() {
                        *sample = value;
                    }
                }
            },
            err_fn,
            None,
        )?;
        // start silent; set_active unpauses while the timer runs
        let _ = stream.pause();
        Ok(stream)
    }
}

impl Default for Beeper {
    fn default() -> Self {
        Self::new()
    }
}
