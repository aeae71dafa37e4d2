use crate::device;
use anyhow::Context;
use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{SampleFormat, Stream, StreamConfig};

/// Opens and starts a capture stream on the chosen input device.
///
/// Samples are discarded; the stream only proves the device can be opened.
/// Dropping the returned `Stream` releases the device.
pub fn probe_input(device_name: Option<String>) -> anyhow::Result<Stream> {
    let input = device::get_or_default_input(device_name)
        .context("Failed to get audio input device")?;
    tracing::debug!("Probing input device: {:?}", input.name());

    let supported = input
        .default_input_config()
        .context("Failed to get default input config")?;
    let sample_format = supported.sample_format();
    let config: StreamConfig = supported.config();
    tracing::debug!("Probe stream config: {:?} ({:?})", &config, sample_format);

    let on_error = |err: cpal::StreamError| tracing::error!("An error occurred on input stream: {}", err);
    let stream = match sample_format {
        SampleFormat::F32 => {
            input.build_input_stream(&config, |_: &[f32], _: &cpal::InputCallbackInfo| {}, on_error, None)
        }
        SampleFormat::I16 => {
            input.build_input_stream(&config, |_: &[i16], _: &cpal::InputCallbackInfo| {}, on_error, None)
        }
        SampleFormat::U16 => {
            input.build_input_stream(&config, |_: &[u16], _: &cpal::InputCallbackInfo| {}, on_error, None)
        }
        other => return Err(anyhow::anyhow!("Unsupported sample format {:?}", other)),
    }
    .context("Failed to build input stream")?;

    stream.play().context("Failed to start input stream")?;
    Ok(stream)
}
