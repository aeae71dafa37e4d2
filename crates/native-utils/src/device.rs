use anyhow::Context;
use cpal::Device;
use cpal::traits::{DeviceTrait, HostTrait};

fn get_host() -> cpal::Host {
    cpal::default_host()
}

/// What the CLI shows about an input device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDeviceInfo {
    pub name: String,
    pub channels: u16,
    pub sample_rate: u32,
    pub is_default: bool,
}

// Finds the input device called `device_name`, or the host's default input device.
pub fn get_or_default_input(device_name: Option<String>) -> anyhow::Result<Device> {
    let host = get_host();
    tracing::debug!("Host: {:?}", host.id());

    let target = match device_name {
        Some(name) => name,
        None => host
            .default_input_device()
            .context("No default input device")?
            .name()
            .context("Default input device has no name")?,
    };

    let input_devices = host
        .input_devices()
        .context("Failed to enumerate input devices")?;
    for in_device in input_devices {
        if in_device.name().is_ok_and(|name| name == target) {
            return Ok(in_device);
        }
    }
    Err(anyhow::anyhow!("No input device named '{}'", target))
}

pub fn get_available_inputs() -> anyhow::Result<Vec<InputDeviceInfo>> {
    for host in cpal::available_hosts() {
        tracing::debug!("Available host: {:?}", host);
    }

    let host = get_host();
    // A host without a default input is not an error; nothing gets the marker.
    let default_device = host.default_input_device().and_then(|d| d.name().ok());

    let mut devices = Vec::new();
    let input_devices = host
        .input_devices()
        .context("Failed to enumerate input devices")?;
    for in_device in input_devices {
        let Ok(name) = in_device.name() else {
            tracing::debug!("Skipping input device without a name");
            continue;
        };
        let d_cfg = match in_device.default_input_config() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", name, e);
                continue;
            }
        };
        devices.push(InputDeviceInfo {
            is_default: default_device.as_deref() == Some(name.as_str()),
            channels: d_cfg.channels(),
            sample_rate: d_cfg.sample_rate().0,
            name,
        });
    }
    Ok(devices)
}

/// One line per device, the default one marked.
pub fn format_inputs(devices: &[InputDeviceInfo]) -> String {
    devices
        .iter()
        .map(|d| {
            let mut line = format!(" * {}({}ch, {}hz)", d.name, d.channels, d.sample_rate);
            if d.is_default {
                line.push_str(" [default]");
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
