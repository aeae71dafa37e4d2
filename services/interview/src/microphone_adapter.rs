use mirror_core::error::PersonaError;
use mirror_core::persona_api::AudioInput;

pub const MICROPHONE_DENIED_MESSAGE: &str =
    "Microphone access denied. Please allow microphone access and try again.";

/// `AudioInput` backed by a real cpal capture stream.
pub struct CpalMicrophone {
    device_name: Option<String>,
}

impl CpalMicrophone {
    pub fn new(device_name: Option<String>) -> Self {
        Self { device_name }
    }
}

impl AudioInput for CpalMicrophone {
    type Handle = cpal::Stream;

    fn open(&self) -> Result<cpal::Stream, PersonaError> {
        mirror_native_utils::microphone::probe_input(self.device_name.clone()).map_err(|e| {
            tracing::warn!("Microphone probe failed: {:#}", e);
            PersonaError::PermissionDenied(MICROPHONE_DENIED_MESSAGE.to_string())
        })
    }
}
