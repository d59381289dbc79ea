//! Error taxonomy for the device path.
//!
//! These never cross the engine boundary: the runtime logs them and degrades
//! to silence (best-effort ambience). They exist so the device plumbing can
//! use `?` internally instead of collapsing everything into strings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no default output device available")]
    NoDevice,

    #[error("requested output device not found: {0}")]
    DeviceNotFound(String),

    #[error("unsupported device sample format: {0}")]
    UnsupportedFormat(String),

    #[cfg(feature = "realtime")]
    #[error(transparent)]
    Devices(#[from] cpal::DevicesError),

    #[cfg(feature = "realtime")]
    #[error(transparent)]
    DeviceName(#[from] cpal::DeviceNameError),

    #[cfg(feature = "realtime")]
    #[error(transparent)]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[cfg(feature = "realtime")]
    #[error(transparent)]
    Build(#[from] cpal::BuildStreamError),

    #[cfg(feature = "realtime")]
    #[error(transparent)]
    Play(#[from] cpal::PlayStreamError),
}
