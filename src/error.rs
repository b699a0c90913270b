//! Startup error types
//!
//! The simulation itself cannot fail; everything here happens before the
//! first tick and is fatal.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort startup
#[derive(Error, Debug)]
pub enum AppError {
    /// Settings file could not be read
    #[error("Settings I/O error ({path}): {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid JSON for `Settings`
    #[error("Settings parse error: {0}")]
    SettingsParse(#[from] serde_json::Error),

    /// Settings parsed but hold out-of-range values
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// winit could not create the event loop
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// winit could not open the window
    #[error("Window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    /// wgpu could not wrap the window in a surface
    #[error("Surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    /// No GPU adapter compatible with the surface
    #[error("No suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    /// Adapter refused to hand out a device
    #[error("GPU device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// Surface reports no usable texture formats
    #[error("Surface is not supported by the adapter")]
    UnsupportedSurface,

    /// Configured impact sample could not be opened
    #[error("Audio sample I/O error ({path}): {source}")]
    AudioSampleIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configured impact sample could not be decoded
    #[error("Audio sample decode error ({path}): {source}")]
    AudioSampleDecode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    /// Configured impact sample decoded to nothing
    #[error("Audio sample is empty: {0}")]
    EmptyAudioSample(PathBuf),

    /// The audio thread could not be started
    #[error("Audio thread spawn failed: {0}")]
    AudioThread(std::io::Error),
}

/// Result type alias for startup operations
pub type AppResult<T> = Result<T, AppError>;
