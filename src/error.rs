use std::{io, path::PathBuf};
use thiserror::Error;
use wgpu_glyph::ab_glyph::InvalidFont;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config {}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to parse font for typeface {typeface}: {source}")]
    FontParse {
        typeface: String,
        #[source]
        source: InvalidFont,
    },

    #[error("font collection is empty")]
    NoFonts,

    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error(transparent)]
    Window(#[from] winit::error::OsError),

    #[error(transparent)]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter found")]
    NoAdapter,

    #[error(transparent)]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error(transparent)]
    Surface(#[from] wgpu::SurfaceError),

    #[error("failed to draw queued text: {0}")]
    DrawText(String),
}
