//! The presentation boundary.

use thiserror::Error;
use tidepool_core::Surface;

/// Provides the surface for every frame and presents the finished result.
///
/// A window system, an offscreen renderer or a test harness can all act as a
/// host; [`Program::run`](crate::Program::run) only sees this trait.
pub trait Host {
    /// The drawing surface frames are painted into.
    type Surface: Surface;

    /// Prepares the next frame and lends its surface, or returns `None` to
    /// stop the render loop.
    fn next_frame(&mut self) -> Option<&mut Self::Surface>;

    /// Presents the frame painted since the last [`Host::next_frame`].
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] when the frame cannot be shown; this ends the
    /// render loop.
    fn present(&mut self) -> Result<(), HostError>;
}

/// A host failed to present a frame.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HostError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl HostError {
    /// Creates an error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error caused by `source`.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
