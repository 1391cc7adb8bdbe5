use std::path::PathBuf;

use thiserror::Error;
use tidepool_core::PaintError;
use tidepool_markup::MarkupError;

use crate::host::HostError;

/// Failures of the program layer.
#[derive(Debug, Error)]
pub enum Error {
    /// Markup could not be parsed or built.
    #[error(transparent)]
    Markup(#[from] MarkupError),
    /// A markup file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// A path could not be registered with the file watcher.
    #[error("failed to watch {}: {source}", path.display())]
    Watch {
        /// The watched file.
        path: PathBuf,
        /// Underlying watcher error.
        source: notify::Error,
    },
    /// Painting a frame failed.
    #[error(transparent)]
    Paint(#[from] PaintError),
    /// The host could not present a frame.
    #[error(transparent)]
    Host(#[from] HostError),
}
