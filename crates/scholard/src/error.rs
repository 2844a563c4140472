//! Error types for the scholar CLI.

use thiserror::Error;

use super::*;

/// Error type alias used for the `scholard` crate.
pub type Result<T> = core::result::Result<T, ScholardError>;

/// Errors that can occur while running a CLI command.
#[derive(Error, Debug)]
pub enum ScholardError {
  /// A library, layout or export operation failed.
  #[error(transparent)]
  Scholar(#[from] ScholarError),

  /// Reading a confirmation from the terminal failed.
  #[error(transparent)]
  Dialog(#[from] dialoguer::Error),

  /// The selected papers could not be turned into a journal.
  #[error("Nothing to export: {0}")]
  NothingToExport(String),
}
