//! Error types for the scholar library.
//!
//! This module provides a single error type covering every failure mode of the
//! library:
//! - Reading and writing the paper library
//! - Loading layout configuration
//! - Addressing pages during layout
//! - Serializing the finished PDF
//!
//! Missing paper fields are never errors; the layout substitutes placeholders for them.
//!
//! # Examples
//!
//! ```
//! use scholar::{error::ScholarError, library::Library};
//!
//! # async fn example() -> Result<(), ScholarError> {
//! match Library::open("papers.json").await {
//!   Err(ScholarError::Json(e)) => println!("Library file is corrupted: {}", e),
//!   Err(e) => println!("Other error: {}", e),
//!   Ok(library) => println!("{} papers", library.papers().len()),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Error type alias used for the [`scholar`](crate) crate.
pub type Result<T> = core::result::Result<T, ScholarError>;

/// Errors that can occur when working with the scholar library.
#[derive(Error, Debug)]
pub enum ScholarError {
  /// A file system operation failed.
  ///
  /// This occurs when:
  /// - Reading or writing the library file fails
  /// - Writing an exported PDF fails
  /// - Creating the output directory fails
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// The library file or an imported record is not valid paper JSON.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// A layout configuration file could not be parsed.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// PDF assembly or serialization failed inside `lopdf`.
  #[error(transparent)]
  Lopdf(#[from] lopdf::Error),

  /// The layout tried to move to a page that has not been created.
  ///
  /// The first value is the requested zero-based index, the second the number of
  /// pages in the document at the time of the request.
  #[error("Page {0} is out of range for a document with {1} pages")]
  PageOutOfRange(usize, usize),

  /// Indicates an attempt to add a paper whose identifier is already saved.
  ///
  /// The error includes the paper's title to help users identify which paper
  /// caused the conflict.
  #[error("Tried to add a paper titled \"{0}\" that was already in the library.")]
  DuplicatePaper(String),

  /// No saved paper carries the requested identifier.
  #[error("No paper with id \"{0}\" in the library")]
  PaperNotFound(String),
}
