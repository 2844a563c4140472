//! Research paper journal typesetting library.
//!
//! `scholar` turns saved research papers (metadata, summaries, AI-written analyses and
//! citations) into formatted PDF documents:
//!
//! - Single-paper exports with the full analysis of one paper
//! - Multi-paper journals with a title page and a clickable table of contents
//! - A flat JSON library for keeping papers between sessions
//!
//! # Getting Started
//!
//! ```no_run
//! use scholar::{export, library::Library, prelude::*};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   // Open (or create) the library of saved papers
//!   let library = Library::open(Library::default_path()).await?;
//!
//!   // Lay out every saved paper into a journal
//!   let mut report = |current: usize, total: usize| println!("{current}/{total}");
//!   let path = export::export_journal(
//!     library.papers(),
//!     "out",
//!     LayoutConfig::default(),
//!     &JournalOptions::default(),
//!     Some(&mut report),
//!   )
//!   .await?;
//!   println!("Journal written to {}", path.display());
//!
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`paper`]: The paper record and its placeholders
//! - [`library`]: The flat serialized list of saved papers
//! - [`config`]: Page geometry and spacing for the layout engine
//! - [`layout`]: Drawing surface, markdown flow renderer and paginator
//! - [`pdf`]: Serialization of laid out pages with `lopdf`
//! - [`export`]: Export operations that write finished files
//! - [`format`]: Small text helpers shared by the layout and export code

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod layout;
pub mod library;
pub mod paper;
pub mod pdf;

use crate::{config::LayoutConfig, error::*, paper::Paper};

/// Common traits and types for ergonomic imports.
///
/// # Usage
///
/// ```no_run
/// use scholar::{library::Library, prelude::*};
///
/// async fn example() -> Result<(), ScholarError> {
///   let library = Library::open(Library::default_path()).await?;
///   println!("{} papers saved", library.papers().len());
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{
    config::LayoutConfig, error::ScholarError, layout::JournalOptions, paper::Paper,
  };
}
