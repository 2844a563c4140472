//! Subcommands of the scholar CLI.

use super::*;

pub mod add;
pub mod export;
pub mod journal;
pub mod list;
pub mod remove;
pub mod search;

pub use add::{add, AddArgs};
pub use export::{export, ExportArgs};
pub use journal::{journal, JournalArgs};
pub use list::list;
pub use remove::{remove, RemoveArgs};
pub use search::{search, SearchArgs};

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Import paper records from a JSON file holding one record or an array of them
  Add(AddArgs),

  /// List every saved paper
  List,

  /// Search saved papers by title, authors or tags
  Search(SearchArgs),

  /// Remove a paper from the library after confirmation
  Remove(RemoveArgs),

  /// Export one paper's analysis as a PDF
  Export(ExportArgs),

  /// Export several papers as a journal with a table of contents
  Journal(JournalArgs),
}

/// Looks up a saved paper, failing when the id is unknown.
fn find<'a>(library: &'a Library, id: &str) -> Result<&'a Paper> {
  Ok(library.get(id).ok_or_else(|| ScholarError::PaperNotFound(id.to_string()))?)
}
