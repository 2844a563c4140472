//! Terminal output and confirmations.
//!
//! Commands never print directly; they hand a [`ResponseContent`] to a [`UserInteraction`]
//! so output stays consistent and prompts can be skipped with `--accept-defaults`.

use console::style;
use dialoguer::Confirm;

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for progress messages
pub static WORKING_PREFIX: &str = "» ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Prefix for warning messages
pub static WARNING_PREFIX: &str = "! ";
/// Prefix for user prompts
pub static PROMPT_PREFIX: &str = "❯ ";
/// Branch of a list item
pub static ITEM_PREFIX: &str = "├─";
/// Branch of the last list item
pub static LAST_ITEM_PREFIX: &str = "└─";
/// Continuation line for tree structure
pub static CONTINUE_PREFIX: &str = "│  ";

/// Something a command wants to show the user.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// Full details of one paper
  Paper(&'a Paper),
  /// One line per paper
  Papers(&'a [&'a Paper]),
  /// Progress of a long operation
  Working(&'a str),
  /// A completed operation
  Success(&'a str),
  /// Neutral information
  Info(&'a str),
  /// Something was skipped
  Warning(&'a str),
}

/// How commands talk to the user.
pub trait UserInteraction {
  /// Asks a yes/no question.
  fn confirm(&self, message: &str) -> Result<bool>;
  /// Shows a response.
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

/// Interaction on the controlling terminal.
pub struct Terminal {
  /// Answer every confirmation with yes instead of prompting
  accept_defaults: bool,
}

impl Terminal {
  /// Creates a terminal interaction.
  pub fn new(accept_defaults: bool) -> Self { Self { accept_defaults } }
}

impl UserInteraction for Terminal {
  fn confirm(&self, message: &str) -> Result<bool> {
    if self.accept_defaults {
      return Ok(true);
    }
    Ok(
      Confirm::new()
        .with_prompt(format!("{}{message}", style(PROMPT_PREFIX).cyan()))
        .default(false)
        .wait_for_newline(true)
        .interact()?,
    )
  }

  fn reply(&self, content: ResponseContent) -> Result<()> {
    match content {
      ResponseContent::Paper(paper) => print_paper(paper),
      ResponseContent::Papers(papers) => {
        println!("{} Found {} papers:", style(INFO_PREFIX).cyan(), style(papers.len()).yellow());
        for (index, paper) in papers.iter().enumerate() {
          let prefix = if index + 1 == papers.len() { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
          let verified = if paper.is_verified() { " (verified)" } else { "" };
          println!(
            "{} {} {}{}",
            style(prefix).dim(),
            style(&paper.id).yellow(),
            style(paper.display_title()).white().bold(),
            style(verified).green()
          );
        }
      },
      ResponseContent::Working(message) => println!("{} {message}", style(WORKING_PREFIX).blue()),
      ResponseContent::Success(message) => println!("{} {message}", style(SUCCESS_PREFIX).green()),
      ResponseContent::Info(message) => println!("{} {message}", style(INFO_PREFIX).cyan()),
      ResponseContent::Warning(message) => println!("{} {message}", style(WARNING_PREFIX).yellow()),
    }
    Ok(())
  }
}

/// Detailed view of one paper.
fn print_paper(paper: &Paper) {
  println!("{} {}", style(INFO_PREFIX).cyan(), style(paper.display_title()).white().bold());
  println!("{} {} {}", style(CONTINUE_PREFIX).dim(), style("ID:").green().bold(), paper.id);
  println!(
    "{} {} {}",
    style(CONTINUE_PREFIX).dim(),
    style("Authors:").green().bold(),
    paper.display_authors()
  );
  println!(
    "{} {} {}",
    style(CONTINUE_PREFIX).dim(),
    style("Tags:").green().bold(),
    paper.tags.join(", ")
  );
  if let Some(doi) = paper.doi() {
    println!("{} {} {}", style(CONTINUE_PREFIX).dim(), style("DOI:").green().bold(), style(doi).blue());
  }
  if !paper.url.trim().is_empty() {
    println!(
      "{} {} {}",
      style(CONTINUE_PREFIX).dim(),
      style("URL:").green().bold(),
      style(&paper.url).blue().underlined()
    );
  }
  let analysis = if paper.analysis_text().is_some() { "yes" } else { "no" };
  println!("{} {} {analysis}", style(LAST_ITEM_PREFIX).dim(), style("Analysis:").green().bold());
}
