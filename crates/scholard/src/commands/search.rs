//! Module for searching the [`scholar`] library.

use super::*;

/// Arguments that can be used for the [`Commands::Search`]
#[derive(Args, Clone)]
pub struct SearchArgs {
  /// Text to look for in titles, authors and tags
  pub query: String,

  /// Show detailed paper information
  #[arg(long)]
  pub detailed: bool,
}

/// Function for the [`Commands::Search`] in the CLI.
pub fn search<I: UserInteraction>(
  interaction: &I,
  library: &Library,
  args: SearchArgs,
) -> Result<()> {
  let SearchArgs { query, detailed } = args;
  interaction.reply(ResponseContent::Info(&format!("Searching for: {query}")))?;

  let papers = library.search(&query);
  if papers.is_empty() {
    interaction.reply(ResponseContent::Info("No papers found"))
  } else if detailed {
    for paper in papers {
      interaction.reply(ResponseContent::Paper(paper))?;
    }
    Ok(())
  } else {
    interaction.reply(ResponseContent::Papers(&papers))
  }
}
