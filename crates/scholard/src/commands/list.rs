//! Module for listing the [`scholar`] library.

use super::*;

/// Function for the [`Commands::List`] in the CLI.
pub fn list<I: UserInteraction>(interaction: &I, library: &Library) -> Result<()> {
  if library.papers().is_empty() {
    return interaction.reply(ResponseContent::Info("The library is empty"));
  }
  let papers: Vec<&Paper> = library.papers().iter().collect();
  interaction.reply(ResponseContent::Papers(&papers))
}
