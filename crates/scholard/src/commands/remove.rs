//! Module for removing papers from the [`scholar`] library.

use super::*;

/// Arguments that can be used for the [`Commands::Remove`]
#[derive(Args, Clone)]
pub struct RemoveArgs {
  /// Identifier of the saved paper
  pub id: String,
}

/// Function for the [`Commands::Remove`] in the CLI.
pub async fn remove<I: UserInteraction>(
  interaction: &I,
  library: &mut Library,
  args: RemoveArgs,
) -> Result<()> {
  let paper = find(library, &args.id)?;
  interaction.reply(ResponseContent::Paper(paper))?;

  if !interaction.confirm(&format!("Remove \"{}\" from the library?", paper.display_title()))? {
    return interaction.reply(ResponseContent::Info("Operation cancelled"));
  }

  let removed = library.remove(&args.id)?;
  library.save().await?;
  interaction.reply(ResponseContent::Success(&format!("Removed \"{}\"", removed.display_title())))
}
