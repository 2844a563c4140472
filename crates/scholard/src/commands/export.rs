//! Module for exporting a single paper from the [`scholar`] library.

use super::*;

/// Arguments that can be used for the [`Commands::Export`]
#[derive(Args, Clone)]
pub struct ExportArgs {
  /// Identifier of the saved paper
  pub id: String,

  /// Directory to write the PDF into
  #[arg(long, short, default_value = ".")]
  pub out: PathBuf,
}

/// Function for the [`Commands::Export`] in the CLI.
pub async fn export<I: UserInteraction>(
  interaction: &I,
  library: &Library,
  config: LayoutConfig,
  args: ExportArgs,
) -> Result<()> {
  let paper = find(library, &args.id)?;
  if paper.analysis_text().is_none() {
    interaction.reply(ResponseContent::Warning("This paper has no analysis yet"))?;
  }

  interaction.reply(ResponseContent::Working(&format!("Exporting \"{}\"", paper.display_title())))?;
  let path = export_paper(paper, &args.out, config).await?;
  interaction.reply(ResponseContent::Success(&format!("Saved to {}", path.display())))
}
