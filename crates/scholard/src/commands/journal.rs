//! Module for exporting a journal of papers from the [`scholar`] library.

use super::*;

/// Arguments that can be used for the [`Commands::Journal`]
#[derive(Args, Clone)]
pub struct JournalArgs {
  /// Identifiers of the papers to include, in order; every saved paper when omitted
  pub ids: Vec<String>,

  /// Directory to write the journal into
  #[arg(long, short, default_value = ".")]
  pub out: PathBuf,

  /// Name printed on the title page
  #[arg(long, default_value = "Research Journal")]
  pub title: String,
}

/// Function for the [`Commands::Journal`] in the CLI.
pub async fn journal<I: UserInteraction + Sync>(
  interaction: &I,
  library: &Library,
  config: LayoutConfig,
  args: JournalArgs,
) -> Result<()> {
  let JournalArgs { ids, out, title } = args;

  let papers: Vec<Paper> = if ids.is_empty() {
    library.papers().to_vec()
  } else {
    ids.iter().map(|id| find(library, id).cloned()).collect::<Result<_>>()?
  };
  if papers.is_empty() {
    return Err(ScholardError::NothingToExport("the library is empty".to_string()));
  }

  let total = papers.len();
  if !interaction.confirm(&format!("Build a journal of {total} papers?"))? {
    return interaction.reply(ResponseContent::Info("Operation cancelled"));
  }

  let options = JournalOptions { title, ..JournalOptions::default() };
  let mut report = |current: usize, total: usize| {
    let message = format!("Laid out paper {current} of {total}");
    if let Err(e) = interaction.reply(ResponseContent::Working(&message)) {
      warn!("Could not report progress: {e}");
    }
  };
  let path = export_journal(&papers, &out, config, &options, Some(&mut report)).await?;
  interaction.reply(ResponseContent::Success(&format!(
    "Journal of {total} papers saved to {}",
    path.display()
  )))
}
