//! Module for importing records into the [`scholar`] library.

use super::*;

/// Arguments that can be used for the [`Commands::Add`]
#[derive(Args, Clone)]
pub struct AddArgs {
  /// JSON file with one paper record or an array of records
  pub file: PathBuf,
}

/// Function for the [`Commands::Add`] in the CLI.
///
/// Records whose id is already saved are skipped with a warning; the rest are saved.
pub async fn add<I: UserInteraction>(
  interaction: &I,
  library: &mut Library,
  args: AddArgs,
) -> Result<()> {
  let records = load_records(&args.file).await?;
  interaction
    .reply(ResponseContent::Working(&format!("Importing {} records", records.len())))?;

  let mut added = 0;
  for paper in records {
    match library.add(paper) {
      Ok(()) => added += 1,
      Err(e @ ScholarError::DuplicatePaper(_)) =>
        interaction.reply(ResponseContent::Warning(&e.to_string()))?,
      Err(e) => return Err(e.into()),
    }
  }

  if added > 0 {
    library.save().await?;
  }
  interaction.reply(ResponseContent::Success(&format!(
    "Added {added} papers to {}",
    library.path().display()
  )))
}
