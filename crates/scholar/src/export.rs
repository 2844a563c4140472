//! Export operations that lay out papers and write finished PDF files.
//!
//! Both operations create the output directory if needed and return the path of the
//! written file:
//!
//! - [`export_paper`] writes `<Title>_analysis.pdf` for one paper, where `<Title>` is the first
//!   30 characters of the title made filesystem-safe
//! - [`export_journal`] writes [`JOURNAL_FILE_NAME`] for a list of papers

use super::*;
use crate::{
  format::format_title,
  layout::{layout_journal, layout_paper, paginator::ProgressFn, JournalOptions},
  pdf::to_pdf_bytes,
};

/// File name of an exported journal.
pub const JOURNAL_FILE_NAME: &str = "research_journal.pdf";

/// Number of title characters kept in a single-paper file name.
const FILE_TITLE_CHARS: usize = 30;

/// File name of a single-paper export.
///
/// # Examples
///
/// ```
/// use scholar::{export::paper_file_name, paper::Paper};
///
/// let paper = Paper::new("p-1", "Attention Is All You Need");
/// assert_eq!(paper_file_name(&paper).to_str(), Some("Attention_Is_All_You_Need_analysis.pdf"));
/// ```
pub fn paper_file_name(paper: &Paper) -> PathBuf {
  PathBuf::from(format!("{}_analysis.pdf", format_title(paper.display_title(), FILE_TITLE_CHARS)))
}

/// Lays out a single paper and writes it into `dir`.
///
/// # Examples
///
/// ```no_run
/// use scholar::{export::export_paper, prelude::*};
///
/// # async fn example() -> Result<(), ScholarError> {
/// let paper = Paper::new("p-1", "Attention Is All You Need");
/// let path = export_paper(&paper, "exports", LayoutConfig::default()).await?;
/// println!("Saved to {}", path.display());
/// # Ok(())
/// # }
/// ```
#[instrument(skip(paper, dir, config), fields(id = %paper.id))]
pub async fn export_paper(
  paper: &Paper,
  dir: impl AsRef<Path>,
  config: LayoutConfig,
) -> Result<PathBuf> {
  let document = layout_paper(paper, config);
  let bytes = to_pdf_bytes(&document, paper.display_title())?;
  let path = dir.as_ref().join(paper_file_name(paper));
  write_file(&path, &bytes).await?;
  info!("Exported \"{}\" ({} pages) to {}", paper.display_title(), document.page_count(), path.display());
  Ok(path)
}

/// Lays out `papers` as a journal and writes it into `dir`.
///
/// `progress` is called with `(current, total)` after each paper has been laid out. Nothing
/// is written unless every paper was laid out.
#[instrument(skip_all, fields(papers = papers.len()))]
pub async fn export_journal(
  papers: &[Paper],
  dir: impl AsRef<Path>,
  config: LayoutConfig,
  options: &JournalOptions,
  progress: Option<ProgressFn<'_>>,
) -> Result<PathBuf> {
  let journal = layout_journal(papers, config, options, progress).await?;
  let bytes = to_pdf_bytes(&journal.document, &options.title)?;
  let path = dir.as_ref().join(JOURNAL_FILE_NAME);
  write_file(&path, &bytes).await?;
  info!(
    "Exported journal of {} papers ({} pages) to {}",
    papers.len(),
    journal.document.page_count(),
    path.display()
  );
  Ok(path)
}

/// Writes `bytes` to `path`, creating missing parent directories.
async fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
  if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
    tokio::fs::create_dir_all(parent).await?;
  }
  debug!("Writing {} bytes to {path:?}", bytes.len());
  tokio::fs::write(path, bytes).await?;
  Ok(())
}
