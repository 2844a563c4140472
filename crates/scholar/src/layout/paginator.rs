//! Page and cursor management for whole documents.
//!
//! The paginator lays out paper sections one after another and keeps the vertical cursor.
//! A journal is built in two passes:
//!
//! 1. A forward pass draws the title page, appends a blank contents page, then gives every
//!    paper a fresh page. The number of that page is recorded the moment it is appended,
//!    before anything in the section can overflow, and kept as a [`ContentsEntry`].
//! 2. A backfill pass returns to the contents page with [`Document::set_page`] and writes
//!    the entries, each linking to its paper's first page.

use super::*;
use crate::format::{doi_url, truncate};

/// Longest title, in characters, shown in the table of contents.
pub const CONTENTS_TITLE_LIMIT: usize = 70;

/// Citation box height without any citation lines: label, top and bottom padding.
pub const CITATION_BOX_PADDING: f32 = 14.0;
/// Height added to the citation box per wrapped citation line.
pub const CITATION_LINE_HEIGHT: f32 = 4.5;
/// Height added to the citation box when a verified source link is drawn inside it.
pub const CITATION_LINK_SPACE: f32 = 6.0;

/// Style of a paper's title at the top of its section.
pub const PAPER_TITLE_STYLE: TextStyle = TextStyle::new(Font::HelveticaBold, 18.0, Rgb::HEADING);

/// Small label above the title.
const SECTION_TAG_STYLE: TextStyle = TextStyle::new(Font::HelveticaBold, 8.0, Rgb::ACCENT);
/// Author line.
const AUTHORS_STYLE: TextStyle = TextStyle::new(Font::HelveticaOblique, 11.0, Rgb::MUTED);
/// "Summary" and "Deep Dive Analysis" headings.
const SECTION_HEADING_STYLE: TextStyle = TextStyle::new(Font::HelveticaBold, 12.0, Rgb::HEADING);
/// Citation text inside the box.
const CITATION_STYLE: TextStyle = TextStyle::new(Font::Helvetica, 9.0, Rgb::TEXT);
/// Tag line.
const TAGS_STYLE: TextStyle = TextStyle::new(Font::Helvetica, 9.0, Rgb::MUTED);
/// Source links.
const LINK_STYLE: TextStyle = TextStyle::new(Font::Helvetica, 9.0, Rgb::LINK);
/// Contents entry titles and numbers.
const ENTRY_STYLE: TextStyle = TextStyle::new(Font::Helvetica, 11.0, Rgb::TEXT);
/// DOI line under a contents entry.
const DOI_STYLE: TextStyle = TextStyle::new(Font::Helvetica, 8.0, Rgb::LINK);

/// Inset of the citation text from the box edges.
const CITATION_INSET: f32 = 5.0;
/// Longest URL, in characters, drawn as link text.
const URL_DISPLAY_LIMIT: usize = 90;
/// Indent of contents titles past their index number.
const ENTRY_INDENT: f32 = 10.0;
/// Cursor advance of a contents entry line.
const ENTRY_HEIGHT: f32 = 7.0;
/// Cursor advance of a DOI line under a contents entry.
const DOI_LINE_HEIGHT: f32 = 5.0;
/// Space after each contents entry.
const ENTRY_GAP: f32 = 3.0;
/// Mark drawn after the title of a verified contents entry.
const VERIFIED_MARK: &str = "(Verified)";
/// Style of [`VERIFIED_MARK`].
const VERIFIED_MARK_STYLE: TextStyle = TextStyle::new(Font::HelveticaOblique, 9.0, Rgb::VERIFIED);
/// Space between a contents title and its verified mark.
const MARK_GAP: f32 = 2.0;
/// Smallest space kept between a contents title and its page number.
const NUMBER_GAP: f32 = 4.0;

/// Progress hook for journal layout, called with `(current, total)` after every paper.
pub type ProgressFn<'a> = &'a mut (dyn FnMut(usize, usize) + Send);

/// One line of the table of contents.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentsEntry {
  /// Full (untruncated) display title of the paper
  pub title:    String,
  /// One-based number of the page the paper's section starts on
  pub page:     usize,
  /// Whether the paper was verified against a real source
  pub verified: bool,
  /// DOI of the paper, if any
  pub doi:      Option<String>,
}

/// Front matter of a journal.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalOptions {
  /// Name printed on the title page
  pub title:        String,
  /// Date printed on the title page; also determines the edition
  pub generated_at: DateTime<Utc>,
}

impl Default for JournalOptions {
  fn default() -> Self { Self { title: "Research Journal".to_string(), generated_at: Utc::now() } }
}

/// A laid out journal.
#[derive(Debug, Clone, PartialEq)]
pub struct Journal {
  /// All pages
  pub document:      Document,
  /// Zero-based index of the table of contents page
  pub contents_page: usize,
  /// Contents entries in paper order
  pub contents:      Vec<ContentsEntry>,
}

/// Lays out a single paper on a fresh document starting at page 1.
///
/// # Examples
///
/// ```
/// use scholar::{config::LayoutConfig, layout::layout_paper, paper::Paper};
///
/// let paper = Paper::new("p-1", "Attention Is All You Need").with_summary("Transformers.");
/// let doc = layout_paper(&paper, LayoutConfig::default());
/// assert_eq!(doc.page_count(), 1);
/// assert!(doc.pages()[0].contains_text("Attention Is All You Need"));
/// ```
#[instrument(skip(paper, config), fields(id = %paper.id), level = "debug")]
pub fn layout_paper(paper: &Paper, config: LayoutConfig) -> Document {
  let mut paginator = Paginator::new(config);
  paginator.paper_section(paper, "RESEARCH PAPER ANALYSIS");
  paginator.doc
}

/// Lays out a journal of `papers` in input order.
///
/// After each paper, `progress` (if any) is called with the number of papers done and the
/// total, then the task yields so a host can stay responsive. There is no cancellation:
/// once started, layout runs to completion or fails as a whole.
pub async fn layout_journal(
  papers: &[Paper],
  config: LayoutConfig,
  options: &JournalOptions,
  mut progress: Option<ProgressFn<'_>>,
) -> Result<Journal> {
  let total = papers.len();
  info!("Laying out journal of {total} papers");

  let mut paginator = Paginator::new(config);
  paginator.title_page(options, total);

  paginator.doc.add_page();
  let contents_page = paginator.doc.current_page();

  let mut contents = Vec::with_capacity(total);
  for (index, paper) in papers.iter().enumerate() {
    // Captured before the section can break onto a later page
    let page = paginator.start_page();
    debug!("Paper {} ({}) starts on page {page}", index + 1, paper.id);

    paginator.paper_section(paper, &format!("PAPER {} OF {total}", index + 1));
    contents.push(ContentsEntry {
      title: paper.display_title().to_string(),
      page,
      verified: paper.is_verified(),
      doi: paper.doi().map(str::to_string),
    });

    if let Some(report) = progress.as_deref_mut() {
      report(index + 1, total);
    }
    tokio::task::yield_now().await;
  }

  paginator.contents(contents_page, &contents)?;
  Ok(Journal { document: paginator.doc, contents_page, contents })
}

/// Height of a citation box holding `lines` wrapped citation lines.
///
/// # Examples
///
/// ```
/// use scholar::layout::paginator::{citation_box_height, CITATION_BOX_PADDING, CITATION_LINE_HEIGHT};
///
/// assert_eq!(citation_box_height(1, false), CITATION_BOX_PADDING + CITATION_LINE_HEIGHT);
/// assert!(citation_box_height(1, true) > citation_box_height(1, false));
/// ```
pub fn citation_box_height(lines: usize, with_verified_link: bool) -> f32 {
  let link_space = if with_verified_link { CITATION_LINK_SPACE } else { 0.0 };
  CITATION_BOX_PADDING + lines as f32 * CITATION_LINE_HEIGHT + link_space
}

/// A document together with the vertical cursor on its current page.
struct Paginator {
  /// Surface being drawn on
  doc: Document,
  /// Baseline of the next line on the current page
  y:   f32,
}

impl Paginator {
  /// Starts a fresh document with the cursor at the top margin of page 1.
  fn new(config: LayoutConfig) -> Self {
    Self { y: config.margin, doc: Document::new(config) }
  }

  /// Geometry of the document.
  fn config(&self) -> LayoutConfig { *self.doc.config() }

  /// Appends a page, moves the cursor to its top and returns its one-based number.
  fn start_page(&mut self) -> usize {
    let page = self.doc.add_page();
    self.y = self.config().margin;
    page
  }

  /// Breaks to a new page unless a block of `height` fits above the bottom margin.
  fn ensure_space(&mut self, height: f32) {
    let config = self.config();
    if self.y + height + config.bottom_margin > config.page_height {
      self.start_page();
    }
  }

  /// Draws wrapped text, one cursor advance of `line_height` per line.
  fn paragraph(&mut self, text: &str, style: TextStyle, line_height: f32) {
    let config = self.config();
    for line in style.split(text, config.content_width()) {
      self.ensure_space(0.0);
      self.doc.text(line, config.margin, self.y, style);
      self.y += line_height;
    }
  }

  /// Draws a single link line whose clickable area covers the drawn text.
  fn link_line(&mut self, label: &str, url: &str, style: TextStyle) {
    let config = self.config();
    self.ensure_space(0.0);
    let text = format!("{label}{}", truncate(url, URL_DISPLAY_LIMIT));
    let width = style.width_of(&text).min(config.content_width());
    self.doc.text(text, config.margin, self.y, style);
    self.doc.link_uri(Rect::new(config.margin, self.y - 3.5, width, 5.0), url);
    self.y += 6.0;
  }

  /// Centers one line of text horizontally at baseline `y`.
  fn centered(&mut self, text: &str, y: f32, style: TextStyle) {
    let x = (self.config().page_width - style.width_of(text)) / 2.0;
    self.doc.text(text, x.max(0.0), y, style);
  }

  /// Title page of a journal.
  fn title_page(&mut self, options: &JournalOptions, paper_count: usize) {
    let config = self.config();
    let date = options.generated_at;

    self.centered(
      &options.title.to_uppercase(),
      70.0,
      TextStyle::new(Font::HelveticaBold, 28.0, Rgb::HEADING),
    );
    self.centered(
      "Curated research analyses",
      84.0,
      TextStyle::new(Font::HelveticaOblique, 14.0, Rgb::MUTED),
    );
    self.doc.fill_rect(Rect::new(config.margin + 40.0, 94.0, config.content_width() - 80.0, 0.6), Rgb::ACCENT);

    let meta = TextStyle::new(Font::Helvetica, 12.0, Rgb::TEXT);
    self.centered(&format!("Edition: {}", date.format("%B %Y")), 110.0, meta);
    self.centered(&format!("Generated on {}", date.format("%B %-d, %Y")), 118.0, meta);
    let count = match paper_count {
      1 => "1 paper".to_string(),
      n => format!("{n} papers"),
    };
    self.centered(&count, 126.0, meta.with_color(Rgb::MUTED));
  }

  /// One paper's section, starting at the cursor.
  fn paper_section(&mut self, paper: &Paper, tag: &str) {
    let config = self.config();

    self.ensure_space(0.0);
    self.doc.text(tag, config.margin, self.y, SECTION_TAG_STYLE);
    self.y += 8.0;

    self.paragraph(paper.display_title(), PAPER_TITLE_STYLE, 8.0);
    self.y += 2.0;
    self.paragraph(paper.display_authors(), AUTHORS_STYLE, 5.5);
    self.y += 4.0;

    if paper.has_citation_box() {
      self.citation_box(paper);
    }

    self.paragraph(&format!("Tags: {}", paper.tags.join(", ")), TAGS_STYLE, 5.0);
    self.y += 3.0;

    self.ensure_space(0.0);
    self.doc.text("Summary", config.margin, self.y, SECTION_HEADING_STYLE);
    self.y += 7.0;
    self.paragraph(paper.display_summary(), TextStyle::BODY, config.body_line_height);
    self.y += 5.0;

    if let Some(analysis) = paper.analysis_text() {
      self.ensure_space(0.0);
      self.doc.text("Deep Dive Analysis", config.margin, self.y, SECTION_HEADING_STYLE);
      self.y += 7.0;
      self.y = render_markdown(
        &mut self.doc,
        analysis,
        config.margin,
        self.y,
        config.content_width(),
        config.page_height,
      );
      self.y += 5.0;
    }

    if !paper.url.trim().is_empty() {
      self.link_line("Source: ", paper.url.trim(), LINK_STYLE);
    }
    if let Some(source) = paper.verified_source() {
      self.link_line("Verified Source: ", source, LINK_STYLE.with_color(Rgb::VERIFIED));
    }
  }

  /// Citation box, sized from its wrapped text before anything is drawn.
  fn citation_box(&mut self, paper: &Paper) {
    let config = self.config();
    let inner_width = config.content_width() - 2.0 * CITATION_INSET;
    let lines = CITATION_STYLE.split(paper.citation_text(), inner_width);
    let verified_source = paper.verified_source();
    let height = citation_box_height(lines.len(), verified_source.is_some());

    // A box taller than the usable page still breaks only once and runs past the margin.
    let usable = config.page_height - config.margin - config.bottom_margin;
    if height > usable {
      warn!(
        "Citation of \"{}\" needs {height:.1} mm but a page holds {usable:.1} mm; the box overflows",
        paper.display_title()
      );
    }
    self.ensure_space(height);
    let top = self.y;
    let left = config.margin + CITATION_INSET;
    self.doc.fill_rect(Rect::new(config.margin, top, config.content_width(), height), Rgb::CITATION_BACKGROUND);
    self.doc.text("CITATION", left, top + 6.0, SECTION_TAG_STYLE);

    let mut baseline = top + 11.0;
    for line in lines {
      self.doc.text(line, left, baseline, CITATION_STYLE);
      baseline += CITATION_LINE_HEIGHT;
    }

    if let Some(source) = verified_source {
      let style = CITATION_STYLE.with_color(Rgb::VERIFIED).with_size(8.0);
      let label = paper
        .verification
        .as_ref()
        .and_then(|verification| verification.found_title.as_deref())
        .filter(|title| !title.trim().is_empty())
        .unwrap_or(source);
      let text = format!("Verified: {}", truncate(label, URL_DISPLAY_LIMIT));
      let width = style.width_of(&text).min(inner_width);
      self.doc.text(text, left, baseline + 2.0, style);
      self.doc.link_uri(Rect::new(left, baseline - 1.5, width, 5.0), source);
    }

    self.y = top + height + 6.0;
  }

  /// Writes the table of contents onto the reserved page.
  ///
  /// Entries that do not fit continue on pages appended at the end of the document, so the
  /// page numbers already recorded stay valid.
  fn contents(&mut self, contents_page: usize, entries: &[ContentsEntry]) -> Result<()> {
    let config = self.config();
    self.doc.set_page(contents_page)?;
    self.y = config.margin + 5.0;

    let heading = TextStyle::new(Font::HelveticaBold, 20.0, Rgb::HEADING);
    self.doc.text("Table of Contents", config.margin, self.y, heading);
    self.y += 14.0;

    for (index, entry) in entries.iter().enumerate() {
      let doi_height = if entry.doi.is_some() { DOI_LINE_HEIGHT } else { 0.0 };
      if self.y + ENTRY_HEIGHT + doi_height + config.bottom_margin > config.page_height {
        let page = self.start_page();
        warn!("Table of contents continues on page {page}");
        self.y += 5.0;
        self.doc.text("Table of Contents (continued)", config.margin, self.y, heading.with_size(14.0));
        self.y += 12.0;
      }
      self.contents_entry(index, entry);
    }
    Ok(())
  }

  /// A single contents line, its internal link and optional DOI line.
  ///
  /// The title is capped at [`CONTENTS_TITLE_LIMIT`] characters and then clipped so that it
  /// and the verified mark end before the page number column.
  fn contents_entry(&mut self, index: usize, entry: &ContentsEntry) {
    let config = self.config();
    let title_x = config.margin + ENTRY_INDENT;

    let number_style = TextStyle::new(Font::HelveticaBold, 11.0, Rgb::TEXT);
    let number = entry.page.to_string();
    let number_x = config.page_width - config.margin - number_style.width_of(&number);

    let mark_width =
      if entry.verified { VERIFIED_MARK_STYLE.width_of(VERIFIED_MARK) + MARK_GAP } else { 0.0 };
    let available = number_x - NUMBER_GAP - title_x - mark_width;
    let title = ENTRY_STYLE.clip(&truncate(&entry.title, CONTENTS_TITLE_LIMIT), available);
    let title_width = ENTRY_STYLE.width_of(&title);

    self.doc.text(format!("{}.", index + 1), config.margin, self.y, ENTRY_STYLE.with_color(Rgb::MUTED));
    self.doc.text(title, title_x, self.y, ENTRY_STYLE);
    if entry.verified {
      self.doc.text(VERIFIED_MARK, title_x + title_width + MARK_GAP, self.y, VERIFIED_MARK_STYLE);
    }
    self.doc.text(number, number_x, self.y, number_style);
    self.doc.link_page(
      Rect::new(config.margin, self.y - 5.0, config.content_width(), ENTRY_HEIGHT),
      entry.page - 1,
    );
    self.y += ENTRY_HEIGHT;

    if let Some(doi) = &entry.doi {
      let text = format!("DOI: {doi}");
      let width = DOI_STYLE.width_of(&text);
      self.doc.text(text, title_x, self.y - 1.5, DOI_STYLE);
      self.doc.link_uri(Rect::new(title_x, self.y - 5.0, width, 4.5), doi_url(doi));
      self.y += DOI_LINE_HEIGHT;
    }
    self.y += ENTRY_GAP;
  }
}
