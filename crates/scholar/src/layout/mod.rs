//! Page-aware layout of papers into an in-memory page sequence.
//!
//! Layout is split into three layers:
//!
//! ```text
//!   [paginator]: title page, per-paper sections, contents backfill
//!        ↓
//!   [markdown]: flow of markdown-like analysis text with page breaks
//!        ↓
//!   [Document]: pages of draw operations and link regions
//! ```
//!
//! A [`Document`] is only a record of what to draw where. Coordinates are millimetres
//! from the top-left corner of the page and text is positioned by its baseline, so the
//! pages can be inspected directly in tests and handed to [`crate::pdf`] for
//! serialization.
//!
//! Unlike a print stream, the page sequence is random access: [`Document::set_page`]
//! moves drawing back to an earlier page, which is how the table of contents gets written
//! after every paper's real page number is known.

use super::*;

pub mod font;
pub mod markdown;
pub mod paginator;
pub mod style;

pub use self::{
  font::{split_to_size, Font},
  markdown::render_markdown,
  paginator::{layout_journal, layout_paper, ContentsEntry, Journal, JournalOptions},
  style::{Rgb, TextStyle},
};

/// An axis-aligned rectangle, `y` measured downwards from the top of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
  /// Left edge
  pub x:      f32,
  /// Top edge
  pub y:      f32,
  /// Horizontal extent
  pub width:  f32,
  /// Vertical extent
  pub height: f32,
}

impl Rect {
  /// Creates a rectangle from its top-left corner and size.
  pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self { Self { x, y, width, height } }
}

/// A single drawing instruction on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
  /// One line of text with its baseline starting at `(x, y)`.
  Text {
    /// Left edge of the text
    x:     f32,
    /// Baseline
    y:     f32,
    /// Text to draw; never contains line breaks
    text:  String,
    /// Font, size and color
    style: TextStyle,
  },
  /// A filled rectangle without a border.
  Fill {
    /// Area to fill
    area:  Rect,
    /// Fill color
    color: Rgb,
  },
}

/// Where a clickable region leads.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkTarget {
  /// Another page of the same document, by zero-based index
  Page(usize),
  /// An external URL
  Uri(String),
}

/// A clickable region on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
  /// Clickable area
  pub area:   Rect,
  /// Destination
  pub target: LinkTarget,
}

/// Everything drawn on one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
  /// Drawing instructions, in painting order
  pub ops:   Vec<DrawOp>,
  /// Clickable regions
  pub links: Vec<Link>,
}

impl Page {
  /// Text lines on the page together with their style, in drawing order.
  pub fn texts(&self) -> impl Iterator<Item = (&str, &TextStyle)> {
    self.ops.iter().filter_map(|op| match op {
      DrawOp::Text { text, style, .. } => Some((text.as_str(), style)),
      DrawOp::Fill { .. } => None,
    })
  }

  /// Whether any text line on the page contains `needle`.
  pub fn contains_text(&self, needle: &str) -> bool {
    self.texts().any(|(text, _)| text.contains(needle))
  }

  /// Whether nothing has been drawn on the page.
  pub fn is_blank(&self) -> bool { self.ops.is_empty() && self.links.is_empty() }
}

/// A page sequence plus the index of the page currently drawn on.
///
/// A new document starts with one blank page. Pages are only ever appended; drawing
/// always targets the current page.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
  /// Geometry shared by every page
  config:  LayoutConfig,
  /// All pages in order
  pages:   Vec<Page>,
  /// Zero-based index of the page being drawn on
  current: usize,
}

impl Document {
  /// Creates a document holding a single blank page.
  pub fn new(config: LayoutConfig) -> Self {
    Self { config, pages: vec![Page::default()], current: 0 }
  }

  /// Page geometry of this document.
  pub fn config(&self) -> &LayoutConfig { &self.config }

  /// All pages in order.
  pub fn pages(&self) -> &[Page] { &self.pages }

  /// Consumes the document, returning its pages.
  pub fn into_pages(self) -> Vec<Page> { self.pages }

  /// Number of pages.
  pub fn page_count(&self) -> usize { self.pages.len() }

  /// Zero-based index of the page being drawn on.
  pub fn current_page(&self) -> usize { self.current }

  /// Appends a blank page, makes it current and returns the new page count, which is also
  /// the one-based number of the new page.
  pub fn add_page(&mut self) -> usize {
    self.pages.push(Page::default());
    self.current = self.pages.len() - 1;
    trace!("Appended page {}", self.pages.len());
    self.pages.len()
  }

  /// Makes an existing page current.
  pub fn set_page(&mut self, index: usize) -> Result<()> {
    if index >= self.pages.len() {
      return Err(ScholarError::PageOutOfRange(index, self.pages.len()));
    }
    self.current = index;
    Ok(())
  }

  /// Draws one line of text with its baseline at `y`.
  pub fn text(&mut self, text: impl Into<String>, x: f32, y: f32, style: TextStyle) {
    let text = text.into();
    if text.is_empty() {
      return;
    }
    self.page_mut().ops.push(DrawOp::Text { x, y, text, style });
  }

  /// Fills a rectangle.
  pub fn fill_rect(&mut self, area: Rect, color: Rgb) {
    self.page_mut().ops.push(DrawOp::Fill { area, color });
  }

  /// Makes `area` a link to an external URL.
  pub fn link_uri(&mut self, area: Rect, uri: impl Into<String>) {
    self.page_mut().links.push(Link { area, target: LinkTarget::Uri(uri.into()) });
  }

  /// Makes `area` a link to the page with zero-based index `page`.
  pub fn link_page(&mut self, area: Rect, page: usize) {
    self.page_mut().links.push(Link { area, target: LinkTarget::Page(page) });
  }

  /// The page being drawn on.
  fn page_mut(&mut self) -> &mut Page { &mut self.pages[self.current] }
}
