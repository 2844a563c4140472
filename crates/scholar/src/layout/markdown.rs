//! Flow of markdown-like analysis text onto pages.
//!
//! Analyses are written by a language model in a loose markdown dialect. Only the parts
//! that matter on paper are interpreted:
//!
//! - `#` to `######` headers, drawn larger and bold
//! - fenced code blocks, drawn in Courier over a light band
//! - bold lines (`**...`) and ordinal list items (`1. ...`), drawn bold
//! - emphasis markers, inline code backticks and `[text](url)` links, which are stripped
//!
//! Everything else is body text. Lines are wrapped to the available width and a page is
//! appended whenever the cursor crosses the bottom margin.

use super::*;

lazy_static! {
  /// An ordinal list item such as `12. Results`.
  static ref ORDINAL: Regex = Regex::new(r"^\d+\.\s").unwrap();
  /// A markdown link; the first group is the visible text.
  static ref LINK: Regex = Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap();
  /// Emphasis markers and inline code backticks.
  static ref MARKERS: Regex = Regex::new(r"\*\*|__|\*|`").unwrap();
}

/// Deepest markdown header level.
const MAX_HEADER_LEVEL: usize = 6;

/// Horizontal padding of the band behind code lines.
const CODE_BAND_PADDING: f32 = 2.0;

/// Renders `text` starting at cursor `y` and returns the cursor after the last line.
///
/// Lines are drawn at left margin `x` and wrapped to `max_width`. Before every physical
/// line, if `y` plus the configured bottom margin exceeds `page_height`, a page is
/// appended and the cursor moves to the configured top margin. An unterminated code fence
/// keeps the rest of the text in code style.
///
/// # Examples
///
/// ```
/// use scholar::{
///   config::LayoutConfig,
///   layout::{render_markdown, Document},
/// };
///
/// let mut doc = Document::new(LayoutConfig::default());
/// let y = render_markdown(&mut doc, "## Method\nWe **measure** it.", 20.0, 40.0, 170.0, 297.0);
/// assert_eq!(y, 40.0 + 7.0 + 5.0);
/// assert!(doc.pages()[0].contains_text("We measure it."));
/// ```
pub fn render_markdown(
  doc: &mut Document,
  text: &str,
  x: f32,
  y: f32,
  max_width: f32,
  page_height: f32,
) -> f32 {
  let config = *doc.config();
  let mut flow = Flow { doc, config, x, y, max_width, page_height };
  let mut in_code_block = false;

  for line in text.lines() {
    let trimmed = line.trim();

    if trimmed.starts_with("```") {
      in_code_block = !in_code_block;
      flow.y += config.fence_gap;
      continue;
    }

    if in_code_block {
      flow.code_line(line);
    } else if trimmed.is_empty() {
      flow.y += config.blank_line_gap;
    } else if let Some((level, heading)) = parse_header(trimmed) {
      flow.header(level, heading);
    } else {
      let style = if is_bold_line(trimmed) { TextStyle::BODY_BOLD } else { TextStyle::BODY };
      flow.body(&strip_inline(trimmed), style);
    }
  }

  if in_code_block {
    debug!("Analysis text ends inside an unterminated code block");
  }
  flow.y
}

/// Style of a header line at `level` (1 is the largest).
pub fn header_style(level: usize) -> TextStyle {
  let size = match level {
    1 => 16.0,
    2 => 14.0,
    _ => 12.0,
  };
  TextStyle::new(Font::HelveticaBold, size, Rgb::HEADING)
}

/// Removes emphasis markers and inline code backticks, and replaces links with their text.
///
/// # Examples
///
/// ```
/// use scholar::layout::markdown::strip_inline;
///
/// assert_eq!(strip_inline("See **[the paper](https://x.org)** and `f(x)`"), "See the paper and f(x)");
/// ```
pub fn strip_inline(line: &str) -> String {
  let unlinked = LINK.replace_all(line, "$1");
  MARKERS.replace_all(&unlinked, "").into_owned()
}

/// Header level and text of a trimmed line starting with `#`.
fn parse_header(trimmed: &str) -> Option<(usize, &str)> {
  let level = trimmed.chars().take_while(|&c| c == '#').count();
  if level == 0 {
    return None;
  }
  Some((level.min(MAX_HEADER_LEVEL), trimmed.trim_start_matches('#').trim()))
}

/// Whether a trimmed, non-header line is drawn bold.
fn is_bold_line(trimmed: &str) -> bool { trimmed.starts_with("**") || ORDINAL.is_match(trimmed) }

/// Cursor state while flowing one block of text.
struct Flow<'a> {
  /// Surface being drawn on
  doc:         &'a mut Document,
  /// Copy of the document geometry
  config:      LayoutConfig,
  /// Left edge of every line
  x:           f32,
  /// Current baseline
  y:           f32,
  /// Wrapping width
  max_width:   f32,
  /// Height used for the page-break test
  page_height: f32,
}

impl Flow<'_> {
  /// Appends a page when the next line would cross the bottom margin.
  fn break_if_needed(&mut self) {
    if self.y + self.config.bottom_margin > self.page_height {
      let page = self.doc.add_page();
      trace!("Analysis flowed onto page {page}");
      self.y = self.config.margin;
    }
  }

  /// Draws a header; the style only applies to these lines.
  fn header(&mut self, level: usize, text: &str) {
    let style = header_style(level);
    for line in style.split(text, self.max_width) {
      self.break_if_needed();
      self.doc.text(line, self.x, self.y, style);
      self.y += self.config.header_line_height;
    }
  }

  /// Draws already stripped body text.
  fn body(&mut self, text: &str, style: TextStyle) {
    for line in style.split(text, self.max_width) {
      self.break_if_needed();
      self.doc.text(line, self.x, self.y, style);
      self.y += self.config.body_line_height;
    }
  }

  /// Draws one source line of a code block, keeping its indentation.
  fn code_line(&mut self, line: &str) {
    let style = TextStyle::CODE;
    let line_height = self.config.code_line_height;
    let expanded = line.replace('\t', "  ");
    for wrapped in style.split(&expanded, self.max_width) {
      self.break_if_needed();
      let band = Rect::new(
        self.x - CODE_BAND_PADDING,
        self.y - line_height * 0.75,
        self.max_width + 2.0 * CODE_BAND_PADDING,
        line_height,
      );
      self.doc.fill_rect(band, Rgb::CODE_BACKGROUND);
      self.doc.text(wrapped, self.x, self.y, style);
      self.y += line_height;
    }
  }
}
