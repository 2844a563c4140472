//! Standard PDF fonts, their advance widths and line wrapping.
//!
//! Only base-14 fonts are used, so nothing is embedded and the widths below are the
//! published AFM metrics (in thousandths of the font size) for the printable ASCII range.
//! Characters outside that range are measured with an average width, which is close
//! enough for wrapping decisions.

/// Millimetres per PDF point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Width used for characters without a table entry.
const FALLBACK_WIDTH: u16 = 556;

/// Helvetica (and Helvetica-Oblique) widths for `' '..='~'`.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
  278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
  556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
  1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
  667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
  333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
  556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold widths for `' '..='~'`.
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
  278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
  556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
  975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
  667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
  333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
  611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// The base-14 fonts the layout draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Font {
  /// Body text
  Helvetica,
  /// Headings, labels and bold list items
  HelveticaBold,
  /// Author lines and annotations
  HelveticaOblique,
  /// Code blocks
  Courier,
}

impl Font {
  /// Every font, in resource order.
  pub const ALL: [Font; 4] =
    [Font::Helvetica, Font::HelveticaBold, Font::HelveticaOblique, Font::Courier];

  /// The PDF `BaseFont` name.
  pub fn base_name(self) -> &'static str {
    match self {
      Font::Helvetica => "Helvetica",
      Font::HelveticaBold => "Helvetica-Bold",
      Font::HelveticaOblique => "Helvetica-Oblique",
      Font::Courier => "Courier",
    }
  }

  /// Resource name used in content streams (`/F1`, `/F2`, ...).
  pub fn resource_name(self) -> String { format!("F{}", self as u8 + 1) }

  /// Advance width of `c` in thousandths of the font size.
  pub fn char_width(self, c: char) -> u16 {
    let table = match self {
      Font::Courier => return 600,
      Font::Helvetica | Font::HelveticaOblique => &HELVETICA,
      Font::HelveticaBold => &HELVETICA_BOLD,
    };
    match c {
      ' '..='~' => table[c as usize - 0x20],
      _ => FALLBACK_WIDTH,
    }
  }

  /// Width of `text` in millimetres at `size` points.
  pub fn text_width(self, text: &str, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(self.char_width(c))).sum();
    units as f32 / 1000.0 * size * MM_PER_PT
  }
}

/// Wraps `text` into lines no wider than `max_width` millimetres.
///
/// Explicit line breaks are kept, words are packed greedily, runs of spaces (including
/// leading indentation) survive, and a single word wider than the line is broken between
/// characters. Every input paragraph yields at least one (possibly empty) line.
pub fn split_to_size(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
  text
    .split('\n')
    .flat_map(|paragraph| wrap_paragraph(paragraph.trim_end_matches('\r'), font, size, max_width))
    .collect()
}

/// Greedy word wrap of a single paragraph.
fn wrap_paragraph(paragraph: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
  let fits = |candidate: &str| font.text_width(candidate, size) <= max_width;
  let mut lines = Vec::new();
  let mut current = String::new();

  for (i, word) in paragraph.split(' ').enumerate() {
    if i == 0 {
      current.push_str(word);
    } else {
      let candidate = format!("{current} {word}");
      if fits(&candidate) {
        current = candidate;
      } else {
        lines.push(std::mem::replace(&mut current, word.to_string()));
      }
    }

    while !fits(&current) && current.chars().count() > 1 {
      let cut = break_index(&current, font, size, max_width);
      let rest = current.split_off(cut);
      lines.push(std::mem::replace(&mut current, rest));
    }
  }

  lines.push(current);
  lines
}

/// Byte index of the longest prefix of `word` that fits, never less than one character.
fn break_index(word: &str, font: Font, size: f32, max_width: f32) -> usize {
  let mut width = 0.0;
  for (index, c) in word.char_indices() {
    width += f32::from(font.char_width(c)) / 1000.0 * size * MM_PER_PT;
    if width > max_width {
      return if index == 0 { c.len_utf8() } else { index };
    }
  }
  word.len()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_widths() {
    // "Hello" in Helvetica: 722 + 556 + 222 + 222 + 556 = 2278 units
    let expected = 2278.0 / 1000.0 * 10.0 * MM_PER_PT;
    assert!((Font::Helvetica.text_width("Hello", 10.0) - expected).abs() < 1e-4);
    assert!(Font::HelveticaBold.text_width("Hello", 10.0) > Font::Helvetica.text_width("Hello", 10.0));
    assert_eq!(Font::Courier.char_width('i'), Font::Courier.char_width('W'));
    assert_eq!(Font::Helvetica.char_width('é'), FALLBACK_WIDTH);
  }

  #[test]
  fn test_resource_names() {
    let names: Vec<String> = Font::ALL.iter().map(|font| font.resource_name()).collect();
    assert_eq!(names, ["F1", "F2", "F3", "F4"]);
  }

  #[test]
  fn test_split_short_text() {
    assert_eq!(split_to_size("short line", Font::Helvetica, 10.0, 170.0), vec!["short line"]);
    assert_eq!(split_to_size("", Font::Helvetica, 10.0, 170.0), vec![""]);
    assert_eq!(split_to_size("a\nb", Font::Helvetica, 10.0, 170.0), vec!["a", "b"]);
  }

  #[test]
  fn test_split_wraps_within_width() {
    let text = "lorem ipsum dolor sit amet ".repeat(20);
    let lines = split_to_size(text.trim(), Font::Helvetica, 10.0, 60.0);
    assert!(lines.len() > 1);
    for line in &lines {
      assert!(Font::Helvetica.text_width(line, 10.0) <= 60.0, "{line:?} is too wide");
    }
    assert_eq!(lines.join(" "), text.trim());
  }

  #[test]
  fn test_split_breaks_long_words() {
    let word = "a".repeat(200);
    let lines = split_to_size(&word, Font::Courier, 9.0, 30.0);
    assert!(lines.len() > 1);
    assert_eq!(lines.concat(), word);
  }

  #[test]
  fn test_split_keeps_indentation() {
    let lines = split_to_size("    let x = 1;", Font::Courier, 9.0, 170.0);
    assert_eq!(lines, vec!["    let x = 1;"]);
  }
}
