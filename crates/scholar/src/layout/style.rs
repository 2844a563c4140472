//! Colors and text styles.
//!
//! A [`TextStyle`] is passed with every text draw instead of being kept as "current" state
//! on the surface, so a styled block can never leak its font into the text after it.

use super::*;
use crate::format::ELLIPSIS;

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
  /// Body text
  pub const TEXT: Rgb = Rgb(33, 37, 41);
  /// Secondary text such as tags and dates
  pub const MUTED: Rgb = Rgb(107, 114, 128);
  /// Headings and the journal title
  pub const HEADING: Rgb = Rgb(30, 58, 138);
  /// Small labels above titles and boxes
  pub const ACCENT: Rgb = Rgb(79, 70, 229);
  /// Clickable links
  pub const LINK: Rgb = Rgb(37, 99, 235);
  /// Verification marks and verified links
  pub const VERIFIED: Rgb = Rgb(22, 163, 74);
  /// Code text
  pub const CODE: Rgb = Rgb(55, 65, 81);
  /// Band behind code lines
  pub const CODE_BACKGROUND: Rgb = Rgb(243, 244, 246);
  /// Background of the citation box
  pub const CITATION_BACKGROUND: Rgb = Rgb(238, 242, 255);

  /// Channels scaled to `0.0..=1.0`, as PDF color operators expect.
  pub fn components(self) -> [f32; 3] {
    [f32::from(self.0) / 255.0, f32::from(self.1) / 255.0, f32::from(self.2) / 255.0]
  }
}

/// Font, size (points) and color of a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
  /// Typeface
  pub font:  Font,
  /// Size in points
  pub size:  f32,
  /// Fill color
  pub color: Rgb,
}

impl TextStyle {
  /// Regular body text.
  pub const BODY: TextStyle = TextStyle::new(Font::Helvetica, 10.0, Rgb::TEXT);
  /// Bold body text.
  pub const BODY_BOLD: TextStyle = TextStyle::new(Font::HelveticaBold, 10.0, Rgb::TEXT);
  /// Code block text.
  pub const CODE: TextStyle = TextStyle::new(Font::Courier, 9.0, Rgb::CODE);

  /// Creates a style.
  pub const fn new(font: Font, size: f32, color: Rgb) -> Self { Self { font, size, color } }

  /// The same style in another color.
  pub const fn with_color(self, color: Rgb) -> Self { Self { color, ..self } }

  /// The same style at another size.
  pub const fn with_size(self, size: f32) -> Self { Self { size, ..self } }

  /// Width of `text` in millimetres when drawn in this style.
  pub fn width_of(&self, text: &str) -> f32 { self.font.text_width(text, self.size) }

  /// Wraps `text` to `max_width` millimetres in this style.
  pub fn split(&self, text: &str, max_width: f32) -> Vec<String> {
    split_to_size(text, self.font, self.size, max_width)
  }

  /// Shortens `text` until it fits in `max_width` millimetres, marking the cut with
  /// [`ELLIPSIS`].
  pub fn clip(&self, text: &str, max_width: f32) -> String {
    if self.width_of(text) <= max_width {
      return text.to_string();
    }
    let budget = max_width - self.width_of(ELLIPSIS);
    let mut width = 0.0;
    let mut end = 0;
    for (index, c) in text.char_indices() {
      width += self.font.text_width(c.encode_utf8(&mut [0; 4]), self.size);
      if width > budget {
        break;
      }
      end = index + c.len_utf8();
    }
    format!("{}{ELLIPSIS}", text[..end].trim_end())
  }
}
