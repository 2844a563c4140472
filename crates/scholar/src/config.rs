//! Page geometry and spacing used by the layout engine.
//!
//! All lengths are millimetres measured from the top-left corner of a page. The defaults
//! describe an A4 portrait page with 20 mm margins; any subset of the fields can be
//! overridden from a TOML file:
//!
//! ```toml
//! page_width = 215.9
//! page_height = 279.4
//! body_line_height = 5.5
//! ```

use super::*;

/// Geometry and vertical rhythm of a laid out document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
  /// Width of every page
  pub page_width:         f32,
  /// Height of every page
  pub page_height:        f32,
  /// Left and right margin; also the cursor reset position after a page break
  pub margin:             f32,
  /// Space kept free at the bottom of a page before content breaks to the next one
  pub bottom_margin:      f32,
  /// Cursor advance for each wrapped body line
  pub body_line_height:   f32,
  /// Cursor advance for each wrapped markdown header line
  pub header_line_height: f32,
  /// Cursor advance for each wrapped code line
  pub code_line_height:   f32,
  /// Cursor advance for a blank markdown line
  pub blank_line_gap:     f32,
  /// Cursor advance for a code fence marker line
  pub fence_gap:          f32,
}

impl Default for LayoutConfig {
  fn default() -> Self {
    Self {
      page_width:         210.0,
      page_height:        297.0,
      margin:             20.0,
      bottom_margin:      20.0,
      body_line_height:   5.0,
      header_line_height: 7.0,
      code_line_height:   4.5,
      blank_line_gap:     3.0,
      fence_gap:          2.0,
    }
  }
}

impl LayoutConfig {
  /// Width available to text between the two margins.
  pub fn content_width(&self) -> f32 { self.page_width - 2.0 * self.margin }

  /// Loads a configuration from a TOML file; fields missing in the file keep their defaults.
  ///
  /// # Examples
  ///
  /// ```no_run
  /// use scholar::config::LayoutConfig;
  ///
  /// let config = LayoutConfig::from_path("layout.toml")?;
  /// println!("Pages are {} mm tall", config.page_height);
  /// # Ok::<(), scholar::error::ScholarError>(())
  /// ```
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Loading layout configuration from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    Self::from_toml(&content)
  }

  /// Parses a configuration from TOML text.
  pub fn from_toml(content: &str) -> Result<Self> { Ok(toml::from_str(content)?) }
}
