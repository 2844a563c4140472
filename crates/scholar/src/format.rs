//! Text helpers shared by the layout and export code.

use url::Url;

/// Ellipsis appended to truncated titles.
pub const ELLIPSIS: &str = "...";

/// Base of the DOI resolver used for bare DOIs.
pub const DOI_RESOLVER: &str = "https://doi.org/";

/// Turns the start of a title into a filesystem-safe file stem.
///
/// Takes the first `max_chars` characters and replaces every character that is not an
/// ASCII letter or digit with an underscore.
///
/// # Examples
///
/// ```
/// use scholar::format::format_title;
///
/// assert_eq!(format_title("BERT: Pre-training", 10), "BERT__Pre_");
/// ```
pub fn format_title(title: &str, max_chars: usize) -> String {
  title
    .chars()
    .take(max_chars)
    .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
    .collect()
}

/// Caps `text` at `max_chars` characters, appending [`ELLIPSIS`] when anything was cut.
///
/// # Examples
///
/// ```
/// use scholar::format::truncate;
///
/// assert_eq!(truncate("abcdef", 3), "abc...");
/// assert_eq!(truncate("abc", 3), "abc");
/// ```
pub fn truncate(text: &str, max_chars: usize) -> String {
  match text.char_indices().nth(max_chars) {
    Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
    None => text.to_string(),
  }
}

/// Link target for a DOI: the DOI itself when it already is a URL, otherwise the
/// resolver URL.
///
/// # Examples
///
/// ```
/// use scholar::format::doi_url;
///
/// assert_eq!(doi_url("10.1145/1327452.1327492"), "https://doi.org/10.1145/1327452.1327492");
/// assert_eq!(doi_url("https://doi.org/10.1/x"), "https://doi.org/10.1/x");
/// ```
pub fn doi_url(doi: &str) -> String {
  let doi = doi.trim();
  match Url::parse(doi) {
    Ok(url) if matches!(url.scheme(), "http" | "https") => doi.to_string(),
    _ => format!("{DOI_RESOLVER}{doi}"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_format_title() {
    assert_eq!(format_title("Attention Is All You Need", 30), "Attention_Is_All_You_Need");
    assert_eq!(
      format_title("A Very Long Title That Goes On And On Forever", 30),
      "A_Very_Long_Title_That_Goes_On"
    );
    assert_eq!(format_title("Über-Modelle", 30), "_ber_Modelle");
    assert_eq!(format_title("", 30), "");
  }

  #[test]
  fn test_truncate_boundary() {
    let exactly_seventy = "x".repeat(70);
    assert_eq!(truncate(&exactly_seventy, 70), exactly_seventy);

    let seventy_one = "y".repeat(71);
    let truncated = truncate(&seventy_one, 70);
    assert_eq!(truncated, format!("{}...", "y".repeat(70)));
  }

  #[test]
  fn test_truncate_counts_characters() {
    let title = "é".repeat(72);
    let truncated = truncate(&title, 70);
    assert_eq!(truncated.chars().count(), 73);
    assert!(truncated.ends_with(ELLIPSIS));
  }

  #[test]
  fn test_doi_url() {
    assert_eq!(doi_url("10.48550/arXiv.1706.03762"), "https://doi.org/10.48550/arXiv.1706.03762");
    assert_eq!(doi_url(" 10.1/abc "), "https://doi.org/10.1/abc");
    assert_eq!(doi_url("http://dx.doi.org/10.1/abc"), "http://dx.doi.org/10.1/abc");
    // `doi:` parses as a URL scheme but is not a link a reader can follow
    assert_eq!(doi_url("doi:10.1/abc"), "https://doi.org/doi:10.1/abc");
  }
}
