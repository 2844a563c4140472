//! Core paper record consumed by the layout engine.
//!
//! A [`Paper`] is what the rest of the application saves after a search: the basic
//! metadata of a research paper plus the generated material attached to it (a long-form
//! analysis, a formatted citation and the outcome of a source verification). The layout
//! engine only ever reads these fields.
//!
//! Records are stored as camelCase JSON:
//!
//! ```
//! use scholar::paper::Paper;
//!
//! let paper: Paper = serde_json::from_str(
//!   r#"{
//!     "id": "p-1",
//!     "title": "Attention Is All You Need",
//!     "authors": "Vaswani et al.",
//!     "summary": "Introduces the Transformer.",
//!     "url": "https://arxiv.org/abs/1706.03762",
//!     "tags": ["nlp", "transformers"],
//!     "createdAt": 1700000000000,
//!     "doi": "10.48550/arXiv.1706.03762",
//!     "verification": { "isVerified": true, "sourceUrl": "https://arxiv.org/abs/1706.03762" }
//!   }"#,
//! )
//! .unwrap();
//!
//! assert!(paper.is_verified());
//! assert_eq!(paper.citation_text(), "Citation not generated yet.");
//! ```

use super::*;

/// Placeholder drawn when a paper has no title.
pub const UNTITLED: &str = "Untitled Paper";
/// Placeholder drawn when a paper has no author string.
pub const UNKNOWN_AUTHORS: &str = "Unknown Authors";
/// Placeholder drawn when a paper has no summary.
pub const NO_SUMMARY: &str = "No summary available.";
/// Placeholder drawn inside the citation box when no citation was generated.
pub const NO_CITATION: &str = "Citation not generated yet.";

/// Complete representation of a saved research paper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
  /// Identifier of the record inside the library
  pub id:           String,
  /// The paper's full title
  #[serde(default, deserialize_with = "null_as_default")]
  pub title:        String,
  /// Free-form author string as returned by the search
  #[serde(default, deserialize_with = "null_as_default")]
  pub authors:      String,
  /// Short summary of the paper
  #[serde(default, deserialize_with = "null_as_default")]
  pub summary:      String,
  /// Where the paper can be read
  #[serde(default, deserialize_with = "null_as_default")]
  pub url:          String,
  /// User or search supplied tags
  #[serde(default, deserialize_with = "null_as_default")]
  pub tags:         Vec<String>,
  /// When the record was saved
  #[serde(
    default = "Utc::now",
    serialize_with = "chrono::serde::ts_milliseconds::serialize",
    deserialize_with = "millis_or_now"
  )]
  pub created_at:   DateTime<Utc>,
  /// Long-form markdown analysis ("deep dive")
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub analysis:     Option<String>,
  /// Formatted citation
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub citation:     Option<String>,
  /// Optional DOI reference, either bare (`10.1145/...`) or as a resolver URL
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub doi:          Option<String>,
  /// Outcome of checking the paper against a real source
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub verification: Option<Verification>,
}

/// Result of verifying that a paper exists at a real source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
  /// Whether a matching source was found
  #[serde(default, deserialize_with = "null_as_default")]
  pub is_verified: bool,
  /// Where the matching source lives
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub source_url:  Option<String>,
  /// Title of the source that matched
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub found_title: Option<String>,
}

impl Paper {
  /// Creates a paper with the given identifier and title, every other field left empty.
  ///
  /// # Examples
  ///
  /// ```
  /// use scholar::paper::Paper;
  ///
  /// let paper = Paper::new("p-1", "On Computable Numbers")
  ///   .with_authors("A. M. Turing")
  ///   .with_tags(["computability"]);
  /// assert_eq!(paper.display_authors(), "A. M. Turing");
  /// ```
  pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
    Self {
      id:           id.into(),
      title:        title.into(),
      authors:      String::new(),
      summary:      String::new(),
      url:          String::new(),
      tags:         Vec::new(),
      created_at:   Utc::now(),
      analysis:     None,
      citation:     None,
      doi:          None,
      verification: None,
    }
  }

  /// Sets the author string.
  pub fn with_authors(mut self, authors: impl Into<String>) -> Self {
    self.authors = authors.into();
    self
  }

  /// Sets the summary.
  pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
    self.summary = summary.into();
    self
  }

  /// Sets the source URL.
  pub fn with_url(mut self, url: impl Into<String>) -> Self {
    self.url = url.into();
    self
  }

  /// Replaces the tag list.
  pub fn with_tags<I, S>(mut self, tags: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>, {
    self.tags = tags.into_iter().map(Into::into).collect();
    self
  }

  /// Attaches a long-form analysis.
  pub fn with_analysis(mut self, analysis: impl Into<String>) -> Self {
    self.analysis = Some(analysis.into());
    self
  }

  /// Attaches a formatted citation.
  pub fn with_citation(mut self, citation: impl Into<String>) -> Self {
    self.citation = Some(citation.into());
    self
  }

  /// Attaches a DOI.
  pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
    self.doi = Some(doi.into());
    self
  }

  /// Attaches a verification outcome.
  pub fn with_verification(mut self, verification: Verification) -> Self {
    self.verification = Some(verification);
    self
  }

  /// Sets the creation timestamp.
  pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
    self.created_at = created_at;
    self
  }

  /// Title to draw, falling back to [`UNTITLED`].
  pub fn display_title(&self) -> &str { non_blank(&self.title).unwrap_or(UNTITLED) }

  /// Author string to draw, falling back to [`UNKNOWN_AUTHORS`].
  pub fn display_authors(&self) -> &str { non_blank(&self.authors).unwrap_or(UNKNOWN_AUTHORS) }

  /// Summary to draw, falling back to [`NO_SUMMARY`].
  pub fn display_summary(&self) -> &str { non_blank(&self.summary).unwrap_or(NO_SUMMARY) }

  /// Citation to draw inside the citation box, falling back to [`NO_CITATION`].
  pub fn citation_text(&self) -> &str {
    self.citation.as_deref().and_then(non_blank).unwrap_or(NO_CITATION)
  }

  /// The analysis text, if there is any non-blank analysis to render.
  pub fn analysis_text(&self) -> Option<&str> { self.analysis.as_deref().and_then(non_blank) }

  /// The DOI, if present and non-blank.
  pub fn doi(&self) -> Option<&str> { self.doi.as_deref().and_then(non_blank) }

  /// Whether a verification found a matching source.
  pub fn is_verified(&self) -> bool {
    self.verification.as_ref().is_some_and(|verification| verification.is_verified)
  }

  /// The verified source link, only when the paper is verified and the link is known.
  pub fn verified_source(&self) -> Option<&str> {
    self
      .verification
      .as_ref()
      .filter(|verification| verification.is_verified)
      .and_then(|verification| verification.source_url.as_deref())
      .and_then(non_blank)
  }

  /// Whether the paper section carries a citation box.
  ///
  /// The box is drawn for an existing citation, and also for a verified paper without one,
  /// in which case it holds [`NO_CITATION`].
  pub fn has_citation_box(&self) -> bool {
    self.citation.as_deref().and_then(non_blank).is_some() || self.is_verified()
  }

  /// Whether `query` appears (case-insensitively) in the title, authors or tags.
  pub fn matches(&self, query: &str) -> bool {
    let query = query.to_lowercase();
    self.title.to_lowercase().contains(&query)
      || self.authors.to_lowercase().contains(&query)
      || self.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
  }
}

/// `Some(text)` unless `text` is empty or only whitespace.
fn non_blank(text: &str) -> Option<&str> {
  if text.trim().is_empty() {
    None
  } else {
    Some(text)
  }
}

/// Reads an optional value, treating an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
  D: serde::Deserializer<'de>,
  T: Default + Deserialize<'de>, {
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads a millisecond timestamp, falling back to the current time for `null`.
fn millis_or_now<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where D: serde::Deserializer<'de> {
  match Option::<i64>::deserialize(deserializer)? {
    Some(millis) => DateTime::from_timestamp_millis(millis)
      .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {millis}"))),
    None => Ok(Utc::now()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_placeholders_for_missing_fields() {
    let paper = Paper::new("p-1", "   ");
    assert_eq!(paper.display_title(), UNTITLED);
    assert_eq!(paper.display_authors(), UNKNOWN_AUTHORS);
    assert_eq!(paper.display_summary(), NO_SUMMARY);
    assert_eq!(paper.citation_text(), NO_CITATION);
    assert!(paper.analysis_text().is_none());
    assert!(!paper.has_citation_box());
  }

  #[test]
  fn test_verification_alone_triggers_citation_box() {
    let paper = Paper::new("p-1", "Title").with_verification(Verification {
      is_verified: true,
      source_url:  Some("https://example.org/paper".into()),
      found_title: None,
    });
    assert!(paper.has_citation_box());
    assert_eq!(paper.citation_text(), NO_CITATION);
    assert_eq!(paper.verified_source(), Some("https://example.org/paper"));
  }

  #[test]
  fn test_unverified_source_is_hidden() {
    let paper = Paper::new("p-1", "Title").with_verification(Verification {
      is_verified: false,
      source_url:  Some("https://example.org/paper".into()),
      found_title: None,
    });
    assert!(!paper.is_verified());
    assert!(!paper.has_citation_box());
    assert!(paper.verified_source().is_none());
  }

  #[test]
  fn test_json_defaults() {
    let paper: Paper = serde_json::from_str(r#"{ "id": "only-id" }"#).unwrap();
    assert_eq!(paper.id, "only-id");
    assert!(paper.tags.is_empty());
    assert!(paper.verification.is_none());

    let paper: Paper =
      serde_json::from_str(r#"{ "id": "x", "createdAt": 0, "verification": {} }"#).unwrap();
    assert_eq!(paper.created_at.timestamp_millis(), 0);
    assert!(!paper.is_verified());
  }

  #[test]
  fn test_json_nulls_get_placeholders() {
    let paper: Paper = serde_json::from_str(
      r#"{ "id": "x", "title": null, "authors": null, "summary": null, "url": null,
           "tags": null, "createdAt": null, "citation": null,
           "verification": { "isVerified": null, "sourceUrl": null } }"#,
    )
    .unwrap();
    assert_eq!(paper.display_title(), UNTITLED);
    assert_eq!(paper.display_authors(), UNKNOWN_AUTHORS);
    assert_eq!(paper.display_summary(), NO_SUMMARY);
    assert_eq!(paper.citation_text(), NO_CITATION);
    assert!(paper.url.is_empty());
    assert!(paper.tags.is_empty());
    assert!(!paper.is_verified());
  }

  #[test]
  fn test_json_timestamp_round_trip() {
    let paper: Paper = serde_json::from_str(r#"{ "id": "x", "createdAt": 1700000000000 }"#).unwrap();
    let json = serde_json::to_string(&paper).unwrap();
    assert!(json.contains("\"createdAt\":1700000000000"));
  }

  #[test]
  fn test_json_uses_camel_case() {
    let paper = Paper::new("p-1", "Title").with_verification(Verification {
      is_verified: true,
      source_url:  None,
      found_title: Some("Found".into()),
    });
    let json = serde_json::to_string(&paper).unwrap();
    assert!(json.contains("\"createdAt\""));
    assert!(json.contains("\"isVerified\":true"));
    assert!(json.contains("\"foundTitle\":\"Found\""));
    assert!(!json.contains("analysis"));
  }

  #[test]
  fn test_matches() {
    let paper =
      Paper::new("p-1", "Deep Residual Learning").with_authors("He et al.").with_tags(["Vision"]);
    assert!(paper.matches("residual"));
    assert!(paper.matches("HE ET"));
    assert!(paper.matches("vision"));
    assert!(!paper.matches("language"));
  }
}
