//! A flat, file-backed list of saved papers.
//!
//! The library is a single JSON array of [`Paper`] records. It is read completely on
//! [`Library::open`] and written back completely on [`Library::save`], keeping papers in
//! the order they were added.

use super::*;

/// Saved papers together with the file they are stored in.
#[derive(Debug, Clone)]
pub struct Library {
  /// Backing JSON file
  path:   PathBuf,
  /// Papers in insertion order
  papers: Vec<Paper>,
}

impl Library {
  /// Opens the library stored at `path`.
  ///
  /// A missing file is an empty library; it is created on the first [`Library::save`].
  ///
  /// # Examples
  ///
  /// ```no_run
  /// # use scholar::library::Library;
  /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
  /// let library = Library::open(Library::default_path()).await?;
  /// for paper in library.papers() {
  ///   println!("{}: {}", paper.id, paper.display_title());
  /// }
  /// # Ok(())
  /// # }
  /// ```
  #[instrument(skip(path), fields(path = %path.as_ref().display()), level = "debug")]
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    if !tokio::fs::try_exists(&path).await? {
      debug!("No library file yet, starting empty");
      return Ok(Self { path, papers: Vec::new() });
    }
    let content = tokio::fs::read_to_string(&path).await?;
    let papers: Vec<Paper> =
      if content.trim().is_empty() { Vec::new() } else { serde_json::from_str(&content)? };
    debug!("Loaded {} papers", papers.len());
    Ok(Self { path, papers })
  }

  /// Returns the default location of the library file.
  ///
  /// The path is constructed as follows:
  /// - On Unix: `~/.local/share/scholar/library.json`
  /// - On macOS: `~/Library/Application Support/scholar/library.json`
  /// - On Windows: `%APPDATA%\scholar\library.json`
  /// - Fallback: `./scholar/library.json` in the current directory
  pub fn default_path() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("scholar").join("library.json")
  }

  /// Location of the backing file.
  pub fn path(&self) -> &Path { &self.path }

  /// All saved papers in insertion order.
  pub fn papers(&self) -> &[Paper] { &self.papers }

  /// Writes the library back to its file, creating parent directories as needed.
  pub async fn save(&self) -> Result<()> {
    if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
      tokio::fs::create_dir_all(parent).await?;
    }
    let content = serde_json::to_string_pretty(&self.papers)?;
    tokio::fs::write(&self.path, content).await?;
    debug!("Saved {} papers to {}", self.papers.len(), self.path.display());
    Ok(())
  }

  /// Adds a paper to the end of the library.
  ///
  /// Fails with [`ScholarError::DuplicatePaper`] if a paper with the same id is saved already.
  pub fn add(&mut self, paper: Paper) -> Result<()> {
    if self.get(&paper.id).is_some() {
      return Err(ScholarError::DuplicatePaper(paper.display_title().to_string()));
    }
    trace!("Adding paper {}", paper.id);
    self.papers.push(paper);
    Ok(())
  }

  /// Removes and returns the paper with the given id.
  pub fn remove(&mut self, id: &str) -> Result<Paper> {
    let index = self
      .papers
      .iter()
      .position(|paper| paper.id == id)
      .ok_or_else(|| ScholarError::PaperNotFound(id.to_string()))?;
    Ok(self.papers.remove(index))
  }

  /// The paper with the given id, if saved.
  pub fn get(&self, id: &str) -> Option<&Paper> { self.papers.iter().find(|paper| paper.id == id) }

  /// Papers whose title, authors or tags contain `query`, ignoring case.
  pub fn search(&self, query: &str) -> Vec<&Paper> {
    self.papers.iter().filter(|paper| paper.matches(query)).collect()
  }
}

/// Reads paper records from a JSON file holding either one record or an array of them.
///
/// # Examples
///
/// ```no_run
/// # use scholar::library::load_records;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let papers = load_records("exported_search_results.json").await?;
/// println!("{} records", papers.len());
/// # Ok(())
/// # }
/// ```
pub async fn load_records(path: impl AsRef<Path>) -> Result<Vec<Paper>> {
  let content = tokio::fs::read_to_string(path.as_ref()).await?;
  parse_records(&content)
}

/// Parses either one paper record or an array of records.
pub fn parse_records(content: &str) -> Result<Vec<Paper>> {
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Records {
    Many(Vec<Paper>),
    One(Box<Paper>),
  }

  Ok(match serde_json::from_str(content)? {
    Records::Many(papers) => papers,
    Records::One(paper) => vec![*paper],
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn test_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let library = Library::open(dir.path().join("library.json")).await.unwrap();
    assert!(library.papers().is_empty());
  }

  #[traced_test]
  #[tokio::test]
  async fn test_save_and_reopen_keeps_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data").join("library.json");

    let mut library = Library::open(&path).await.unwrap();
    library.add(Paper::new("b", "Second Title")).unwrap();
    library.add(Paper::new("a", "First Title").with_tags(["nlp"])).unwrap();
    library.save().await.unwrap();

    let reopened = Library::open(&path).await.unwrap();
    let ids: Vec<&str> = reopened.papers().iter().map(|paper| paper.id.as_str()).collect();
    assert_eq!(ids, ["b", "a"]);
    assert_eq!(reopened.get("a").unwrap().tags, ["nlp"]);
  }

  #[test]
  fn test_duplicate_and_missing() {
    let mut library = Library { path: PathBuf::from("unused.json"), papers: Vec::new() };
    library.add(Paper::new("a", "Title")).unwrap();

    let duplicate = library.add(Paper::new("a", "Other"));
    assert!(matches!(duplicate, Err(ScholarError::DuplicatePaper(title)) if title == "Other"));
    assert!(matches!(library.remove("zzz"), Err(ScholarError::PaperNotFound(_))));
    assert_eq!(library.remove("a").unwrap().title, "Title");
    assert!(library.papers().is_empty());
  }

  #[test]
  fn test_search() {
    let mut library = Library { path: PathBuf::from("unused.json"), papers: Vec::new() };
    library.add(Paper::new("a", "Graph Neural Networks").with_tags(["graphs"])).unwrap();
    library.add(Paper::new("b", "Diffusion Models").with_authors("Ho et al.")).unwrap();
    assert_eq!(library.search("GRAPH").len(), 1);
    assert_eq!(library.search("ho et").len(), 1);
    assert!(library.search("quantum").is_empty());
  }

  #[test]
  fn test_parse_records() {
    assert_eq!(parse_records(r#"{ "id": "one" }"#).unwrap().len(), 1);
    assert_eq!(parse_records(r#"[{ "id": "a" }, { "id": "b" }]"#).unwrap().len(), 2);
    assert!(matches!(parse_records(r#"{ "title": "no id" }"#), Err(ScholarError::Json(_))));
  }

  #[test]
  fn test_parse_records_with_nulls() {
    let papers =
      parse_records(r#"[{ "id": "a", "summary": null, "tags": null }, { "id": "b", "title": "Two" }]"#)
        .unwrap();
    assert_eq!(papers.len(), 2);
    assert_eq!(papers[0].display_summary(), crate::paper::NO_SUMMARY);
    assert_eq!(papers[1].display_title(), "Two");
  }

  #[traced_test]
  #[tokio::test]
  async fn test_corrupt_library_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("library.json");
    std::fs::write(&path, "not json").unwrap();
    assert!(matches!(Library::open(&path).await, Err(ScholarError::Json(_))));
  }
}
