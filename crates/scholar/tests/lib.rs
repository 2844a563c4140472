use std::{error::Error, path::Path};

use chrono::{DateTime, Utc};
use lopdf::{Dictionary, Document as PdfDocument, Object};
use scholar::{
  export::{export_journal, export_paper},
  layout::{layout_journal, LinkTarget},
  paper::{Verification, NO_CITATION},
  prelude::*,
};
use tempfile::tempdir;
use tracing_test::traced_test;

mod workflows;

pub type TestResult<T> = Result<T, Box<dyn Error>>;

/// Front matter with a fixed date so layouts are reproducible.
pub fn fixed_options() -> JournalOptions {
  JournalOptions {
    title:        "Research Journal".to_string(),
    generated_at: DateTime::parse_from_rfc3339("2024-11-02T09:30:00Z").unwrap().with_timezone(&Utc),
  }
}

/// A paper with the fields a saved search result usually carries.
pub fn sample_paper(id: &str, title: &str) -> Paper {
  Paper::new(id, title)
    .with_authors("Grace Hopper, Alan Turing")
    .with_summary("A concise summary of the contribution.")
    .with_url(format!("https://arxiv.org/abs/{id}"))
    .with_tags(["ml", "systems"])
}

/// Markdown analysis of `lines` numbered paragraphs, with a header and a code block.
pub fn analysis_of(lines: usize) -> String {
  let mut text = String::from("## Overview\n**Key idea:** scale.\n```python\nprint('hi')\n```\n");
  for i in 0..lines {
    text.push_str(&format!("Observation {i} about the experimental results.\n"));
  }
  text
}

/// Loads a written PDF.
pub fn load_pdf(path: &Path) -> TestResult<PdfDocument> {
  Ok(PdfDocument::load_mem(&std::fs::read(path)?)?)
}

/// Link annotation dictionaries of the one-based page `number`.
pub fn link_annotations(pdf: &PdfDocument, number: u32) -> TestResult<Vec<Dictionary>> {
  let page = pdf.get_dictionary(pdf.get_pages()[&number])?;
  let Ok(Object::Array(items)) = page.get(b"Annots") else {
    return Ok(Vec::new());
  };
  let mut annotations = Vec::new();
  for item in items {
    annotations.push(pdf.get_dictionary(item.as_reference()?)?.clone());
  }
  Ok(annotations)
}
