use super::*;

#[traced_test]
#[tokio::test]
async fn test_export_with_empty_tags() -> TestResult<()> {
  let dir = tempdir()?;
  let paper = sample_paper("p-1", "Untagged Work").with_tags(Vec::<String>::new());

  let path = export_paper(&paper, dir.path(), LayoutConfig::default()).await?;
  assert_eq!(path.file_name().unwrap(), "Untagged_Work_analysis.pdf");
  assert_eq!(load_pdf(&path)?.get_pages().len(), 1);

  let doc = scholar::layout::layout_paper(&paper, LayoutConfig::default());
  let tag_lines: Vec<&str> = doc.pages()[0]
    .texts()
    .map(|(text, _)| text)
    .filter(|text| text.starts_with("Tags:"))
    .collect();
  assert_eq!(tag_lines, ["Tags: "]);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_verified_paper_without_citation() -> TestResult<()> {
  let paper = sample_paper("p-2", "Verified Without Citation").with_verification(Verification {
    is_verified: true,
    source_url:  Some("https://www.semanticscholar.org/paper/abc".to_string()),
    found_title: None,
  });

  let doc = scholar::layout::layout_paper(&paper, LayoutConfig::default());
  let page = &doc.pages()[0];
  assert!(page.contains_text("CITATION"));
  assert!(page.contains_text(NO_CITATION));

  let dir = tempdir()?;
  let path = export_paper(&paper, dir.path(), LayoutConfig::default()).await?;
  let annotations = link_annotations(&load_pdf(&path)?, 1)?;
  // verified link in the box, source link and verified source link
  assert_eq!(annotations.len(), 3);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_long_analysis_flows_over_pages() -> TestResult<()> {
  let paper = sample_paper("p-3", "Long Read").with_analysis(analysis_of(200));
  let dir = tempdir()?;
  let path = export_paper(&paper, dir.path(), LayoutConfig::default()).await?;
  let pdf = load_pdf(&path)?;
  assert!(pdf.get_pages().len() >= 4);

  // The source link comes after the analysis, on the last page
  let last = pdf.get_pages().len() as u32;
  assert_eq!(link_annotations(&pdf, last)?.len(), 1);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_custom_page_size() -> TestResult<()> {
  let config = LayoutConfig::from_toml("page_width = 215.9\npage_height = 279.4")?;
  let dir = tempdir()?;
  let path = export_paper(&sample_paper("p-4", "Letter Size"), dir.path(), config).await?;
  let pdf = load_pdf(&path)?;
  let page = pdf.get_dictionary(pdf.get_pages()[&1])?;
  let media_box = page.get(b"MediaBox")?.as_array()?;
  assert!((media_box[2].as_float()? - 612.0).abs() < 0.1);
  assert!((media_box[3].as_float()? - 792.0).abs() < 0.1);
  Ok(())
}
