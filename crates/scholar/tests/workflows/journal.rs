use super::*;

#[traced_test]
#[tokio::test]
async fn test_three_paper_journal() -> TestResult<()> {
  let papers = vec![
    sample_paper("2401.00001", "Sparse Mixtures of Experts"),
    sample_paper("2401.00002", "Scaling Laws Revisited").with_analysis(analysis_of(100)),
    sample_paper("2401.00003", "Retrieval Augmented Generation").with_doi("10.5555/rag.2024"),
  ];

  let journal = layout_journal(&papers, LayoutConfig::default(), &fixed_options(), None).await?;
  let pages: Vec<usize> = journal.contents.iter().map(|entry| entry.page).collect();
  assert_eq!(pages[0], 3);
  assert_eq!(pages[1], 4);
  assert!(pages[2] >= pages[1] + 3, "analysis should span three pages: {pages:?}");

  let dir = tempdir()?;
  let path = export_journal(
    &papers,
    dir.path(),
    LayoutConfig::default(),
    &fixed_options(),
    None,
  )
  .await?;
  let pdf = load_pdf(&path)?;
  assert!(pdf.get_pages().len() >= 1 + 1 + 5);
  assert_eq!(pdf.get_pages().len(), journal.document.page_count());

  // Contents links resolve to the recorded pages
  let page_ids = pdf.get_pages();
  let annotations = link_annotations(&pdf, 2)?;
  let destinations: Vec<_> = annotations
    .iter()
    .filter_map(|annotation| annotation.get(b"Dest").ok())
    .map(|dest| dest.as_array().unwrap()[0].as_reference().unwrap())
    .collect();
  let expected: Vec<_> = pages.iter().map(|page| page_ids[&(*page as u32)]).collect();
  assert_eq!(destinations, expected);

  // Only the third entry carries a DOI link
  let uris: Vec<Vec<u8>> = annotations
    .iter()
    .filter_map(|annotation| annotation.get(b"A").ok())
    .map(|action| action.as_dict().unwrap().get(b"URI").unwrap().as_str().unwrap().to_vec())
    .collect();
  assert_eq!(uris, [b"https://doi.org/10.5555/rag.2024".to_vec()]);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_contents_pages_match_titles() -> TestResult<()> {
  let papers: Vec<Paper> = (0..5)
    .map(|i| {
      let paper = sample_paper(&format!("id-{i}"), &format!("Study {i}"));
      if i % 2 == 1 {
        paper.with_analysis(analysis_of(60 * i))
      } else {
        paper
      }
    })
    .collect();

  let journal = layout_journal(&papers, LayoutConfig::default(), &fixed_options(), None).await?;
  let mut previous = 2;
  for entry in &journal.contents {
    assert!(entry.page > previous);
    let page = &journal.document.pages()[entry.page - 1];
    assert!(page.contains_text(&entry.title));
    previous = entry.page;
  }
  assert_eq!(journal.document.pages()[1].links.len(), 5);
  assert!(journal.document.pages()[1]
    .links
    .iter()
    .zip(&journal.contents)
    .all(|(link, entry)| link.target == LinkTarget::Page(entry.page - 1)));
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_progress_and_title_page() -> TestResult<()> {
  let papers = vec![sample_paper("a", "Alpha"), sample_paper("b", "Beta")];
  let mut calls = Vec::new();
  let mut report = |current: usize, total: usize| calls.push((current, total));

  let journal =
    layout_journal(&papers, LayoutConfig::default(), &fixed_options(), Some(&mut report)).await?;
  assert_eq!(calls, [(1, 2), (2, 2)]);

  let title_page = &journal.document.pages()[0];
  assert!(title_page.contains_text("Edition: November 2024"));
  assert!(title_page.contains_text("Generated on November 2, 2024"));
  assert!(title_page.contains_text("2 papers"));
  Ok(())
}
