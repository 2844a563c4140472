//! Serialization of laid out pages into PDF bytes.
//!
//! Every [`Page`](crate::layout::Page) becomes one PDF page with a single content stream.
//! Text uses the base-14 fonts with `WinAnsiEncoding`. Characters with no WinAnsi code
//! point are written as `?`. Link regions become `/Link` annotations: external targets use
//! a `URI` action and internal ones a `/Fit` destination on the referenced page.
//!
//! Layout coordinates (millimetres, origin top-left, y downwards) are converted to PDF user
//! space (points, origin bottom-left, y upwards) here and nowhere else.

use lopdf::{
  content::{Content, Operation},
  dictionary, Dictionary, Object, ObjectId, Stream, StringFormat,
};

use super::*;
use crate::layout::{font::MM_PER_PT, Document, DrawOp, Font, Link, LinkTarget, Rect, Rgb};

/// Name written as the producer of every document.
const PRODUCER: &str = concat!("scholar ", env!("CARGO_PKG_VERSION"));

/// Serializes `document` into a complete PDF file.
///
/// # Examples
///
/// ```
/// use scholar::{config::LayoutConfig, layout::layout_paper, paper::Paper, pdf::to_pdf_bytes};
///
/// let doc = layout_paper(&Paper::new("p-1", "A Title"), LayoutConfig::default());
/// let bytes = to_pdf_bytes(&doc, "A Title").unwrap();
/// assert!(bytes.starts_with(b"%PDF-1.5"));
/// ```
#[instrument(skip(document), fields(pages = document.page_count()), level = "debug")]
pub fn to_pdf_bytes(document: &Document, title: &str) -> Result<Vec<u8>> {
  let config = *document.config();
  let mut pdf = lopdf::Document::with_version("1.5");

  let info_id = pdf.add_object(dictionary! {
    "Title" => Object::String(encode_text(title), StringFormat::Literal),
    "Producer" => Object::string_literal(PRODUCER),
  });
  pdf.trailer.set("Info", Object::Reference(info_id));

  let mut fonts = Dictionary::new();
  for font in Font::ALL {
    let font_id = pdf.add_object(dictionary! {
      "Type" => "Font",
      "Subtype" => "Type1",
      "BaseFont" => font.base_name(),
      "Encoding" => "WinAnsiEncoding",
    });
    fonts.set(font.resource_name(), Object::Reference(font_id));
  }
  let resources_id = pdf.add_object(dictionary! { "Font" => fonts });

  // Ids are reserved up front so links can point at pages that are written later
  let pages_id = pdf.new_object_id();
  let page_ids: Vec<ObjectId> = document.pages().iter().map(|_| pdf.new_object_id()).collect();
  let page_size = Size { width: config.page_width, height: config.page_height };

  for (page, &page_id) in document.pages().iter().zip(&page_ids) {
    let operations: Vec<_> = page.ops.iter().flat_map(|op| draw_operations(op, page_size)).collect();
    let content = Content { operations };
    let content_id = pdf.add_object(Stream::new(dictionary! {}, content.encode()?));

    let mut annotations = Vec::with_capacity(page.links.len());
    for link in &page.links {
      match link_annotation(link, &page_ids, page_size) {
        Some(annotation) => annotations.push(Object::Reference(pdf.add_object(annotation))),
        None => warn!("Dropping link to missing page {:?}", link.target),
      }
    }

    let mut page_dict = dictionary! {
      "Type" => "Page",
      "Parent" => pages_id,
      "MediaBox" => vec![0.into(), 0.into(), points(page_size.width).into(), points(page_size.height).into()],
      "Contents" => content_id,
      "Resources" => resources_id,
    };
    if !annotations.is_empty() {
      page_dict.set("Annots", annotations);
    }
    pdf.objects.insert(page_id, Object::Dictionary(page_dict));
  }

  let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
  pdf.objects.insert(
    pages_id,
    Object::Dictionary(dictionary! {
      "Type" => "Pages",
      "Kids" => kids,
      "Count" => page_ids.len() as i64,
    }),
  );

  let catalog_id = pdf.add_object(dictionary! {
    "Type" => "Catalog",
    "Pages" => pages_id,
  });
  pdf.trailer.set("Root", catalog_id);

  let mut bytes = Vec::new();
  pdf.save_to(&mut bytes)?;
  debug!("Serialized {} pages into {} bytes", page_ids.len(), bytes.len());
  Ok(bytes)
}

/// Encodes `text` as WinAnsi (Windows-1252) bytes.
///
/// # Examples
///
/// ```
/// use scholar::pdf::encode_text;
///
/// assert_eq!(encode_text("café – “ok”"), b"caf\xe9 \x96 \x93ok\x94");
/// assert_eq!(encode_text("→"), b"?");
/// ```
pub fn encode_text(text: &str) -> Vec<u8> { text.chars().map(|c| winansi(c).unwrap_or(b'?')).collect() }

/// WinAnsi code of `c`, if it has one.
fn winansi(c: char) -> Option<u8> {
  let code = match c as u32 {
    0x20..=0x7E | 0xA0..=0xFF => c as u8,
    0x20AC => 0x80,
    0x201A => 0x82,
    0x0192 => 0x83,
    0x201E => 0x84,
    0x2026 => 0x85,
    0x2020 => 0x86,
    0x2021 => 0x87,
    0x02C6 => 0x88,
    0x2030 => 0x89,
    0x0160 => 0x8A,
    0x2039 => 0x8B,
    0x0152 => 0x8C,
    0x017D => 0x8E,
    0x2018 => 0x91,
    0x2019 => 0x92,
    0x201C => 0x93,
    0x201D => 0x94,
    0x2022 => 0x95,
    0x2013 => 0x96,
    0x2014 => 0x97,
    0x02DC => 0x98,
    0x2122 => 0x99,
    0x0161 => 0x9A,
    0x203A => 0x9B,
    0x0153 => 0x9C,
    0x017E => 0x9E,
    0x0178 => 0x9F,
    _ => return None,
  };
  Some(code)
}

/// Page dimensions in millimetres.
#[derive(Debug, Clone, Copy)]
struct Size {
  /// Horizontal extent
  width:  f32,
  /// Vertical extent
  height: f32,
}

/// Millimetres to points.
fn points(mm: f32) -> f32 { mm / MM_PER_PT }

/// `[llx lly urx ury]` of a layout rectangle in PDF user space.
fn pdf_rect(area: Rect, page: Size) -> Vec<Object> {
  let left = points(area.x);
  let bottom = points(page.height - area.y - area.height);
  vec![
    left.into(),
    bottom.into(),
    (left + points(area.width)).into(),
    (bottom + points(area.height)).into(),
  ]
}

/// Non-stroking color operands.
fn fill_color(color: Rgb) -> Operation {
  let [r, g, b] = color.components();
  Operation::new("rg", vec![r.into(), g.into(), b.into()])
}

/// Content stream operations for one draw instruction.
fn draw_operations(op: &DrawOp, page: Size) -> Vec<Operation> {
  match op {
    DrawOp::Text { x, y, text, style } => vec![
      Operation::new("BT", vec![]),
      Operation::new("Tf", vec![Object::Name(style.font.resource_name().into_bytes()), style.size.into()]),
      fill_color(style.color),
      Operation::new("Td", vec![points(*x).into(), points(page.height - y).into()]),
      Operation::new("Tj", vec![Object::String(encode_text(text), StringFormat::Literal)]),
      Operation::new("ET", vec![]),
    ],
    DrawOp::Fill { area, color } => vec![
      Operation::new("q", vec![]),
      fill_color(*color),
      Operation::new("re", vec![
        points(area.x).into(),
        points(page.height - area.y - area.height).into(),
        points(area.width).into(),
        points(area.height).into(),
      ]),
      Operation::new("f", vec![]),
      Operation::new("Q", vec![]),
    ],
  }
}

/// The `/Link` annotation for `link`, or `None` when its page does not exist.
fn link_annotation(link: &Link, page_ids: &[ObjectId], page: Size) -> Option<Dictionary> {
  let mut annotation = dictionary! {
    "Type" => "Annot",
    "Subtype" => "Link",
    "Rect" => pdf_rect(link.area, page),
    "Border" => vec![0.into(), 0.into(), 0.into()],
  };
  match &link.target {
    LinkTarget::Uri(uri) => annotation.set(
      "A",
      dictionary! {
        "S" => "URI",
        "URI" => Object::string_literal(uri.as_str()),
      },
    ),
    LinkTarget::Page(index) => {
      let target = *page_ids.get(*index)?;
      annotation.set("Dest", vec![Object::Reference(target), "Fit".into()]);
    },
  }
  Some(annotation)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::layout::TextStyle;

  /// Link annotations of the page at `index` in a parsed PDF.
  fn annotations(pdf: &lopdf::Document, index: u32) -> Vec<Dictionary> {
    let page_id = pdf.get_pages()[&(index + 1)];
    let page = pdf.get_dictionary(page_id).unwrap();
    match page.get(b"Annots") {
      Ok(Object::Array(items)) => items
        .iter()
        .map(|item| pdf.get_dictionary(item.as_reference().unwrap()).unwrap().clone())
        .collect(),
      _ => Vec::new(),
    }
  }

  #[test]
  fn test_page_count_and_info() {
    let mut doc = Document::new(LayoutConfig::default());
    doc.text("first", 20.0, 20.0, TextStyle::BODY);
    doc.add_page();
    doc.add_page();
    doc.fill_rect(Rect::new(20.0, 20.0, 50.0, 10.0), Rgb::CODE_BACKGROUND);

    let bytes = to_pdf_bytes(&doc, "Three Pages").unwrap();
    let pdf = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(pdf.get_pages().len(), 3);

    let info = pdf.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let title = pdf.get_dictionary(info).unwrap().get(b"Title").unwrap().as_str().unwrap();
    assert_eq!(title, b"Three Pages");
  }

  #[test]
  fn test_text_is_in_content_stream() {
    let mut doc = Document::new(LayoutConfig::default());
    doc.text("Hello (PDF)", 20.0, 20.0, TextStyle::BODY_BOLD);
    let pdf = lopdf::Document::load_mem(&to_pdf_bytes(&doc, "t").unwrap()).unwrap();

    let page_id = pdf.get_pages()[&1];
    let content = Content::decode(&pdf.get_page_content(page_id).unwrap()).unwrap();
    let shown: Vec<&Object> = content
      .operations
      .iter()
      .filter(|op| op.operator == "Tj")
      .flat_map(|op| &op.operands)
      .collect();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].as_str().unwrap(), b"Hello (PDF)");

    let font = content.operations.iter().find(|op| op.operator == "Tf").unwrap();
    assert_eq!(font.operands[0].as_name().unwrap(), b"F2");
  }

  #[test]
  fn test_links_become_annotations() {
    let mut doc = Document::new(LayoutConfig::default());
    doc.add_page();
    doc.set_page(0).unwrap();
    doc.link_page(Rect::new(20.0, 30.0, 170.0, 7.0), 1);
    doc.link_uri(Rect::new(20.0, 40.0, 50.0, 5.0), "https://doi.org/10.1/x");
    doc.link_page(Rect::new(20.0, 50.0, 170.0, 7.0), 9);

    let pdf = lopdf::Document::load_mem(&to_pdf_bytes(&doc, "links").unwrap()).unwrap();
    let annotations = annotations(&pdf, 0);
    // the link to a page that does not exist is dropped
    assert_eq!(annotations.len(), 2);

    let dest = annotations[0].get(b"Dest").unwrap().as_array().unwrap();
    assert_eq!(dest[0].as_reference().unwrap(), pdf.get_pages()[&2]);

    let action = annotations[1].get(b"A").unwrap().as_dict().unwrap();
    assert_eq!(action.get(b"URI").unwrap().as_str().unwrap(), b"https://doi.org/10.1/x");
    assert!(self::annotations(&pdf, 1).is_empty());
  }

  #[test]
  fn test_coordinates_flip_to_bottom_left() {
    let page = Size { width: 210.0, height: 297.0 };
    let rect = pdf_rect(Rect::new(0.0, 0.0, 210.0, 297.0), page);
    let values: Vec<f32> = rect.iter().map(|value| value.as_float().unwrap()).collect();
    assert!((values[0]).abs() < 1e-3);
    assert!((values[1]).abs() < 1e-3);
    assert!((values[2] - 595.2756).abs() < 1e-2);
    assert!((values[3] - 841.8898).abs() < 1e-2);
  }

  #[test]
  fn test_encode_text() {
    assert_eq!(encode_text("plain"), b"plain");
    assert_eq!(encode_text("€…"), [0x80, 0x85]);
    assert_eq!(encode_text("日本"), b"??");
  }
}
