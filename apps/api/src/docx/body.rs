//! Splits `word/document.xml` into the markup before the body's children, the
//! body-level blocks, and the trailing markup (final `w:sectPr` and closing tags).

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::block::{Block, BlockKind};
use super::styles::{attribute, StyleCatalog};
use super::DocxError;

#[derive(Debug, Clone)]
pub(crate) struct Body {
    pub head: String,
    pub blocks: Vec<Block>,
    pub tail: String,
}

/// Per-child scan state while walking one body-level element.
struct ChildScan {
    start: usize,
    kind: BlockKind,
    is_sect_pr: bool,
    style_id: Option<String>,
    properties_start: Option<usize>,
    properties: Option<(usize, usize)>,
    in_text: bool,
    text: String,
}

impl ChildScan {
    fn new(start: usize, e: &BytesStart) -> Self {
        let name = e.local_name();
        let kind = match name.as_ref() {
            b"p" => BlockKind::Paragraph,
            b"tbl" => BlockKind::Table,
            _ => BlockKind::Other,
        };
        Self {
            start,
            kind,
            is_sect_pr: name.as_ref() == b"sectPr",
            style_id: None,
            properties_start: None,
            properties: None,
            in_text: false,
            text: String::new(),
        }
    }
}

pub(crate) fn parse_body(xml: &str, styles: &StyleCatalog) -> Result<Body, DocxError> {
    let mut reader = Reader::from_str(xml);

    let mut depth = 0usize;
    let mut body_start: Option<usize> = None;
    let mut body_end: Option<usize> = None;
    let mut children: Vec<(ChildScan, usize)> = Vec::new();
    let mut current: Option<ChildScan> = None;

    loop {
        let event = reader.read_event()?;
        let end = reader.buffer_position();
        let start = tag_start(xml, end);
        match event {
            Event::Start(e) => {
                depth += 1;
                let in_body = body_start.is_some() && body_end.is_none();
                if depth == 2 && e.local_name().as_ref() == b"body" {
                    body_start = Some(end);
                } else if depth == 3 && in_body {
                    current = Some(ChildScan::new(start, &e));
                } else if let Some(scan) = current.as_mut() {
                    match e.local_name().as_ref() {
                        b"pPr" if depth == 4 => scan.properties_start = Some(start),
                        b"t" => scan.in_text = true,
                        _ => {}
                    }
                }
            }
            Event::Empty(e) => {
                let in_body = body_start.is_some() && body_end.is_none();
                if depth == 2 && in_body {
                    let scan = ChildScan::new(start, &e);
                    children.push((scan, end));
                } else if let Some(scan) = current.as_mut() {
                    match e.local_name().as_ref() {
                        b"pStyle" if depth == 4 => scan.style_id = attribute(&e, b"val"),
                        b"pPr" if depth == 3 => scan.properties = Some((start, end)),
                        b"tab"
                            if scan.kind == BlockKind::Paragraph
                                && scan.properties_start.is_none() =>
                        {
                            scan.text.push('\t')
                        }
                        _ => {}
                    }
                }
            }
            Event::Text(t) => {
                if let Some(scan) = current.as_mut() {
                    if scan.in_text && scan.kind == BlockKind::Paragraph {
                        scan.text.push_str(&t.unescape()?);
                    }
                }
            }
            Event::End(e) => {
                let in_body = body_start.is_some() && body_end.is_none();
                if depth == 3 && in_body {
                    if let Some(scan) = current.take() {
                        children.push((scan, end));
                    }
                } else if depth == 2 && in_body && e.local_name().as_ref() == b"body" {
                    body_end = Some(start);
                } else if let Some(scan) = current.as_mut() {
                    match e.local_name().as_ref() {
                        b"pPr" if depth == 4 => {
                            if let Some(start) = scan.properties_start.take() {
                                scan.properties = Some((start, end));
                            }
                        }
                        b"t" => scan.in_text = false,
                        _ => {}
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let body_start = match (body_start, body_end) {
        (Some(start), Some(_)) => start,
        _ => return Err(DocxError::MalformedBody("missing <w:body> element".to_string())),
    };

    // The body's own sectPr must stay last, so it travels with the tail.
    if children.last().is_some_and(|(scan, _)| scan.is_sect_pr) {
        children.pop();
    }

    // Markup between two children (whitespace, comments) belongs to the block
    // that follows it; whatever trails the last block belongs to the tail.
    let mut segment_start = body_start;
    let mut blocks = Vec::with_capacity(children.len());
    for (scan, end) in children {
        let style_name = scan
            .style_id
            .as_deref()
            .and_then(|id| styles.name_of(id))
            .map(str::to_string);
        let properties = scan
            .properties
            .map(|(start, end)| xml[start..end].to_string());
        blocks.push(Block::from_source(
            scan.kind,
            xml[segment_start..end].to_string(),
            properties,
            scan.style_id,
            style_name,
            scan.text,
        ));
        segment_start = end;
    }

    Ok(Body {
        head: xml[..body_start].to_string(),
        blocks,
        tail: xml[segment_start..].to_string(),
    })
}

/// Offset of the `<` opening the tag that ends at `end`. Attribute values
/// cannot contain a literal `<`, so the last one before `end` is the tag's own.
fn tag_start(xml: &str, end: usize) -> usize {
    xml[..end].rfind('<').unwrap_or(0)
}

impl Body {
    pub(crate) fn to_xml(&self) -> String {
        let mut out = String::with_capacity(self.head.len() + self.tail.len() * 2);
        out.push_str(&self.head);
        for block in &self.blocks {
            block.write_xml(&mut out);
        }
        out.push_str(&self.tail);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
        r#"<w:body>"#,
        r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Auto</w:t></w:r><w:r><w:t xml:space="preserve">evaluación</w:t></w:r></w:p>"#,
        r#"<w:p/>"#,
        r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>celda</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
        r#"<w:p><w:r><w:t>A &amp; B</w:t><w:tab/><w:t>C</w:t></w:r></w:p>"#,
        r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr>"#,
        r#"</w:body></w:document>"#
    );

    fn catalog() -> StyleCatalog {
        StyleCatalog::parse(
            r#"<w:styles xmlns:w="x"><w:style w:styleId="Heading1"><w:name w:val="heading 1"/></w:style></w:styles>"#,
        )
        .unwrap()
    }

    #[test]
    fn test_splits_body_children() {
        let body = parse_body(DOC, &catalog()).unwrap();
        let kinds: Vec<BlockKind> = body.blocks.iter().map(|b| b.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Paragraph,
                BlockKind::Paragraph,
                BlockKind::Table,
                BlockKind::Paragraph
            ]
        );
        assert!(body.tail.starts_with("<w:sectPr>"));
        assert!(body.tail.ends_with("</w:body></w:document>"));
        assert!(body.head.ends_with("<w:body>"));
    }

    #[test]
    fn test_collects_paragraph_text_and_style() {
        let body = parse_body(DOC, &catalog()).unwrap();
        assert_eq!(body.blocks[0].text(), "Autoevaluación");
        assert_eq!(body.blocks[0].style_id(), Some("Heading1"));
        assert_eq!(body.blocks[0].style_name(), Some("heading 1"));
        assert_eq!(body.blocks[1].text(), "");
        assert_eq!(body.blocks[2].text(), "");
        assert_eq!(body.blocks[3].text(), "A & B\tC");
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let body = parse_body(DOC, &catalog()).unwrap();
        assert_eq!(body.to_xml(), DOC);
    }

    #[test]
    fn test_round_trip_keeps_indentation_and_comments() {
        let doc = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<w:document xmlns:w=\"x\">\n",
            "  <w:body>\n",
            "    <w:p>\n      <w:r><w:t>uno</w:t></w:r>\n    </w:p>\n",
            "    <!-- medio -->\n",
            "    <w:p><w:r><w:t>dos</w:t></w:r></w:p>\n",
            "    <w:sectPr/>\n",
            "  </w:body>\n",
            "</w:document>\n"
        );
        let body = parse_body(doc, &catalog()).unwrap();

        assert_eq!(body.blocks.len(), 2);
        assert_eq!(body.blocks[1].text(), "dos");
        assert!(body.tail.starts_with("\n    <w:sectPr/>"));
        assert_eq!(body.to_xml(), doc);
    }

    #[test]
    fn test_removing_a_block_takes_its_leading_whitespace() {
        let doc = "<w:document xmlns:w=\"x\"><w:body>\n  <w:p/>\n  <w:p/>\n</w:body></w:document>";
        let mut body = parse_body(doc, &catalog()).unwrap();
        body.blocks.remove(1);
        assert_eq!(
            body.to_xml(),
            "<w:document xmlns:w=\"x\"><w:body>\n  <w:p/>\n</w:body></w:document>"
        );
    }

    #[test]
    fn test_missing_body_is_an_error() {
        let err = parse_body(r#"<w:document xmlns:w="x"></w:document>"#, &catalog());
        assert!(matches!(err, Err(DocxError::MalformedBody(_))));
    }
}
