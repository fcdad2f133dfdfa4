//! In-memory `.docx` templates for tests.

use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub enum FixtureBlock<'a> {
    /// Paragraph with a style id and text.
    Para(&'a str, &'a str),
    /// Single-cell table.
    Table(&'a str),
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/></w:style>
<w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/></w:style>
<w:style w:type="paragraph" w:styleId="Ttulo1"><w:name w:val="Título 1"/><w:basedOn w:val="Normal"/></w:style>
<w:style w:type="paragraph" w:styleId="ListParagraph"><w:name w:val="List Paragraph"/></w:style>
</w:styles>"#;

pub fn document_xml(blocks: &[FixtureBlock]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    );
    for block in blocks {
        match block {
            FixtureBlock::Para(style, text) => {
                xml.push_str("<w:p>");
                if !style.is_empty() {
                    xml.push_str(&format!(r#"<w:pPr><w:pStyle w:val="{style}"/></w:pPr>"#));
                }
                if !text.is_empty() {
                    xml.push_str(&format!("<w:r><w:t>{}</w:t></w:r>", escape(*text)));
                }
                xml.push_str("</w:p>");
            }
            FixtureBlock::Table(text) => xml.push_str(&format!(
                "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
                escape(*text)
            )),
        }
    }
    xml.push_str(r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/></w:sectPr></w:body></w:document>"#);
    xml
}

/// Builds a minimal but complete `.docx` with the given body blocks.
pub fn template(blocks: &[FixtureBlock]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opts = SimpleFileOptions::default();
    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS.to_string()),
        ("word/document.xml", document_xml(blocks)),
        ("word/styles.xml", STYLES.to_string()),
    ];
    for (name, content) in parts {
        zip.start_file(name, opts).expect("start fixture entry");
        zip.write_all(content.as_bytes()).expect("write fixture entry");
    }
    zip.finish().expect("finish fixture zip").into_inner()
}

/// The review template shape used across tests.
pub fn review_template() -> Vec<u8> {
    template(&[
        FixtureBlock::Para("Title", "Performance Review"),
        FixtureBlock::Para("Normal", "Nombre: {{NOMBRE}}"),
        FixtureBlock::Para("Normal", "Periodo evaluado: {{PERIODO}}"),
        FixtureBlock::Para("Heading1", "Autoevaluación"),
        FixtureBlock::Para("Normal", "Texto de ejemplo de autoevaluación"),
        FixtureBlock::Para("Heading1", "Feedback recibido"),
        FixtureBlock::Para("Heading2", "Evaluador de ejemplo"),
        FixtureBlock::Table("tabla de ejemplo"),
        FixtureBlock::Para("Normal", "Respuesta de ejemplo"),
        FixtureBlock::Para("Heading1", "Resumen"),
        FixtureBlock::Para("Normal", "Resumen de ejemplo"),
        FixtureBlock::Para("Heading1", "Próximos pasos"),
        FixtureBlock::Para("Normal", "Se mantiene"),
    ])
}
