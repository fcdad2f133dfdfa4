// Word document model: loads a .docx template, exposes its body as an ordered
// list of blocks that can be edited in place, and writes the package back.
// Every part other than word/document.xml is carried through untouched.

pub mod block;
mod body;
pub mod package;
pub mod styles;

#[cfg(test)]
pub mod fixtures;

use std::ops::Range;
use std::path::Path;

use thiserror::Error;

pub use block::{Block, Run};
pub use package::DocxPackage;
pub use styles::StyleCatalog;

use body::{parse_body, Body};
use package::{DOCUMENT_PART, STYLES_PART};

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid DOCX archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Missing part '{0}' in DOCX package")]
    MissingPart(String),

    #[error("Part '{0}' is not valid UTF-8")]
    NotUtf8(String),

    #[error("Malformed document body: {0}")]
    MalformedBody(String),
}

/// An editable Word document.
#[derive(Debug, Clone)]
pub struct Document {
    package: DocxPackage,
    styles: StyleCatalog,
    body: Body,
}

impl Document {
    /// Loads a document from disk. The file itself is never written to.
    pub fn open(path: &Path) -> Result<Self, DocxError> {
        Self::from_package(DocxPackage::open(path)?)
    }

    #[cfg(test)]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocxError> {
        Self::from_package(DocxPackage::from_bytes(bytes)?)
    }

    fn from_package(package: DocxPackage) -> Result<Self, DocxError> {
        let styles = match package.part_text(STYLES_PART)? {
            Some(xml) => StyleCatalog::parse(&xml)?,
            None => StyleCatalog::default(),
        };
        let document_xml = package
            .part_text(DOCUMENT_PART)?
            .ok_or_else(|| DocxError::MissingPart(DOCUMENT_PART.to_string()))?;
        let body = parse_body(&document_xml, &styles)?;

        Ok(Self {
            package,
            styles,
            body,
        })
    }

    pub fn blocks(&self) -> &[Block] {
        &self.body.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.body.blocks
    }

    /// Replaces the blocks in `range` with `blocks`, in order. Style names on the
    /// new blocks are resolved to the template's style ids.
    pub fn splice(&mut self, range: Range<usize>, blocks: Vec<Block>) {
        let styles = &self.styles;
        let resolved: Vec<Block> = blocks
            .into_iter()
            .map(|mut block| {
                block.resolve_style(|name| styles.resolve_id(name));
                block
            })
            .collect();
        self.body.blocks.splice(range, resolved);
    }

    /// The current `word/document.xml` markup.
    pub fn document_xml(&self) -> String {
        self.body.to_xml()
    }

    /// Serializes the whole package with the edited body.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DocxError> {
        let mut package = self.package.clone();
        package.set_part(DOCUMENT_PART, self.document_xml().into_bytes());
        package.to_bytes()
    }
}
