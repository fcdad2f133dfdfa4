use quick_xml::escape::escape;

/// What kind of body-level element a block is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Table,
    /// Anything else at body level (structured document tags, bookmarks, ...).
    Other,
}

/// A run of inline text with optional formatting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    /// Font size override in points.
    pub size_pt: Option<u16>,
    pub page_break: bool,
}

impl Run {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn page_break() -> Self {
        Self {
            page_break: true,
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn sized(mut self, size_pt: u16) -> Self {
        self.size_pt = Some(size_pt);
        self
    }

    fn write_xml(&self, out: &mut String) {
        out.push_str("<w:r>");
        if self.bold || self.size_pt.is_some() {
            out.push_str("<w:rPr>");
            if self.bold {
                out.push_str("<w:b/>");
            }
            if let Some(pt) = self.size_pt {
                // w:sz is measured in half-points
                let half_points = u32::from(pt) * 2;
                out.push_str(&format!(
                    "<w:sz w:val=\"{half_points}\"/><w:szCs w:val=\"{half_points}\"/>"
                ));
            }
            out.push_str("</w:rPr>");
        }
        if self.page_break {
            out.push_str("<w:br w:type=\"page\"/>");
        }
        let text = xml_safe(&self.text);
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                out.push_str("<w:br/>");
            }
            if !line.is_empty() {
                out.push_str("<w:t xml:space=\"preserve\">");
                out.push_str(&escape(line));
                out.push_str("</w:t>");
            }
        }
        out.push_str("</w:r>");
    }
}

/// Text with `\r` dropped, vertical tabs turned into newlines and every
/// character XML 1.0 does not allow removed.
fn xml_safe(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\u{000B}' => Some('\n'),
            '\t' | '\n' => Some(c),
            '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}' => Some(c),
            _ => None,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    /// Untouched element from the template, written back verbatim.
    Source {
        xml: String,
        properties: Option<String>,
    },
    /// Paragraph built (or rewritten) in memory.
    Built {
        properties: Option<String>,
        runs: Vec<Run>,
    },
}

/// One body-level element of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    kind: BlockKind,
    style_id: Option<String>,
    style_name: Option<String>,
    text: String,
    content: Content,
}

impl Block {
    pub(crate) fn from_source(
        kind: BlockKind,
        xml: String,
        properties: Option<String>,
        style_id: Option<String>,
        style_name: Option<String>,
        text: String,
    ) -> Self {
        Self {
            kind,
            style_id,
            style_name,
            text,
            content: Content::Source { xml, properties },
        }
    }

    /// New empty paragraph with the given style display name (e.g. `Heading 2`).
    pub fn paragraph(style: &str) -> Self {
        Self {
            kind: BlockKind::Paragraph,
            style_id: None,
            style_name: Some(style.to_string()),
            text: String::new(),
            content: Content::Built {
                properties: None,
                runs: Vec::new(),
            },
        }
    }

    /// Unstyled paragraph holding a single page break.
    pub fn page_break() -> Self {
        Self {
            kind: BlockKind::Paragraph,
            style_id: None,
            style_name: None,
            text: String::new(),
            content: Content::Built {
                properties: None,
                runs: vec![Run::page_break()],
            },
        }
    }

    pub fn with_run(mut self, run: Run) -> Self {
        self.push_run(run);
        self
    }

    /// Appends a run to a built paragraph. Template blocks are left as they are.
    pub fn push_run(&mut self, run: Run) {
        if let Content::Built { runs, .. } = &mut self.content {
            self.text.push_str(&run.text);
            runs.push(run);
        }
    }

    #[cfg(test)]
    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn is_paragraph(&self) -> bool {
        self.kind == BlockKind::Paragraph
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style_id(&self) -> Option<&str> {
        self.style_id.as_deref()
    }

    pub fn style_name(&self) -> Option<&str> {
        self.style_name.as_deref()
    }

    /// Runs of a built paragraph. Template blocks report none.
    #[cfg(test)]
    pub fn runs(&self) -> &[Run] {
        match &self.content {
            Content::Built { runs, .. } => runs,
            Content::Source { .. } => &[],
        }
    }

    pub(crate) fn resolve_style(&mut self, resolve: impl Fn(&str) -> String) {
        if self.style_id.is_none() {
            if let Some(name) = &self.style_name {
                self.style_id = Some(resolve(name));
            }
        }
    }

    /// Replaces all runs with a single plain run, keeping paragraph properties.
    pub fn set_text(&mut self, text: &str) {
        let properties = match &self.content {
            Content::Source { properties, .. } | Content::Built { properties, .. } => {
                properties.clone()
            }
        };
        self.text = text.to_string();
        self.content = Content::Built {
            properties,
            runs: vec![Run::text(text)],
        };
    }

    pub(crate) fn write_xml(&self, out: &mut String) {
        match &self.content {
            Content::Source { xml, .. } => out.push_str(xml),
            Content::Built { properties, runs } => {
                out.push_str("<w:p>");
                match (properties, &self.style_id) {
                    (Some(props), _) => out.push_str(props),
                    (None, Some(id)) => {
                        out.push_str("<w:pPr><w:pStyle w:val=\"");
                        out.push_str(&escape(id.as_str()));
                        out.push_str("\"/></w:pPr>");
                    }
                    (None, None) => {}
                }
                for run in runs {
                    run.write_xml(out);
                }
                out.push_str("</w:p>");
            }
        }
    }
}
