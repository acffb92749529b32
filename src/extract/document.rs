// src/extract/document.rs

//! Parser-neutral view of a detail page.
//!
//! Extraction works on [`Document`] rather than on `scraper` types, so the
//! heuristics only see headings, tables of cell texts, and flattened text.

use scraper::{ElementRef, Html, Selector};

/// Heading-like elements searched for the record title, in priority order.
const HEADING_TAGS: [&str; 5] = ["h1", "h2", "h3", "h4", "title"];

/// One `<tr>`: its cell texts and its whole flattened text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<String>,
    pub text: String,
}

impl Row {
    /// Row made of cell texts only.
    pub fn from_cells<S: Into<String>>(cells: impl IntoIterator<Item = S>) -> Self {
        let cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        let text = cells
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self { cells, text }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(Row::from_cells).collect(),
        }
    }
}

/// Everything the extraction heuristics look at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Heading texts ordered by tag priority, then document order
    pub headings: Vec<String>,
    /// Every table in document order (nested tables included)
    pub tables: Vec<Table>,
    /// Whole-document text, text nodes joined with a space
    pub text: String,
    /// Whole-document text, text nodes joined with `" | "`
    pub piped_text: String,
}

impl Document {
    /// Parse an HTML body.
    pub fn parse(body: &str) -> Self {
        let html = Html::parse_document(body);
        let root = html.root_element();

        let headings = HEADING_TAGS
            .iter()
            .flat_map(|tag| select_all(root, tag))
            .map(|el| joined_text(el, ""))
            .collect();

        let tables = select_all(root, "table")
            .into_iter()
            .map(|table| Table {
                rows: select_all(table, "tr")
                    .into_iter()
                    .map(|tr| Row {
                        cells: select_all(tr, "th, td")
                            .into_iter()
                            .map(|cell| joined_text(cell, " "))
                            .collect(),
                        text: joined_text(tr, " "),
                    })
                    .collect(),
            })
            .collect();

        Self {
            headings,
            tables,
            text: joined_text(root, " "),
            piped_text: joined_text(root, " | "),
        }
    }
}

/// Descendants of `root` matching `css`, in document order.
fn select_all<'a>(root: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => root.select(&selector).collect(),
        Err(e) => {
            log::error!("Invalid selector '{}': {:?}", css, e);
            Vec::new()
        }
    }
}

/// Trimmed, non-empty text nodes of `element` joined with `sep`.
fn joined_text(element: ElementRef<'_>, sep: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><head><title>Monitoring</title></head>
        <body>
          <h3>Detail</h3>
          <h1> PKK.DN.IDJKT.2501.000123 - <b>KM SINAR</b> </h1>
          <table>
            <tr><td>Nama Perusahaan</td><td>:</td><td>  PT ACME  </td></tr>
            <tr><th>GT / DWT</th><td>12345 / 6789</td></tr>
          </table>
        </body></html>
    "#;

    #[test]
    fn test_headings_follow_tag_priority() {
        let doc = Document::parse(PAGE);
        assert_eq!(doc.headings[0], "PKK.DN.IDJKT.2501.000123 -KM SINAR");
        assert_eq!(doc.headings[1], "Detail");
        assert_eq!(doc.headings[2], "Monitoring");
    }

    #[test]
    fn test_tables_keep_cell_texts() {
        let doc = Document::parse(PAGE);
        assert_eq!(doc.tables.len(), 1);
        assert_eq!(doc.tables[0].rows[0].cells, vec!["Nama Perusahaan", ":", "PT ACME"]);
        assert_eq!(doc.tables[0].rows[1].cells, vec!["GT / DWT", "12345 / 6789"]);
        assert_eq!(doc.tables[0].rows[1].text, "GT / DWT 12345 / 6789");
    }

    #[test]
    fn test_flattened_text() {
        let doc = Document::parse("<p>ETA</p><p> 01-02-2025 </p>");
        assert_eq!(doc.text, "ETA 01-02-2025");
        assert_eq!(doc.piped_text, "ETA | 01-02-2025");
    }
}
