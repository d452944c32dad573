/// Table, Row, and Cell structures for Word documents.
///
/// Tables are built by the body builder; this module holds the node types
/// and the property parsers for `w:tblPr`, `w:trPr` and `w:tcPr`.
use crate::common::xml::XmlElement;
use crate::ooxml::docx::document::Block;
use crate::ooxml::docx::enums::Justification;
use crate::ooxml::docx::format::{Borders, Shading};
use serde::Serialize;

/// Vertical merge state for table cells.
///
/// - `restart`: Starts a new vertical merge (first cell in the merge)
/// - `continue`: Continues a vertical merge from the cell above (no `val` attribute or `val="continue"`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VMergeState {
    Restart,
    Continue,
}

impl VMergeState {
    pub fn from_xml(v_merge: &XmlElement) -> Self {
        match v_merge.attr("val") {
            Some("restart") => Self::Restart,
            _ => Self::Continue,
        }
    }
}

/// A measurement with its unit (`w:tblW`, `w:tcW`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TableWidth {
    /// Twips
    Dxa(i64),
    /// Fiftieths of a percent
    Pct(i64),
    Auto,
}

impl TableWidth {
    pub fn from_xml(el: &XmlElement) -> Option<Self> {
        let value = el.attr("w");
        match el.attr("type").unwrap_or("dxa") {
            "auto" => Some(Self::Auto),
            "nil" => None,
            "pct" => {
                let raw = value?.trim();
                // ISO 29500 allows "50%"
                match raw.strip_suffix('%') {
                    Some(pct) => pct.trim().parse::<f64>().ok().map(|p| Self::Pct((p * 50.0) as i64)),
                    None => crate::common::xml::tree::parse_i64(raw).map(Self::Pct),
                }
            },
            _ => value.and_then(crate::common::xml::tree::parse_i64).map(Self::Dxa),
        }
    }
}

/// Table-level properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableProperties {
    pub style_id: Option<String>,
    pub width: Option<TableWidth>,
    pub justification: Option<Justification>,
    pub borders: Borders,
    pub shading: Option<Shading>,
    /// Set when a page break occurs in the first row's first paragraph
    pub page_break_before: bool,
    /// Set when a page break occurs inside the last row
    pub page_break_after: bool,
}

impl TableProperties {
    pub fn from_xml(tbl_pr: &XmlElement) -> Self {
        Self {
            style_id: tbl_pr.child_val("tblStyle").map(str::to_string),
            width: tbl_pr.child("tblW").and_then(TableWidth::from_xml),
            justification: tbl_pr.child_val("jc").and_then(Justification::from_xml),
            borders: tbl_pr.child("tblBorders").map(Borders::from_xml).unwrap_or_default(),
            shading: tbl_pr.child("shd").map(Shading::from_xml),
            page_break_before: false,
            page_break_after: false,
        }
    }
}

/// Row-level properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RowProperties {
    /// Row height in twips
    pub height: Option<i64>,
    /// `exact` or `atLeast`
    pub height_rule: Option<String>,
    /// Repeats as a header row on each page
    pub is_header: bool,
    pub cant_split: bool,
    /// Style id of the enclosing table
    pub style_id: Option<String>,
}

impl RowProperties {
    pub fn from_xml(tr_pr: &XmlElement) -> Self {
        let height = tr_pr.child("trHeight");
        Self {
            height: height.and_then(|h| h.attr_i64("val")),
            height_rule: height.and_then(|h| h.attr("hRule")).map(str::to_string),
            is_header: tr_pr.child_toggle("tblHeader").unwrap_or(false),
            cant_split: tr_pr.child_toggle("cantSplit").unwrap_or(false),
            style_id: None,
        }
    }
}

/// Cell-level properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellProperties {
    pub width: Option<TableWidth>,
    pub borders: Borders,
    pub shading: Option<Shading>,
    pub vertical_merge: Option<VMergeState>,
    /// Legacy horizontal merge flag (`w:hMerge`)
    pub horizontal_merge: Option<VMergeState>,
    /// Number of grid columns spanned
    pub grid_span: u32,
    pub vertical_align: Option<String>,
    /// Style id of the enclosing table
    pub style_id: Option<String>,
}

impl Default for CellProperties {
    fn default() -> Self {
        Self {
            width: None,
            borders: Borders::default(),
            shading: None,
            vertical_merge: None,
            horizontal_merge: None,
            grid_span: 1,
            vertical_align: None,
            style_id: None,
        }
    }
}

impl CellProperties {
    pub fn from_xml(tc_pr: &XmlElement) -> Self {
        Self {
            width: tc_pr.child("tcW").and_then(TableWidth::from_xml),
            borders: tc_pr.child("tcBorders").map(Borders::from_xml).unwrap_or_default(),
            shading: tc_pr.child("shd").map(Shading::from_xml),
            vertical_merge: tc_pr.child("vMerge").map(VMergeState::from_xml),
            horizontal_merge: tc_pr.child("hMerge").map(VMergeState::from_xml),
            grid_span: tc_pr
                .child_val_i64("gridSpan")
                .and_then(|v| u32::try_from(v).ok())
                .filter(|v| *v > 0)
                .unwrap_or(1),
            vertical_align: tc_pr.child_val("vAlign").map(str::to_string),
            style_id: None,
        }
    }
}

/// A table cell. Content is block-level (paragraphs and nested tables).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableCell {
    pub properties: CellProperties,
    pub content: Vec<Block>,
}

impl TableCell {
    /// Plain text of the cell, paragraphs separated by newlines.
    pub fn text(&self) -> String {
        crate::ooxml::docx::document::blocks_text(&self.content)
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableRow {
    pub properties: RowProperties,
    pub cells: Vec<TableCell>,
}

/// A table in a Word document.
///
/// # Example
///
/// ```rust,no_run
/// use longan::ooxml::docx::{Block, Package};
///
/// let parsed = Package::open("document.docx")?.parse()?;
/// for block in parsed.document().blocks() {
///     if let Block::Table(table) = block {
///         for (row_idx, row) in table.rows.iter().enumerate() {
///             for (col_idx, cell) in row.cells.iter().enumerate() {
///                 println!("Cell [{},{}]: {}", row_idx, col_idx, cell.text());
///             }
///         }
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub properties: TableProperties,
    /// Grid column widths in twips
    pub grid: Vec<i64>,
    pub rows: Vec<TableRow>,
}

impl Table {
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of grid columns, from the grid or the widest row.
    pub fn column_count(&self) -> usize {
        let widest = self
            .rows
            .iter()
            .map(|row| row.cells.iter().map(|c| c.properties.grid_span as usize).sum::<usize>())
            .max()
            .unwrap_or(0);
        self.grid.len().max(widest)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.rows.get(row).and_then(|r| r.cells.get(col))
    }

    /// Number of rows a vertically merged cell spans, counted from the row
    /// holding the `restart` cell at grid column `grid_col`.
    pub fn row_span(&self, row: usize, grid_col: usize) -> usize {
        let mut span = 1;
        for next in self.rows.iter().skip(row + 1) {
            match next.cell_at_grid(grid_col) {
                Some(cell) if cell.properties.vertical_merge == Some(VMergeState::Continue) => span += 1,
                _ => break,
            }
        }
        span
    }
}

impl TableRow {
    /// The cell that starts at grid column `grid_col`, if any.
    pub fn cell_at_grid(&self, grid_col: usize) -> Option<&TableCell> {
        let mut col = 0;
        for cell in &self.cells {
            if col == grid_col {
                return Some(cell);
            }
            col += cell.properties.grid_span as usize;
            if col > grid_col {
                return None;
            }
        }
        None
    }
}
