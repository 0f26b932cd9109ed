//! Table types.
//!
//! Cell content is made of ordinary nodes living in the document's
//! construction record, so cells are addressed by [`NodeId`].

use serde::{Deserialize, Serialize};

use super::NodeId;

/// A table structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Grid column widths in points (`w:tblGrid`)
    pub column_widths_pt: Vec<i64>,

    /// Style id (`w:tblStyle`)
    pub style_id: Option<String>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Every node id contained in the table's cells, in row order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.rows
            .iter()
            .flat_map(|r| &r.cells)
            .flat_map(|c| c.content.iter().copied())
    }
}

/// A table row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,

    /// Whether this row repeats as a header (`w:tblHeader`)
    pub is_header: bool,
}

impl TableRow {
    /// Cells that are rendered (vertical merge continuations excluded).
    pub fn visible_cells(&self) -> impl Iterator<Item = &TableCell> {
        self.cells.iter().filter(|c| !c.merged_above)
    }
}

/// A table cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCell {
    /// Nodes inside the cell
    pub content: Vec<NodeId>,

    /// Number of grid columns spanned (`w:gridSpan`)
    pub colspan: u32,

    /// Number of rows spanned (from `w:vMerge` chains)
    pub rowspan: u32,

    /// Continuation of a vertically merged cell above
    pub merged_above: bool,

    /// Preferred width in points (`w:tcW` of type `dxa`)
    pub width_pt: Option<i64>,
}

impl TableCell {
    /// Create a cell holding the given nodes.
    pub fn with_content(content: Vec<NodeId>) -> Self {
        Self {
            content,
            colspan: 1,
            rowspan: 1,
            merged_above: false,
            width_pt: None,
        }
    }

    /// Set colspan and return self.
    pub fn colspan(mut self, span: u32) -> Self {
        self.colspan = span.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let mut table = Table::new();
        assert!(table.rows.is_empty());

        table.add_row(TableRow {
            cells: vec![TableCell::with_content(Vec::new()).colspan(0)],
            is_header: false,
        });
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].cells[0].colspan, 1);
        assert_eq!(table.rows[0].cells[0].rowspan, 1);
    }

    #[test]
    fn test_node_ids_and_visible_cells() {
        let mut merged = TableCell::with_content(vec![NodeId(3)]);
        merged.merged_above = true;
        let row = TableRow {
            cells: vec![TableCell::with_content(vec![NodeId(1), NodeId(2)]), merged],
            is_header: false,
        };
        let mut table = Table::new();
        table.add_row(row);

        let ids: Vec<_> = table.node_ids().map(NodeId::index).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(table.rows[0].visible_cells().count(), 1);
    }
}
