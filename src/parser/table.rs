//! Table construction from `w:tbl` elements.

use std::collections::HashMap;

use crate::model::{Table, TableCell, TableRow};
use crate::units::parse_twips;
use crate::xml::{ElementRef, Namespaces};

use super::loader::TreeLoader;

fn val<'a>(element: ElementRef<'a>, ns: &Namespaces) -> Option<&'a str> {
    element.attr(ns, "w:val")
}

fn is_on(element: ElementRef<'_>, ns: &Namespaces) -> bool {
    !matches!(val(element, ns), Some("0" | "false" | "off"))
}

/// Build a table, loading each cell's content through `loader`.
///
/// Vertical merges (`w:vMerge`) are folded into the `rowspan` of the cell
/// that starts them; continuation cells are kept but flagged `merged_above`.
pub(crate) fn read_table(loader: &mut TreeLoader<'_>, element: ElementRef<'_>) -> Table {
    let ns = loader.namespaces();
    let mut table = Table::new();

    table.style_id = element
        .path(ns, &["w:tblPr", "w:tblStyle"])
        .and_then(|e| val(e, ns))
        .map(str::to_string);

    if let Some(grid) = element.child(ns, "w:tblGrid") {
        table.column_widths_pt = grid
            .children()
            .filter(|c| c.is(ns, "w:gridCol"))
            .map(|c| c.attr(ns, "w:w").and_then(parse_twips).unwrap_or(0))
            .collect();
    }

    // grid column -> (row, cell) of the merge currently open in that column
    let mut open_merges: HashMap<usize, (usize, usize)> = HashMap::new();

    for tr in element.children().filter(|c| c.is(ns, "w:tr")) {
        let row_index = table.rows.len();
        let tr_pr = tr.child(ns, "w:trPr");

        let is_header = tr_pr
            .and_then(|p| p.child(ns, "w:tblHeader"))
            .is_some_and(|h| is_on(h, ns));
        let mut column = tr_pr
            .and_then(|p| p.child(ns, "w:gridBefore"))
            .and_then(|e| val(e, ns))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);

        let mut cells = Vec::new();
        for tc in tr.children().filter(|c| c.is(ns, "w:tc")) {
            let tc_pr = tc.child(ns, "w:tcPr");

            let colspan = tc_pr
                .and_then(|p| p.child(ns, "w:gridSpan"))
                .and_then(|e| val(e, ns))
                .and_then(|v| v.trim().parse::<u32>().ok())
                .unwrap_or(1)
                .max(1);
            let width_pt = tc_pr
                .and_then(|p| p.child(ns, "w:tcW"))
                .filter(|w| matches!(w.attr(ns, "w:type"), None | Some("dxa")))
                .and_then(|w| w.attr(ns, "w:w"))
                .and_then(parse_twips);
            let restart = tc_pr
                .and_then(|p| p.child(ns, "w:vMerge"))
                .map(|m| val(m, ns) == Some("restart"));

            let content = loader.load_children(tc, false);
            let mut cell = TableCell::with_content(content).colspan(colspan);
            cell.width_pt = width_pt;

            match restart {
                Some(true) => {
                    open_merges.insert(column, (row_index, cells.len()));
                }
                Some(false) => match open_merges.get(&column) {
                    Some(&(row, index)) => {
                        table.rows[row].cells[index].rowspan += 1;
                        cell.merged_above = true;
                    }
                    None => log::debug!("vMerge continuation without a start in column {}", column),
                },
                None => {
                    open_merges.remove(&column);
                }
            }

            cells.push(cell);
            column += colspan as usize;
        }

        table.add_row(TableRow { cells, is_header });
    }

    table
}
