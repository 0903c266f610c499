use comfy_table::{ContentArrangement, Table, presets::NOTHING};

use super::{TableOptions, TableRow};

/// Message printed instead of an empty table
pub const NO_RESOURCES: &str = "No resources found.";

/// Gap between columns, as kubectl prints it
const COLUMN_GAP: u16 = 3;

pub struct TableFormatter;

impl TableFormatter {
    pub fn format<T: TableRow>(rows: &[T], options: TableOptions) -> String {
        if rows.is_empty() {
            return NO_RESOURCES.to_string();
        }

        let mut table = Table::new();
        table.load_preset(NOTHING);
        table.set_content_arrangement(ContentArrangement::Disabled);

        if !options.no_headers {
            let mut headers = Vec::new();
            if options.show_namespace {
                headers.push("NAMESPACE");
            }
            headers.extend(T::headers(options.wide));
            table.set_header(headers);
        }

        for row in rows {
            let mut cells = Vec::new();
            if options.show_namespace {
                cells.push(row.namespace().to_string());
            }
            cells.extend(row.cells(options.wide));
            table.add_row(cells);
        }

        for column in table.column_iter_mut() {
            column.set_padding((0, COLUMN_GAP));
        }

        table
            .lines()
            .map(|line| line.trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
