//! Markdown table reformatting.

use crate::error::TableFormatError;

const MIN_LINE_LENGTH: usize = 3;

/// Reformats a Markdown table region into fixed-width aligned columns.
///
/// Rows are `|`-delimited lines; empty cells are skipped and remaining
/// cells are trimmed of spaces. The second row is rebuilt as a separator
/// whose alignment colons are taken from the cell's first and last `:`.
/// Column widths are measured in characters and grow as wider cells
/// appear in later rows.
///
/// ```
/// use tagdown::format_table;
///
/// let formatted = format_table("| a | bbb |\n| --- | --- |\n| 1 | 2 |\n").unwrap();
/// assert_eq!(formatted, "| a   | bbb |\n|-----|-----|\n| 1   | 2   |\n");
/// ```
///
/// # Errors
///
/// Returns [`TableFormatError::NoRows`] if no row yields any cell.
pub fn format_table(input: &str) -> Result<String, TableFormatError> {
    let mut table_data: Vec<Vec<&str>> = Vec::new();

    for line in input.split('\n') {
        let row_data: Vec<&str> = line
            .split('|')
            .filter(|cell| !cell.is_empty())
            .map(|cell| cell.trim_matches(' '))
            .collect();

        if !row_data.is_empty() {
            table_data.push(row_data);
        }
    }

    if table_data.is_empty() {
        return Err(TableFormatError::NoRows);
    }

    let mut column_widths = vec![0usize; table_data[0].len()];
    for row in &table_data {
        if column_widths.len() < row.len() {
            column_widths.resize(row.len(), 0);
        }

        for (i, cell) in row.iter().enumerate() {
            column_widths[i] = column_widths[i].max(cell.chars().count());
        }
    }

    let mut formatted = String::new();
    for (row_number, row) in table_data.iter().enumerate() {
        formatted.push('|');

        for (i, cell) in row.iter().enumerate() {
            if row_number == 1 {
                formatted.push_str(&enlarge_separator(cell, column_widths[i] + 2));
                formatted.push('|');
                continue;
            }

            let padding = column_widths[i] - cell.chars().count();
            formatted.push(' ');
            formatted.push_str(cell);
            formatted.push_str(&" ".repeat(padding));
            formatted.push_str(" |");
        }

        formatted.push('\n');
    }

    Ok(formatted)
}

/// Rebuilds one separator cell at the given width, keeping the alignment
/// colons from the original cell's edges.
fn enlarge_separator(cell: &str, length: usize) -> String {
    if cell.is_empty() || length < MIN_LINE_LENGTH {
        return String::new();
    }

    let first = cell.find(':');
    let mut last = cell.rfind(':');

    // A single leading colon marks left alignment, not both edges.
    if first == Some(0) && first == last {
        last = None;
    }

    let mut line = vec![b'-'; length];

    if first == Some(0) {
        line[0] = b':';
    }
    if last == Some(cell.len() - 1) {
        line[length - 1] = b':';
    }

    // The buffer only ever holds '-' and ':'.
    String::from_utf8(line).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_columns_and_rebuilds_separators() {
        let input = "| 1 | 2 | 3 |\n| :-- | :-: | --: |\n| Hello | World | ! |\n| foo | bar | buzz |\n";
        let expected = "| 1     | 2     | 3    |\n|:------|:-----:|-----:|\n| Hello | World | !    |\n| foo   | bar   | buzz |\n";

        assert_eq!(format_table(input).as_deref(), Ok(expected));
    }

    #[test]
    fn later_rows_can_widen_columns() {
        let formatted = format_table("| a |\n| --- |\n| wider |\n").unwrap();
        assert_eq!(formatted, "| a     |\n|-------|\n| wider |\n");
    }

    #[test]
    fn rows_may_grow_the_column_count() {
        let formatted = format_table("| a |\n| --- |\n| 1 | 2 |\n").unwrap();
        assert_eq!(formatted, "| a   |\n|-----|\n| 1   | 2 |\n");
    }

    #[test]
    fn empty_region_is_an_error() {
        assert_eq!(format_table(""), Err(TableFormatError::NoRows));
        assert_eq!(format_table("\n\n"), Err(TableFormatError::NoRows));
        assert_eq!(format_table("||\n"), Err(TableFormatError::NoRows));
    }

    #[test]
    fn widths_count_characters_not_bytes() {
        let formatted = format_table("| üüüü | x |\n| - | - |\n| aa | b |\n").unwrap();
        assert_eq!(formatted, "| üüüü | x |\n|------|---|\n| aa   | b |\n");
    }
}
