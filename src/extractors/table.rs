// src/extractors/table.rs

/// Column delimiter used by markdown-style tables.
pub const CELL_DELIMITER: char = '|';

// --- Data Structures ---
/// A parsed pipe table. Rows are kept as parsed; `fitted_rows` applies the
/// rendering policy for rows whose width disagrees with the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableBlock {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableBlock {
    /// Number of columns, as set by the header row.
    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Data rows truncated or padded with empty cells to the header width.
    pub fn fitted_rows(&self) -> Vec<Vec<String>> {
        let width = self.width();
        self.rows
            .iter()
            .map(|row| {
                if row.len() != width {
                    tracing::debug!(
                        "Table row has {} cells, header has {}; fitting to header",
                        row.len(),
                        width
                    );
                }
                let mut fitted: Vec<String> = row.iter().take(width).cloned().collect();
                fitted.resize(width, String::new());
                fitted
            })
            .collect()
    }
}

/// What a section body renders as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentEntry {
    Prose(String),
    Table(TableBlock),
}

impl ContentEntry {
    /// A body is tabular as soon as it contains a pipe anywhere, even if no line
    /// starts with one. Non-table lines of a tabular body are dropped.
    pub fn classify(body: &str) -> Self {
        if is_tabular(body) {
            ContentEntry::Table(parse_table(&extract_table_text(body)))
        } else {
            ContentEntry::Prose(body.to_string())
        }
    }
}

pub fn is_tabular(body: &str) -> bool {
    body.contains(CELL_DELIMITER)
}

/// Keeps only the lines that start with a pipe, each followed by a newline.
pub fn extract_table_text(body: &str) -> String {
    body.lines()
        .filter(|line| line.starts_with(CELL_DELIMITER))
        .fold(String::new(), |mut table, line| {
            table.push_str(line);
            table.push('\n');
            table
        })
}

/// Parses `header`, `separator`, `data...` pipe lines.
///
/// The second line is always discarded as the separator without looking at it.
/// Never fails: short input gives a header-only (possibly empty) table.
pub fn parse_table(table_text: &str) -> TableBlock {
    let mut lines = table_text.trim().split('\n');
    let header = lines.next().map(split_row).unwrap_or_default();
    let rows: Vec<Vec<String>> = lines.skip(1).map(split_row).collect();

    TableBlock { header, rows }
}

/// Splits on pipes and drops the first and last fields, which sit outside the
/// leading and trailing delimiters.
fn split_row(line: &str) -> Vec<String> {
    let fields: Vec<&str> = line.split(CELL_DELIMITER).collect();
    if fields.len() < 2 {
        return Vec::new();
    }
    fields[1..fields.len() - 1]
        .iter()
        .map(|field| field.trim().to_string())
        .collect()
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn extracts_only_pipe_lines() {
        let body = "Intro sentence.\n|Acronym|Description|\n|---|---|\n|ECU|Electronic Control Unit|\nTrailing note.";
        assert_eq!(
            extract_table_text(body),
            "|Acronym|Description|\n|---|---|\n|ECU|Electronic Control Unit|\n"
        );
        assert_eq!(extract_table_text("no table here"), "");
    }

    #[test]
    fn parses_well_formed_table() {
        let body = "| Sl No | Assets Identified | Functionality |\n|---|---|---|\n| 1 | Firmware | Boot |\n| 2 | Keys | Crypto |\n| 3 | Logs | Audit |";
        let table = parse_table(&extract_table_text(body));

        assert_eq!(table.header, strings(&["Sl No", "Assets Identified", "Functionality"]));
        assert_eq!(table.rows.len(), 3);
        assert!(table.rows.iter().all(|row| row.len() == table.width()));
        assert_eq!(table.rows[1], strings(&["2", "Keys", "Crypto"]));
    }

    #[test]
    fn separator_is_discarded_unconditionally() {
        let table = parse_table("|A|B|\n|1|2|\n|3|4|");
        assert_eq!(table.header, strings(&["A", "B"]));
        assert_eq!(table.rows, vec![strings(&["3", "4"])]);
    }

    #[test]
    fn degenerate_inputs_produce_defined_tables() {
        let header_only = parse_table("|A|B|\n");
        assert_eq!(header_only.header, strings(&["A", "B"]));
        assert!(header_only.rows.is_empty());

        let empty = parse_table("");
        assert!(empty.header.is_empty());
        assert!(empty.rows.is_empty());
    }

    #[test]
    fn mismatched_rows_are_kept_and_fitted_later() {
        let table = parse_table("|A|B|\n|-|-|\n|1|2|3|\n|4|");
        assert_eq!(table.rows[0], strings(&["1", "2", "3"]));
        assert_eq!(table.rows[1], strings(&["4"]));

        let fitted = table.fitted_rows();
        assert_eq!(fitted[0], strings(&["1", "2"]));
        assert_eq!(fitted[1], strings(&["4", ""]));
    }

    #[test]
    fn classification_uses_any_pipe() {
        assert_eq!(
            ContentEntry::classify("Plain prose\nover two lines."),
            ContentEntry::Prose("Plain prose\nover two lines.".to_string())
        );

        // A stray pipe routes to the table path even though no line starts with one.
        match ContentEntry::classify("Either A | B applies.") {
            ContentEntry::Table(table) => {
                assert!(table.header.is_empty());
                assert!(table.rows.is_empty());
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn prose_lines_in_tabular_body_are_dropped() {
        match ContentEntry::classify("See below.\n|X|Y|\n|-|-|\n|1|2|\nThat is all.") {
            ContentEntry::Table(table) => {
                assert_eq!(table.header, strings(&["X", "Y"]));
                assert_eq!(table.rows, vec![strings(&["1", "2"])]);
            }
            other => panic!("expected table, got {:?}", other),
        }
    }
}
