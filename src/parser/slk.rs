use std::{
    collections::{BTreeMap, HashMap},
    mem,
};

use derive_more::{Display, Error};

use super::{
    super::types::{strip_quotes, NullString, Table},
    Record,
};

/* SYLK is a line based format. Every line is a record, the record type comes
first and the fields follow, separated by semicolons. The only records we
care about are C records, which carry a cell. The unit tables put the column
names in the first row and one unit per row after that, keyed by the first
column. */

/// The row that holds the column names
const HEADER_ROW: usize = 1;
/// The column that holds the unit identifier
const ID_COLUMN: usize = 1;

/// An error that can occur while reading a SYLK table
#[derive(Debug, Display, Error)]
pub enum SlkError {
    /// The file doesn't start with an `ID` record
    #[display("the table does not start with an ID record")]
    MissingHeader,
    /// A cell points outside of the table
    #[display("invalid {axis} coordinate {value:?} on line {line}")]
    InvalidCoordinate {
        line: usize,
        axis: char,
        value: String,
    },
}

/// Split a record into its fields. A doubled semicolon is an escaped semicolon.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ';' {
            if chars.peek() == Some(&';') {
                chars.next();
                current.push(';');
            } else {
                fields.push(mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }
    fields.push(current);
    fields
}

/// Decode the value of a `K` field. Strings are quoted, everything else is
/// kept verbatim.
fn decode_value(raw: &str) -> String {
    match raw.strip_prefix('"') {
        Some(inner) => inner.strip_suffix('"').unwrap_or(inner).to_owned(),
        None => raw.to_owned(),
    }
}

fn parse_coordinate(line: usize, axis: char, value: &str) -> Result<usize, SlkError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(SlkError::InvalidCoordinate {
            line,
            axis,
            value: value.to_owned(),
        }),
    }
}

/// The cells of a table, before they are turned into records
#[derive(Default)]
struct Grid {
    headers: BTreeMap<usize, String>,
    /// Row numbers in the order they first received a cell
    row_order: Vec<usize>,
    rows: HashMap<usize, HashMap<usize, String>>,
}

impl Grid {
    fn set(&mut self, x: usize, y: usize, value: String) {
        if y == HEADER_ROW {
            self.headers.insert(x, value);
            return;
        }
        let row_order = &mut self.row_order;
        self.rows
            .entry(y)
            .or_insert_with(|| {
                row_order.push(y);
                HashMap::new()
            })
            .insert(x, value);
    }

    fn into_table(mut self) -> Table<Record> {
        let mut table = Table::new();
        for y in self.row_order {
            let mut cells = self.rows.remove(&y).unwrap_or_default();
            let id = match cells.get(&ID_COLUMN) {
                Some(id) => strip_quotes(id),
                None => continue,
            };
            if id.is_empty() {
                continue;
            }
            let record = self
                .headers
                .iter()
                .map(|(x, name)| (name.clone(), NullString::from(cells.remove(x))))
                .collect();
            table.insert_merged(id, record);
        }
        table
    }
}

/// Parse the contents of a SYLK file into a table of records keyed by the
/// first column.
///
/// The first row names the columns. Cells without a column name are dropped,
/// and named columns without a cell in a given row are null in that row's
/// record.
pub fn parse_slk(contents: &[u8]) -> Result<Table<Record>, SlkError> {
    let text = String::from_utf8_lossy(contents);
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty());
    match lines.next() {
        Some((_, line)) if split_fields(line)[0] == "ID" => {}
        _ => return Err(SlkError::MissingHeader),
    }
    let mut grid = Grid::default();
    // the cursor persists between records
    let (mut x, mut y) = (1, 1);
    for (line_number, line) in lines {
        let fields = split_fields(line);
        match fields[0].as_str() {
            "E" => break,
            kind @ ("C" | "F") => {
                let mut value = None;
                for field in &fields[1..] {
                    let mut chars = field.chars();
                    match chars.next() {
                        Some('X') => x = parse_coordinate(line_number, 'X', chars.as_str())?,
                        Some('Y') => y = parse_coordinate(line_number, 'Y', chars.as_str())?,
                        Some('K') if kind == "C" => value = Some(decode_value(chars.as_str())),
                        _ => {}
                    }
                }
                if let Some(value) = value {
                    grid.set(x, y, value);
                }
            }
            _ => {}
        }
    }
    Ok(grid.into_table())
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT_BALANCE: &str = "ID;PWXL;N;E
B;X3;Y4;D0
C;Y1;X1;K\"unitBalanceID\"
C;X2;K\"type\"
C;X3;K\"goldcost\"
C;Y2;X1;K\"hpea\"
C;X2;K\"peon\"
C;X3;K75
C;Y3;X1;K\"hfoo\"
C;X3;K135
C;Y4;X2;K\"orphan\"
E
";

    #[test]
    fn test_parse() {
        let table = parse_slk(UNIT_BALANCE.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        let keys: Vec<_> = table.keys().cloned().collect();
        assert_eq!(keys, vec!["hpea", "hfoo"]);
        let peasant = table.get("hpea").unwrap();
        assert_eq!(peasant.get_str("unitBalanceID"), "hpea");
        assert_eq!(peasant.get_str("type"), "peon");
        assert_eq!(peasant.get_str("goldcost"), "75");
        let footman = table.get("hfoo").unwrap();
        assert!(!footman.get("type").unwrap().is_valid());
        assert_eq!(footman.get_str("goldcost"), "135");
    }

    #[test]
    fn test_crlf_and_trailer() {
        let input = "ID;PWXL;N;E\r\nC;X1;Y1;K\"id\"\r\nC;X1;Y2;K\"hkee\"\r\nE\r\nC;X1;Y3;K\"ignored\"\r\n";
        let table = parse_slk(input.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.contains_key("hkee"));
    }

    #[test]
    fn test_escaped_semicolon() {
        let input = "ID;P\nC;X1;Y1;K\"id\"\nC;X2;K\"tip\"\nC;X1;Y2;K\"hpea\"\nC;X2;K\"a;;b\"\nE";
        let table = parse_slk(input.as_bytes()).unwrap();
        assert_eq!(table.get("hpea").unwrap().get_str("tip"), "a;b");
    }

    #[test]
    fn test_format_record_moves_cursor() {
        let input = "ID;P\nC;X1;Y1;K\"id\"\nC;X2;K\"hp\"\nF;Y2;X1\nC;K\"hpea\"\nC;X2;K220\nE";
        let table = parse_slk(input.as_bytes()).unwrap();
        assert_eq!(table.get("hpea").unwrap().get_str("hp"), "220");
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            parse_slk(b"C;X1;Y1;K\"id\"\nE"),
            Err(SlkError::MissingHeader)
        ));
        assert!(matches!(parse_slk(b""), Err(SlkError::MissingHeader)));
    }

    #[test]
    fn test_invalid_coordinate() {
        let err = parse_slk(b"ID;P\nC;X0;Y1;K\"id\"\nE").unwrap_err();
        match err {
            SlkError::InvalidCoordinate { line, axis, .. } => {
                assert_eq!(line, 2);
                assert_eq!(axis, 'X');
            }
            _ => panic!("Expected an invalid coordinate error"),
        }
        assert!(parse_slk(b"ID;P\nC;X1;Yabc;K1\nE").is_err());
    }
}
