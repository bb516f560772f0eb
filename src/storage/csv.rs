// src/storage/csv.rs

//! Minimal CSV writing for the postings table.

use std::io::{self, Write};

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row, quoting fields per RFC 4180.
pub fn write_row<W: Write>(w: &mut W, row: &[&str]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            w.write_all(b",")?;
        }
        first = false;

        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(b"\r\n")
}

/// Render a header plus rows into a byte buffer.
pub fn to_bytes<'a>(header: &[&str], rows: impl IntoIterator<Item = [&'a str; 3]>) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_row(&mut buf, header)?;
    for row in rows {
        write_row(&mut buf, &row)?;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_string(row: &[&str]) -> String {
        let mut buf = Vec::new();
        write_row(&mut buf, row).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_plain_row() {
        assert_eq!(row_string(&["a", "b", "c"]), "a,b,c\r\n");
    }

    #[test]
    fn test_quoting() {
        assert_eq!(
            row_string(&["Springfield", "Analyst, IT", "say \"hi\""]),
            "Springfield,\"Analyst, IT\",\"say \"\"hi\"\"\"\r\n"
        );
        assert_eq!(row_string(&["two\nlines"]), "\"two\nlines\"\r\n");
    }

    #[test]
    fn test_to_bytes_with_header() {
        let bytes = to_bytes(&["source", "title", "url"], [["A", "T", "U"]]).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "source,title,url\r\nA,T,U\r\n");
    }
}
