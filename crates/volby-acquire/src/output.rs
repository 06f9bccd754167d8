use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use volby_model::AggregatedTable;

/// UTF-8 byte-order mark, so spreadsheet tools detect the encoding.
const BOM: &[u8] = "\u{feff}".as_bytes();

const DELIMITER: u8 = b';';

/// Write the table as semicolon-delimited CSV to `path`.
///
/// An existing file is overwritten. Returns the number of columns written.
pub fn write_csv(table: &AggregatedTable, path: &Path) -> Result<usize> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let columns = write_table(table, &mut writer)?;
    writer.flush()?;
    Ok(columns)
}

/// Write the BOM, the header row and one record per table row.
pub fn write_table(table: &AggregatedTable, mut writer: impl Write) -> Result<usize> {
    writer.write_all(BOM)?;

    let header = table.header();
    let mut csv = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(&header).context("CSV write error")?;
    for record in table.records() {
        csv.write_record(&record).context("CSV write error")?;
    }
    csv.flush().context("CSV flush error")?;

    Ok(header.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use volby_model::{MunicipalityRef, MunicipalityResult};

    fn sample_table() -> AggregatedTable {
        let mut table = AggregatedTable::new();
        table.push(
            &MunicipalityRef::new("12345", "Test Town", "u"),
            MunicipalityResult::new(Some(500), Some(480), Some(475))
                .unwrap()
                .with_party("Party X", Some(300))
                .with_party("Party Y", Some(175)),
        );
        table
    }

    #[test]
    fn test_write_table_layout() {
        let mut buf = Vec::new();
        let columns = write_table(&sample_table(), &mut buf).unwrap();
        assert_eq!(columns, 7);

        assert!(buf.starts_with(&[0xEF, 0xBB, 0xBF]));
        let text = String::from_utf8(buf[3..].to_vec()).unwrap();
        assert_eq!(
            text,
            "code;location;registered;envelopes;valid;Party X;Party Y\n\
             12345;Test Town;500;480;475;300;175\n"
        );
    }

    #[test]
    fn test_write_table_quotes_delimiter_in_names() {
        let mut table = AggregatedTable::new();
        table.push(
            &MunicipalityRef::new("1", "Lhota; u Kladna", "u"),
            MunicipalityResult::new(Some(1), Some(1), Some(1)).unwrap(),
        );

        let mut buf = Vec::new();
        write_table(&table, &mut buf).unwrap();
        let text = String::from_utf8(buf[3..].to_vec()).unwrap();
        assert!(text.contains("\"Lhota; u Kladna\""));
    }

    #[test]
    fn test_write_csv_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        fs::write(&path, "stale content that is longer than the new file ".repeat(20)).unwrap();

        write_csv(&sample_table(), &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with('\u{feff}'));
        assert!(!text.contains("stale"));
        assert_eq!(text.lines().count(), 2);
    }
}
