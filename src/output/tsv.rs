//! Tab-separated record sink.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::Record;

const SEPARATOR: &str = "\t";

/// Streams records as tab-separated lines under a fixed header.
///
/// Each line is flushed as soon as it is written, so an interrupted run
/// leaves a file that is a valid prefix of the full output.
pub struct TsvSink<W: Write> {
    out: W,
    written: usize,
}

impl TsvSink<BufWriter<File>> {
    /// Create or truncate `path` (and its parent directories) and write the header.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Self::new(BufWriter::new(File::create(path)?))
    }
}

impl<W: Write> TsvSink<W> {
    pub fn new(out: W) -> Result<Self> {
        let mut sink = Self { out, written: 0 };
        sink.write_line(&Record::COLUMNS)?;
        Ok(sink)
    }

    /// Append one record as a single line.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        self.write_line(&record.fields())?;
        self.written += 1;
        Ok(())
    }

    /// Records written so far, excluding the header.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, fields: &[&str]) -> Result<()> {
        writeln!(self.out, "{}", fields.join(SEPARATOR))?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ABSENT;
    use tempfile::TempDir;

    fn record(index: &str) -> Record {
        Record {
            index: index.to_string(),
            name: "Inception".to_string(),
            link: "https://www.imdb.com/title/tt1375666".to_string(),
            genres: "Action, Sci-Fi".to_string(),
            rating: "8.8".to_string(),
            title_type: "Feature Film".to_string(),
            stars: "Leonardo DiCaprio, Elliot Page".to_string(),
            details: "Country: USA\\nLanguage: English".to_string(),
            box_office: ABSENT.to_string(),
            tech_specs: ABSENT.to_string(),
        }
    }

    #[test]
    fn test_header_and_rows() {
        let mut sink = TsvSink::new(Vec::new()).unwrap();
        sink.write_record(&record("1.")).unwrap();
        assert_eq!(sink.written(), 1);

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "index\tname\tlink\tgenres\trating\ttype\tstars\tdetails\tbox_office\ttech_specs"
        );
        assert_eq!(lines[1].split('\t').count(), Record::COLUMNS.len());
        assert!(lines[1].ends_with("\tNull\tNull"));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_create_truncates_and_makes_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out/films.tsv");

        let mut sink = TsvSink::create(&path).unwrap();
        sink.write_record(&record("1.")).unwrap();
        sink.write_record(&record("2.")).unwrap();
        drop(sink);
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 3);

        let sink = TsvSink::create(&path).unwrap();
        drop(sink);
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_rows_are_flushed_immediately() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("films.tsv");

        let mut sink = TsvSink::create(&path).unwrap();
        sink.write_record(&record("1.")).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        drop(sink);
    }
}
