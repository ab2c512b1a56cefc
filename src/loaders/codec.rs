//! Line-oriented text format for a record store.
//!
//! ```text
//! <count>
//! <id>,<name>,<cw1>,<cw2>,<cw3>,<exam>
//! ```
//!
//! Names are written verbatim, so a name containing a comma produces a line
//! that will be skipped on the next decode.

use crate::model::{RecordStore, StudentId, StudentRecord};
use std::fmt::Write;
use std::num::ParseIntError;
use thiserror::Error;
use tracing::{debug, warn};

/// Outcome of decoding: the records that parsed, and how many candidate
/// lines were dropped.
#[derive(Debug, Default)]
pub struct Decoded {
    pub store: RecordStore,
    pub skipped: usize,
}

impl Decoded {
    /// Fails when lines were dropped, since saving the store would erase
    /// them from the file.
    pub fn ensure_complete(&self) -> crate::Result<()> {
        if self.skipped > 0 {
            Err(crate::Error::SkippedRecords(self.skipped))
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Error)]
enum MalformedLine {
    #[error("expected 6 fields, found {0}")]
    FieldCount(usize),
    #[error("invalid number: {0}")]
    Number(#[from] ParseIntError),
    #[error(transparent)]
    Record(#[from] crate::Error),
}

pub fn encode(store: &RecordStore) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{}", store.len());
    for r in store.all() {
        let [cw1, cw2, cw3] = *r.coursework();
        let _ = writeln!(out, "{},{},{cw1},{cw2},{cw3},{}", r.id(), r.name(), r.exam());
    }
    out
}

pub fn decode(text: &str) -> Decoded {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    let Some(header) = lines.next() else {
        return Decoded::default();
    };
    let count = match header.parse::<usize>() {
        Ok(count) => count,
        Err(e) => {
            let skipped = lines.count();
            warn!(header, error = %e, skipped, "invalid record count, ignoring file contents");
            return Decoded {
                store: RecordStore::new(),
                skipped,
            };
        }
    };
    let mut decoded = Decoded::default();
    for (index, line) in lines.by_ref().take(count).enumerate() {
        let added = parse_line(line)
            .and_then(|record| decoded.store.add(record).map_err(MalformedLine::from));
        if let Err(e) = added {
            debug!(record = index + 1, error = %e, "skipping malformed record");
            decoded.skipped += 1;
        }
    }
    let extra = lines.count();
    if extra > 0 {
        debug!(count, extra, "ignoring lines beyond the declared record count");
    }
    decoded
}

fn parse_line(line: &str) -> Result<StudentRecord, MalformedLine> {
    let fields = line.split(',').collect::<Vec<_>>();
    let &[id, name, cw1, cw2, cw3, exam] = fields.as_slice() else {
        return Err(MalformedLine::FieldCount(fields.len()));
    };
    let id = StudentId::new(number(id)?)?;
    let coursework = [number(cw1)?, number(cw2)?, number(cw3)?];
    Ok(StudentRecord::new(id, name, coursework, number(exam)?)?)
}

fn number(field: &str) -> Result<u32, ParseIntError> {
    field.trim().parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, name: &str, coursework: [u32; 3], exam: u32) -> StudentRecord {
        StudentRecord::new(StudentId::new(id).unwrap(), name, coursework, exam).unwrap()
    }

    #[test]
    fn test_encode() {
        let mut store = RecordStore::new();
        store.add(record(1001, "Ann Lee", [10, 11, 12], 80)).unwrap();
        store.add(record(2002, "Bo", [0, 20, 5], 100)).unwrap();
        assert_eq!(encode(&store), "2\n1001,Ann Lee,10,11,12,80\n2002,Bo,0,20,5,100\n");
        assert_eq!(encode(&RecordStore::new()), "0\n");
    }

    #[test]
    fn test_round_trip() {
        let mut store = RecordStore::new();
        store.add(record(9999, "Zoe", [20, 20, 20], 100)).unwrap();
        store.add(record(1000, "Al", [0, 0, 0], 0)).unwrap();
        store.add(record(5000, "Mid Dle", [7, 8, 9], 55)).unwrap();
        let decoded = decode(&encode(&store));
        assert_eq!(decoded.skipped, 0);
        assert_eq!(decoded.store.all(), store.all());
    }

    #[test]
    fn test_malformed_line_is_skipped() {
        let decoded = decode("2\n1001,Ann,10,10,10,80\nbadline\n");
        assert_eq!(decoded.store.len(), 1);
        assert_eq!(decoded.store.all()[0].id().get(), 1001);
        assert_eq!(decoded.skipped, 1);
    }

    #[test]
    fn test_bad_values_are_skipped() {
        let text = "6\n\
                    1001,Ann,x,10,10,80\n\
                    1002,Bob,10,10,10,101\n\
                    999,Cid,1,1,1,1\n\
                    1003,  ,1,1,1,1\n\
                    1004,Dee,1,2,3,4\n\
                    1004,Eve,1,2,3,4\n";
        let decoded = decode(text);
        assert_eq!(decoded.skipped, 5);
        assert_eq!(decoded.store.len(), 1);
        assert_eq!(decoded.store.all()[0].name(), "Dee");
    }

    #[test]
    fn test_blank_lines_and_whitespace() {
        let decoded = decode("\n  2 \n\n 1001, Ann ,10, 10,10,80 \n\n\n1002,Bob,1,2,3,4\n\n");
        assert_eq!(decoded.skipped, 0);
        let names = decoded.store.all().iter().map(|r| r.name()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Ann", "Bob"]);
        assert_eq!(decoded.store.all()[0].coursework(), &[10, 10, 10]);
    }

    #[test]
    fn test_count_limits_records() {
        let decoded = decode("1\n1001,Ann,10,10,10,80\n1002,Bob,1,2,3,4\n");
        assert_eq!(decoded.store.len(), 1);
        assert_eq!(decoded.skipped, 0);
        let decoded = decode("3\n1001,Ann,10,10,10,80\n");
        assert_eq!(decoded.store.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(decode("").store.is_empty());
        let decoded = decode("  \n\t\n");
        assert!(decoded.store.is_empty());
        assert_eq!(decoded.skipped, 0);
    }

    #[test]
    fn test_invalid_count() {
        let decoded = decode("two\n1001,Ann,10,10,10,80\n");
        assert!(decoded.store.is_empty());
        assert_eq!(decoded.skipped, 1);
    }

    #[test]
    fn test_comma_in_name_corrupts_line() {
        let mut store = RecordStore::new();
        store.add(record(1001, "Lee, Ann", [1, 2, 3], 4)).unwrap();
        let decoded = decode(&encode(&store));
        assert!(decoded.store.is_empty());
        assert_eq!(decoded.skipped, 1);
        assert!(matches!(
            decoded.ensure_complete(),
            Err(crate::Error::SkippedRecords(1))
        ));
    }

    #[test]
    fn test_complete_decode() {
        let decoded = decode("1\n1001,Ann,10,10,10,80\n");
        assert!(decoded.ensure_complete().is_ok());
        assert!(Decoded::default().ensure_complete().is_ok());
    }
}
