use crate::error::{Error, Result};
use crate::model::{MAX_EXAM, MAX_TOTAL, RecordStore, StudentRecord};
use serde::Serialize;
use std::fmt::Write;

const HEADERS: [&str; 7] = [
    "Name",
    "Student ID",
    "CW Total /60",
    "Exam /100",
    "Total /160",
    "Percentage",
    "Grade",
];

/// One line of the records table.
#[derive(Debug, Serialize)]
struct Row<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Student ID")]
    id: u32,
    #[serde(rename = "CW Total /60")]
    coursework: u32,
    #[serde(rename = "Exam /100")]
    exam: u32,
    #[serde(rename = "Total /160")]
    total: u32,
    #[serde(rename = "Percentage")]
    percentage: String,
    #[serde(rename = "Grade")]
    grade: String,
}

impl<'a> Row<'a> {
    fn new(r: &'a StudentRecord, precision: usize) -> Row<'a> {
        Row {
            name: r.name(),
            id: r.id().get(),
            coursework: r.coursework_total(),
            exam: r.exam(),
            total: r.overall_total(),
            percentage: format!("{:.*}", precision, r.percentage()),
            grade: r.grade().to_string(),
        }
    }

    fn cells(&self) -> [String; 7] {
        [
            self.name.to_owned(),
            self.id.to_string(),
            self.coursework.to_string(),
            self.exam.to_string(),
            self.total.to_string(),
            format!("{}%", self.percentage),
            self.grade.clone(),
        ]
    }
}

/// Render records as an aligned text table, names left-aligned and numbers
/// right-aligned.
pub fn render_table(records: &[&StudentRecord], precision: usize) -> String {
    let rows = records
        .iter()
        .map(|r| Row::new(r, precision).cells())
        .collect::<Vec<_>>();
    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let mut out = String::new();
    let header = HEADERS.map(str::to_owned);
    for row in std::iter::once(&header).chain(&rows) {
        let line = row
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(col, (cell, width))| {
                if col == 0 {
                    format!("{cell:<width$}")
                } else {
                    format!("{cell:>width$}")
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

pub fn render_csv(records: &[&StudentRecord], precision: usize) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for r in records {
        writer.serialize(Row::new(r, precision))?;
    }
    if records.is_empty() {
        writer.write_record(HEADERS)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Export(csv::Error::from(e.into_error())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Summary shown under a listing of the whole store.
pub fn status_line(store: &RecordStore) -> String {
    match store.class_average() {
        Ok(average) => format!(
            "Showing {} students • Class Average: {:.2}%",
            store.len(),
            average
        ),
        Err(_) => "No students found".to_owned(),
    }
}

/// One-line summary of a single record.
pub fn describe(r: &StudentRecord, precision: usize) -> String {
    let [cw1, cw2, cw3] = *r.coursework();
    format!(
        "{} ({}): coursework {cw1}+{cw2}+{cw3}={}, exam {}/{MAX_EXAM}, total {}/{MAX_TOTAL}, {:.*}%, grade {}",
        r.name(),
        r.id(),
        r.coursework_total(),
        r.exam(),
        r.overall_total(),
        precision,
        r.percentage(),
        r.grade()
    )
}
