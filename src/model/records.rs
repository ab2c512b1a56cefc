use super::*;
use crate::error::{Error, Result};
use tracing::{debug, trace};

/// A change to a single field of a record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldUpdate {
    Name(String),
    /// `slot` is zero-based.
    Coursework { slot: usize, score: u32 },
    Exam(u32),
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum NameMatch {
    #[default]
    CaseInsensitive,
    Exact,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortKey {
    Name,
    Id,
    Percentage,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Extremum {
    Highest,
    Lowest,
}

/// The records of one session, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    records: Vec<StudentRecord>,
}

impl RecordStore {
    pub fn new() -> RecordStore {
        RecordStore::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: StudentId) -> bool {
        self.position(id).is_some()
    }

    pub fn all(&self) -> &[StudentRecord] {
        &self.records
    }

    fn position(&self, id: StudentId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    pub fn add(&mut self, record: StudentRecord) -> Result<()> {
        if self.contains(record.id()) {
            return Err(Error::DuplicateId(record.id()));
        }
        debug!(student = %record, "adding student");
        self.records.push(record);
        Ok(())
    }

    pub fn remove(&mut self, id: StudentId) -> Result<StudentRecord> {
        let pos = self
            .position(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        let record = self.records.remove(pos);
        debug!(student = %record, "removed student");
        Ok(record)
    }

    /// Apply `change` to the record with the given id. An invalid value
    /// leaves the record as it was.
    pub fn update(&mut self, id: StudentId, change: FieldUpdate) -> Result<&StudentRecord> {
        let pos = self
            .position(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        let record = &mut self.records[pos];
        trace!(student = %record, ?change, "updating student");
        match change {
            FieldUpdate::Name(name) => record.set_name(&name)?,
            FieldUpdate::Coursework { slot, score } => record.set_coursework(slot, score)?,
            FieldUpdate::Exam(exam) => record.set_exam(exam)?,
        }
        Ok(&*record)
    }

    pub fn find_by_id(&self, id: StudentId) -> Result<&StudentRecord> {
        self.records
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Whole-name lookup, never a substring match.
    pub fn find_by_name(&self, name: &str, matching: NameMatch) -> Result<&StudentRecord> {
        let name = name.trim();
        let found = match matching {
            NameMatch::Exact => self.records.iter().find(|r| r.name() == name),
            NameMatch::CaseInsensitive => {
                let name = name.to_lowercase();
                self.records
                    .iter()
                    .find(|r| r.name().to_lowercase() == name)
            }
        };
        found.ok_or_else(|| Error::NotFound(format!("\"{name}\"")))
    }

    /// Look up by id when `query` is all digits, by case-insensitive name
    /// otherwise.
    pub fn find(&self, query: &str) -> Result<&StudentRecord> {
        let query = query.trim();
        if !query.is_empty() && query.chars().all(|c| c.is_ascii_digit()) {
            let id = query
                .parse::<u32>()
                .ok()
                .and_then(|id| StudentId::new(id).ok())
                .ok_or_else(|| Error::NotFound(query.to_owned()))?;
            self.find_by_id(id)
        } else {
            self.find_by_name(query, NameMatch::CaseInsensitive)
        }
    }

    /// A sorted copy of the records. Equal keys keep their insertion order,
    /// whatever the direction.
    pub fn sorted_by(&self, key: SortKey, descending: bool) -> Vec<&StudentRecord> {
        let mut sorted = self.records.iter().collect::<Vec<_>>();
        let compare = |a: &&StudentRecord, b: &&StudentRecord| match key {
            SortKey::Name => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
            SortKey::Id => a.id().cmp(&b.id()),
            // Percentage is monotonic in the overall total.
            SortKey::Percentage => a.overall_total().cmp(&b.overall_total()),
        };
        if descending {
            sorted.sort_by(|a, b| compare(b, a));
        } else {
            sorted.sort_by(compare);
        }
        sorted
    }

    /// The record with the highest or lowest percentage. On ties the first
    /// record in iteration order wins.
    pub fn extremum(&self, which: Extremum) -> Result<&StudentRecord> {
        let mut records = self.records.iter();
        let first = records.next().ok_or(Error::EmptyStore)?;
        Ok(records.fold(first, |best, r| {
            let better = match which {
                Extremum::Highest => r.overall_total() > best.overall_total(),
                Extremum::Lowest => r.overall_total() < best.overall_total(),
            };
            if better { r } else { best }
        }))
    }

    pub fn class_average(&self) -> Result<f64> {
        if self.records.is_empty() {
            return Err(Error::EmptyStore);
        }
        let sum = self.records.iter().map(StudentRecord::percentage).sum::<f64>();
        Ok(sum / self.records.len() as f64)
    }
}
