use crate::error::{Error, Result};
use std::fmt;

pub const MIN_ID: u32 = 1000;
pub const MAX_ID: u32 = 9999;
pub const MAX_COURSEWORK: u32 = 20;
pub const MAX_EXAM: u32 = 100;
pub const COURSEWORK_SLOTS: usize = 3;
/// Highest reachable overall total (three coursework pieces plus the exam).
pub const MAX_TOTAL: u32 = MAX_COURSEWORK * COURSEWORK_SLOTS as u32 + MAX_EXAM;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StudentId(u32);

impl StudentId {
    pub fn new(id: u32) -> Result<Self> {
        if (MIN_ID..=MAX_ID).contains(&id) {
            Ok(StudentId(id))
        } else {
            Err(Error::out_of_range("student id", id, MIN_ID.into(), MAX_ID.into()))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for StudentId {
    type Error = Error;

    fn try_from(id: u32) -> Result<Self> {
        Self::new(id)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Band an overall total. Thresholds are 70/60/50/40 percent, compared
    /// on integers so that boundary totals land in the upper band.
    pub fn from_total(total: u32) -> Grade {
        let scaled = total.saturating_mul(100);
        if scaled >= 70 * MAX_TOTAL {
            Grade::A
        } else if scaled >= 60 * MAX_TOTAL {
            Grade::B
        } else if scaled >= 50 * MAX_TOTAL {
            Grade::C
        } else if scaled >= 40 * MAX_TOTAL {
            Grade::D
        } else {
            Grade::F
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(letter)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StudentRecord {
    id: StudentId,
    name: String,
    coursework: [u32; COURSEWORK_SLOTS],
    exam: u32,
}

impl StudentRecord {
    pub fn new(id: StudentId, name: &str, coursework: [u32; COURSEWORK_SLOTS], exam: u32) -> Result<Self> {
        let name = check_name(name)?;
        for &score in &coursework {
            check_coursework(score)?;
        }
        check_exam(exam)?;
        Ok(StudentRecord {
            id,
            name,
            coursework,
            exam,
        })
    }

    pub fn id(&self) -> StudentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coursework(&self) -> &[u32; COURSEWORK_SLOTS] {
        &self.coursework
    }

    pub fn exam(&self) -> u32 {
        self.exam
    }

    pub fn coursework_total(&self) -> u32 {
        self.coursework.iter().sum()
    }

    pub fn overall_total(&self) -> u32 {
        self.coursework_total() + self.exam
    }

    pub fn percentage(&self) -> f64 {
        f64::from(self.overall_total() * 100) / f64::from(MAX_TOTAL)
    }

    pub fn grade(&self) -> Grade {
        Grade::from_total(self.overall_total())
    }

    pub(crate) fn set_name(&mut self, name: &str) -> Result<()> {
        self.name = check_name(name)?;
        Ok(())
    }

    pub(crate) fn set_coursework(&mut self, slot: usize, score: u32) -> Result<()> {
        if slot >= COURSEWORK_SLOTS {
            return Err(Error::out_of_range(
                "coursework slot",
                slot as i64,
                0,
                COURSEWORK_SLOTS as i64 - 1,
            ));
        }
        self.coursework[slot] = check_coursework(score)?;
        Ok(())
    }

    pub(crate) fn set_exam(&mut self, exam: u32) -> Result<()> {
        self.exam = check_exam(exam)?;
        Ok(())
    }
}

impl fmt::Display for StudentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

fn check_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        Err(Error::EmptyName)
    } else if name.chars().any(char::is_control) {
        Err(Error::InvalidName(name.to_owned()))
    } else {
        Ok(name.to_owned())
    }
}

fn check_coursework(score: u32) -> Result<u32> {
    if score <= MAX_COURSEWORK {
        Ok(score)
    } else {
        Err(Error::out_of_range("coursework mark", score, 0, MAX_COURSEWORK.into()))
    }
}

fn check_exam(exam: u32) -> Result<u32> {
    if exam <= MAX_EXAM {
        Ok(exam)
    } else {
        Err(Error::out_of_range("exam mark", exam, 0, MAX_EXAM.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(coursework: [u32; 3], exam: u32) -> StudentRecord {
        StudentRecord::new(StudentId::new(1234).unwrap(), "Ann", coursework, exam).unwrap()
    }

    #[test]
    fn test_id_bounds() {
        assert!(StudentId::new(1000).is_ok());
        assert!(StudentId::new(9999).is_ok());
        assert!(matches!(StudentId::new(999), Err(Error::OutOfRange { .. })));
        assert!(matches!(StudentId::try_from(10000), Err(Error::OutOfRange { .. })));
    }

    #[test]
    fn test_derived_fields() {
        let r = record([20, 20, 20], 40);
        assert_eq!(r.coursework_total(), 60);
        assert_eq!(r.overall_total(), 100);
        assert_eq!(r.percentage(), 62.5);
        assert_eq!(r.grade(), Grade::B);
    }

    #[test]
    fn test_grade_boundaries() {
        let d = record([0, 0, 0], 64);
        assert_eq!(d.percentage(), 40.0);
        assert_eq!(d.grade(), Grade::D);
        let f = record([0, 0, 0], 63);
        assert_eq!(f.percentage(), 39.375);
        assert_eq!(f.grade(), Grade::F);
        assert_eq!(Grade::from_total(112), Grade::A);
        assert_eq!(Grade::from_total(111), Grade::B);
        assert_eq!(Grade::from_total(96), Grade::B);
        assert_eq!(Grade::from_total(80), Grade::C);
        assert_eq!(Grade::from_total(79), Grade::D);
        assert_eq!(Grade::from_total(160), Grade::A);
        assert_eq!(Grade::from_total(0), Grade::F);
        assert_eq!(Grade::from_total(u32::MAX), Grade::A);
    }

    #[test]
    fn test_name_is_trimmed() {
        let r = StudentRecord::new(StudentId::new(1001).unwrap(), "  Bob Smith ", [1, 2, 3], 4).unwrap();
        assert_eq!(r.name(), "Bob Smith");
        assert!(matches!(
            StudentRecord::new(StudentId::new(1001).unwrap(), "   ", [1, 2, 3], 4),
            Err(Error::EmptyName)
        ));
    }

    #[test]
    fn test_name_rejects_line_breaks() {
        let id = StudentId::new(1001).unwrap();
        for name in ["Ann\nLee", "Ann\rLee", "Ann\tLee", "Ann\u{7}"] {
            assert!(matches!(
                StudentRecord::new(id, name, [1, 2, 3], 4),
                Err(Error::InvalidName(_))
            ));
        }
        let mut r = record([1, 2, 3], 4);
        assert!(matches!(r.set_name("Ann\nLee"), Err(Error::InvalidName(_))));
        assert_eq!(r.name(), "Ann");
    }

    #[test]
    fn test_scores_are_checked() {
        let id = StudentId::new(1001).unwrap();
        assert!(matches!(
            StudentRecord::new(id, "Ann", [1, 21, 3], 4),
            Err(Error::OutOfRange { field: "coursework mark", value: 21, .. })
        ));
        assert!(matches!(
            StudentRecord::new(id, "Ann", [1, 2, 3], 101),
            Err(Error::OutOfRange { field: "exam mark", .. })
        ));
    }

    #[test]
    fn test_setters_leave_record_untouched_on_error() {
        let mut r = record([5, 5, 5], 50);
        assert!(r.set_coursework(3, 10).is_err());
        assert!(r.set_coursework(1, 21).is_err());
        assert!(r.set_exam(101).is_err());
        assert!(r.set_name(" ").is_err());
        assert_eq!(r, record([5, 5, 5], 50));
        r.set_coursework(2, 20).unwrap();
        assert_eq!(r.coursework(), &[5, 5, 20]);
    }
}
