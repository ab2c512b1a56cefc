pub use self::records::{Extremum, FieldUpdate, NameMatch, RecordStore, SortKey};
pub use self::student::*;

mod records;
mod student;
