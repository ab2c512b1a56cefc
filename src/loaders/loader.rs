use super::Decoded;
use crate::error::Result;
use crate::model::RecordStore;

pub trait Loader {
    fn load(&self) -> Result<Decoded>;
    fn save(&self, store: &RecordStore) -> Result<()>;
}
