//! Student marks: records with coursework and exam scores, derived grades,
//! class statistics and a flat-file store.

pub mod config;
pub mod display;
pub mod error;
pub mod loaders;
pub mod model;

pub use error::{Error, Result};
