pub use self::codec::{Decoded, decode, encode};
pub use self::file_loader::FileLoader;
pub use self::loader::Loader;

use crate::error::{Error, Result};

mod codec;
mod file_loader;
mod loader;

/// Load through `loader`, falling back to an empty store only when the
/// source does not exist yet. That error is handed back so that it can be
/// reported. A source that exists but cannot be read is an error, so that a
/// later save does not overwrite it.
pub fn load_or_empty(loader: &dyn Loader) -> Result<(Decoded, Option<Error>)> {
    match loader.load() {
        Ok(decoded) => Ok((decoded, None)),
        Err(e) if e.is_missing_source() => Ok((Decoded::default(), Some(e))),
        Err(e) => Err(e),
    }
}
