use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::Path,
};

use derive_more::{Display, Error, From};
use serde::Serialize;

/// The permissions of the files we create, on platforms that have them
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o644;

/// An error that occurred while writing the output
#[derive(Debug, From, Display, Error)]
pub enum OutputError {
    #[display("unable to serialize the output: {_0}")]
    Serialization(serde_json::Error),
    #[display("unable to write the output: {_0}")]
    Io(io::Error),
}

/// Render a value as indented JSON
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, OutputError> {
    Ok(serde_json::to_vec_pretty(value)?)
}

/// Serialize a value and write it to the given path, replacing whatever is
/// there. Nothing is written if serialization fails.
pub fn write_json<T: Serialize + ?Sized, P: AsRef<Path>>(
    path: P,
    value: &T,
) -> Result<(), OutputError> {
    let contents = to_json(value)?;
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(OUTPUT_MODE);
    }
    let mut file = options.open(path)?;
    file.write_all(&contents)?;
    Ok(())
}
