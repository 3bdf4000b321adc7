pub mod bfs;
pub mod convert;
pub mod inspect;
pub mod random;

use std::error::Error;

use serde::Serialize;

/// Prints `value` to stdout as pretty JSON.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
