use serde::Serialize;
use wordbox_core::error::NormalizeError;

pub fn print<T: Serialize>(value: &T) -> Result<(), NormalizeError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
