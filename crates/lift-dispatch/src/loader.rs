//! CSV call-script loader.
//!
//! # CSV format
//!
//! One row per call.  Rows need not be sorted.
//!
//! ```csv
//! time_ticks,origin,destination
//! 0,5,2
//! 150,1,9
//! 150,7,3
//! ```
//!
//! `time_ticks` is in simulation ticks (0.1 s).  Floors are checked when the
//! script is handed to a session, not here, since the loader does not know
//! the building.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use lift_core::{Floor, Tick};

use crate::{CallScript, DispatchError, ScriptedCall};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ScriptRecord {
    time_ticks:  u64,
    origin:      Floor,
    destination: Floor,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`CallScript`] from a CSV file.
pub fn load_script_csv(path: &Path) -> Result<CallScript, DispatchError> {
    let file = std::fs::File::open(path)
        .map_err(DispatchError::Io)?;
    load_script_reader(file)
}

/// Like [`load_script_csv`] but accepts any `Read` source.
pub fn load_script_reader<R: Read>(reader: R) -> Result<CallScript, DispatchError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let calls = csv_reader
        .deserialize::<ScriptRecord>()
        .map(|result| {
            let row = result.map_err(|e| DispatchError::Parse(e.to_string()))?;
            Ok(ScriptedCall::new(Tick(row.time_ticks), row.origin, row.destination))
        })
        .collect::<Result<Vec<_>, DispatchError>>()?;

    Ok(CallScript::new(calls))
}
