//! Replay Module
//!
//! Reads the counter and both logs of an operation and renders them for
//! inspection.

use std::fmt;
use std::io::{self, Write};

use serde::Serialize;

use crate::backend::Backend;
use crate::cache::{call_count, inputs_key, outputs_key};
use crate::error::Result;

// == Call Record ==
/// One historical call: rendered arguments and recorded outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallRecord {
    pub input: String,
    pub output: String,
}

// == History ==
/// Snapshot of an operation's instrumentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct History {
    /// Operation identity
    pub method: String,
    /// Counter value
    pub calls: u64,
    /// Inputs paired with outputs by position
    pub records: Vec<CallRecord>,
}

impl History {
    /// Loads the counter and logs recorded for `method`.
    ///
    /// Inputs and outputs are paired by index; an entry without a partner
    /// in the other log is left out.
    pub fn load(backend: &dyn Backend, method: &str) -> Result<Self> {
        let calls = call_count(backend, method)?;
        let inputs = backend.lrange(&inputs_key(method), 0, -1)?;
        let outputs = backend.lrange(&outputs_key(method), 0, -1)?;

        let records = inputs
            .into_iter()
            .zip(outputs)
            .map(|(input, output)| CallRecord {
                input: String::from_utf8_lossy(&input).into_owned(),
                output: String::from_utf8_lossy(&output).into_owned(),
            })
            .collect();

        Ok(Self {
            method: method.to_string(),
            calls,
            records,
        })
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} was called {} times:", self.method, self.calls)?;
        for record in &self.records {
            writeln!(f, "{}(*{}) -> {}", self.method, record.input, record.output)?;
        }
        Ok(())
    }
}

// == Replay ==
/// Prints the history of `method` to stdout.
pub fn replay(backend: &dyn Backend, method: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    replay_to(&mut out, backend, method)
}

/// Writes the history of `method` to `out`.
pub fn replay_to<W: Write>(out: &mut W, backend: &dyn Backend, method: &str) -> Result<()> {
    let history = History::load(backend, method)?;
    write!(out, "{}", history)?;
    out.flush()?;
    Ok(())
}
