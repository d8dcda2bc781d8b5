//! # Stimulus script interpreter module
//!
//! This module provides an interpreter for timestamped scripts. Each entry in
//! a script is a time in seconds followed by a JSON payload and a semicolon:
//!
//! ```text
//! 0.0: {"jack": true};
//! 1.5: {"jack": false};
//! ```
//!
//! Anything outside of entries (for example `#` comment lines) is ignored.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::fs;
use regex::RegexBuilder;
use serde::de::DeserializeOwned;
use thiserror::Error;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An entry which is scripted to occur at a specific time.
struct Entry<T> {
    /// The time the entry is supposed to execute at
    exec_time_s: f64,

    /// The payload to execute
    payload: T
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use
/// `.get_pending` to acquire the list of payloads that are now due.
pub struct ScriptInterpreter<T> {
    script_path: Option<PathBuf>,
    entries: VecDeque<Entry<T>>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0}")]
    ScriptNotFound(String),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script timestamps must not decrease, found {1} s after {0} s")]
    UnorderedTimestamp(f64, f64),

    #[error("Script contains an invalid payload at {0} s: {1}")]
    InvalidPayload(f64, serde_json::Error)
}

/// Payloads pending execution.
#[derive(Debug, PartialEq)]
pub enum Pending<T> {
    None,
    Some(Vec<T>),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<T> ScriptInterpreter<T>
where
    T: DeserializeOwned
{
    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        // Get the path in a buffer
        let path = PathBuf::from(script_path.as_ref());
        
        // Check that the script file exists.
        if !path.exists() {
            return Err(
                ScriptError::ScriptNotFound(path.display().to_string()));
        }

        // Load the script into a string
        let script = fs::read_to_string(&path)
            .map_err(ScriptError::ScriptLoadError)?;

        let mut si = Self::from_str(&script)?;
        si.script_path = Some(path);

        Ok(si)
    }

    /// Create a new interpreter from the contents of a script.
    pub fn from_str(script: &str) -> Result<Self, ScriptError> {

        // Empty queue of entries
        let mut queue: VecDeque<Entry<T>> = VecDeque::new();

        // Go through the script executing __the magic regex__.
        let re = RegexBuilder::
            new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .expect("Script regex is invalid");

        for cap in re.captures_iter(script) {
            // Parse the exec time
            let exec_time_s: f64 = cap[1].parse()
                .map_err(|e| ScriptError::InvalidTimestamp(format!("{}", e)))?;

            if let Some(last) = queue.back() {
                if exec_time_s < last.exec_time_s {
                    return Err(ScriptError::UnorderedTimestamp(
                        last.exec_time_s, exec_time_s
                    ))
                }
            }

            // Parse the payload, scripts contain JSON only.
            let payload = serde_json::from_str(&cap[3])
                .map_err(|e| ScriptError::InvalidPayload(exec_time_s, e))?;

            queue.push_back(Entry {
                exec_time_s,
                payload
            });
        }

        if queue.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        Ok(ScriptInterpreter {
            script_path: None,
            entries: queue
        })
    }
}

impl<T> ScriptInterpreter<T> {
    /// Return the payloads due at `current_time_s`, i.e. all entries whose
    /// execution time is not after the current time.
    pub fn get_pending(&mut self, current_time_s: f64) -> Pending<T> {

        // If the queue is empty the script is over and we return the end of
        // script variant
        if self.entries.is_empty() {
            return Pending::EndOfScript
        }

        let mut pending: Vec<T> = vec![];

        // Pop entries from the queue while the head's exec time has been
        // reached.
        while self.entries
            .front()
            .map_or(false, |e| e.exec_time_s <= current_time_s)
        {
            if let Some(e) = self.entries.pop_front() {
                pending.push(e.payload);
            }
        }

        if pending.is_empty() {
            Pending::None
        }
        else {
            Pending::Some(pending)
        }
    }

    /// Get the path the script was loaded from, `None` if it was built from
    /// a string.
    pub fn get_script_path(&self) -> Option<&Path> {
        self.script_path.as_deref()
    }

    /// Get the number of entries remaining in the script
    pub fn get_num_entries(&self) -> usize {
        self.entries.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.entries.back() {
            Some(e) => e.exec_time_s,
            None => 0f64
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Payload {
        jack: bool
    }

    const SCRIPT: &str = "\
        # Pull the jack after half a second\n\
        0.0: {\"jack\": true};\n\
        0.5: {\"jack\": false};\n\
        0.5: {\"jack\": false};\n\
        2: {\"jack\": true};\n";

    #[test]
    fn test_pending() {
        let mut si: ScriptInterpreter<Payload> = ScriptInterpreter::from_str(SCRIPT).unwrap();

        assert_eq!(si.get_num_entries(), 4);
        assert_eq!(si.get_duration(), 2.0);

        assert_eq!(si.get_pending(0.0), Pending::Some(vec![Payload { jack: true }]));
        assert_eq!(si.get_pending(0.2), Pending::None);
        assert_eq!(
            si.get_pending(1.0),
            Pending::Some(vec![Payload { jack: false }, Payload { jack: false }])
        );
        assert_eq!(si.get_pending(2.5), Pending::Some(vec![Payload { jack: true }]));
        assert_eq!(si.get_pending(3.0), Pending::EndOfScript);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            ScriptInterpreter::<Payload>::from_str("# nothing here\n"),
            Err(ScriptError::ScriptEmpty)
        ));
        assert!(matches!(
            ScriptInterpreter::<Payload>::from_str("1.0: {\"jack\": 3};"),
            Err(ScriptError::InvalidPayload(t, _)) if t == 1.0
        ));
        assert!(matches!(
            ScriptInterpreter::<Payload>::from_str(
                "1.0: {\"jack\": true};\n0.5: {\"jack\": false};"),
            Err(ScriptError::UnorderedTimestamp(_, _))
        ));
        assert!(matches!(
            ScriptInterpreter::<Payload>::new("/nonexistent/script.lfs"),
            Err(ScriptError::ScriptNotFound(_))
        ));
    }

    #[test]
    fn test_non_ascii_timestamp() {
        // Arabic-Indic digits match the entry pattern but are not a float
        assert!(matches!(
            ScriptInterpreter::<Payload>::from_str("\u{661}.5: {\"jack\": true};"),
            Err(ScriptError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_script_path() {
        let path = std::env::temp_dir()
            .join(format!("line_follower_script_{}.lfs", std::process::id()));
        fs::write(&path, SCRIPT).unwrap();

        let si: ScriptInterpreter<Payload> = ScriptInterpreter::new(&path).unwrap();
        assert_eq!(si.get_script_path(), Some(path.as_path()));
        assert_eq!(si.get_num_entries(), 4);

        let si: ScriptInterpreter<Payload> = ScriptInterpreter::from_str(SCRIPT).unwrap();
        assert_eq!(si.get_script_path(), None);

        fs::remove_file(path).ok();
    }
}
