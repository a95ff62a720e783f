//! File-backed address registry.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::domain::MacAddress;
use crate::error::RegistryError;

/// Result of a conditional append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Address was new; one line was appended and the set updated
    Added,
    /// Address was already in the set; nothing written
    AlreadyPresent,
    /// No destination file selected; nothing written
    NoFileConfigured,
}

#[derive(Debug, Default)]
struct RegistryState {
    known_file: Option<PathBuf>,
    unknown_file: Option<PathBuf>,
    known: HashSet<MacAddress>,
    unknown: HashSet<MacAddress>,
}

/// Registry of known and unknown hardware addresses.
///
/// Shared between capture workers behind an `Arc`. Sets only ever grow.
/// Changing file paths while capture runs is allowed; loading a known file
/// is not atomic with concurrent appends, so callers should avoid
/// reselecting the known file during acquisition.
#[derive(Debug, Default)]
pub struct AddressRegistry {
    state: Mutex<RegistryState>,
}

impl AddressRegistry {
    /// Create an empty registry with no files selected.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        // Sets stay consistent even if a holder panicked: every mutation is a
        // single insert after a successful append.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Select the known-address file and load its contents.
    ///
    /// Returns the number of distinct addresses in the file. The path stays
    /// selected even when reading fails.
    pub fn set_known_file(&self, path: impl AsRef<Path>) -> Result<usize, RegistryError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RegistryError::FileNotFound(path.to_path_buf()));
        }

        self.lock().known_file = Some(path.to_path_buf());

        let loaded = read_addresses(path)?;
        let count = loaded.len();

        let mut state = self.lock();
        state.known.extend(loaded);
        info!(
            "Loaded {} addresses from {:?} ({} known total)",
            count,
            path,
            state.known.len()
        );

        Ok(count)
    }

    /// Select the unknown-address file. Nothing is read from it.
    pub fn set_unknown_file(&self, path: impl AsRef<Path>) -> Result<(), RegistryError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RegistryError::FileNotFound(path.to_path_buf()));
        }

        self.lock().unknown_file = Some(path.to_path_buf());
        info!("Unknown address file set to {:?}", path);
        Ok(())
    }

    pub fn known_file(&self) -> Option<PathBuf> {
        self.lock().known_file.clone()
    }

    pub fn unknown_file(&self) -> Option<PathBuf> {
        self.lock().unknown_file.clone()
    }

    pub fn is_known(&self, mac: &MacAddress) -> bool {
        self.lock().known.contains(mac)
    }

    pub fn is_unknown(&self, mac: &MacAddress) -> bool {
        self.lock().unknown.contains(mac)
    }

    pub fn known_count(&self) -> usize {
        self.lock().known.len()
    }

    pub fn unknown_count(&self) -> usize {
        self.lock().unknown.len()
    }

    /// Append `mac` to the unknown file unless already recorded.
    pub fn record_unknown_if_new(&self, mac: &MacAddress) -> Result<RecordOutcome, RegistryError> {
        let mut state = self.lock();
        let RegistryState {
            unknown_file,
            unknown,
            ..
        } = &mut *state;
        record_if_new(unknown_file.as_deref(), unknown, mac)
    }

    /// Append `mac` to the known file unless already present.
    ///
    /// Used by acquisition, which records everything it sees regardless of
    /// the unknown set.
    pub fn record_known_if_new(&self, mac: &MacAddress) -> Result<RecordOutcome, RegistryError> {
        let mut state = self.lock();
        let RegistryState {
            known_file, known, ..
        } = &mut *state;
        record_if_new(known_file.as_deref(), known, mac)
    }
}

/// Check-then-append. Caller holds the registry lock.
fn record_if_new(
    file: Option<&Path>,
    set: &mut HashSet<MacAddress>,
    mac: &MacAddress,
) -> Result<RecordOutcome, RegistryError> {
    let Some(path) = file else {
        return Ok(RecordOutcome::NoFileConfigured);
    };

    if set.contains(mac) {
        return Ok(RecordOutcome::AlreadyPresent);
    }

    append_line(path, mac.as_str())?;
    set.insert(mac.clone());
    debug!("Appended {} to {:?}", mac, path);
    Ok(RecordOutcome::Added)
}

/// Append one line. Never truncates.
fn append_line(path: &Path, line: &str) -> Result<(), RegistryError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| RegistryError::io(path, e))?;

    writeln!(file, "{}", line).map_err(|e| RegistryError::io(path, e))
}

/// Read one address per line, skipping blanks.
///
/// Lines that are not valid UTF-8 are skipped with a warning so the rest
/// of the file still loads.
fn read_addresses(path: &Path) -> Result<HashSet<MacAddress>, RegistryError> {
    let file = File::open(path).map_err(|e| RegistryError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut addresses = HashSet::new();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| RegistryError::io(path, e))?;
        if read == 0 {
            break;
        }
        line_no += 1;

        match std::str::from_utf8(&buf) {
            Ok(line) => {
                if let Some(mac) = MacAddress::normalize(line) {
                    addresses.insert(mac);
                }
            }
            Err(e) => warn!("Skipping line {} of {:?}: {}", line_no, path, e),
        }
    }

    Ok(addresses)
}
