/*
 * Created on Fri Jun 19 2026
 *
 * This file is a part of Wirelog
 * Wirelog is a free and open-source logger that turns a stream of
 * schema-drifting wire records into rotating CSV files with bounded
 * on-disk retention.
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 *
*/

use super::ids::LogId;
use crate::util::{LogError, LogResult};
use std::{
    collections::BTreeSet,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// The extension of every log file
pub const LOG_FILE_EXTENSION: &str = "csv";

/// # Log directory
///
/// Naming and discovery of the log files in one directory. Files are named
/// `<prefix>_<id>.csv`; anything else in the directory is not ours and is ignored.
///
/// The set of ids is always re-derived from the directory ([`Self::scan_ids`]) and never
/// cached, so a restarted logger picks up where the previous one left off.
#[derive(Debug, Clone, PartialEq)]
pub struct LogDirectory {
    directory: PathBuf,
    prefix: String,
}

impl LogDirectory {
    pub fn new(directory: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            prefix: prefix.into(),
        }
    }
    pub fn directory(&self) -> &Path {
        &self.directory
    }
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
    pub fn file_name(&self, id: LogId) -> String {
        format!("{}_{}.{}", self.prefix, id, LOG_FILE_EXTENSION)
    }
    pub fn file_path(&self, id: LogId) -> PathBuf {
        self.directory.join(self.file_name(id))
    }
    /// Returns the id if `name` is exactly `<prefix>_<digits>.csv`
    pub fn parse_file_name(&self, name: &str) -> Option<LogId> {
        let digits = name
            .strip_prefix(self.prefix.as_str())?
            .strip_prefix('_')?
            .strip_suffix(LOG_FILE_EXTENSION)?
            .strip_suffix('.')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // too many digits for a u64 is not one of ours either
        digits.parse().ok()
    }
    /// Create the directory (and its parents) if needed
    pub fn ensure_exists(&self) -> LogResult<()> {
        fs::create_dir_all(&self.directory).map_err(|e| {
            LogError::ioerror_extra(
                e,
                format_args!("creating log directory `{}`", self.directory.display()),
            )
        })
    }
    /// Returns the ids of the log files currently in the directory, in ascending order. A
    /// directory that doesn't exist yet has no log files
    pub fn scan_ids(&self) -> LogResult<BTreeSet<LogId>> {
        let mut ids = BTreeSet::new();
        let dir = match fs::read_dir(&self.directory) {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ids),
            Err(e) => {
                return Err(LogError::ioerror_extra(
                    e,
                    format_args!("listing log directory `{}`", self.directory.display()),
                ))
            }
        };
        for entry in dir {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            if let Some(id) = name.to_str().and_then(|n| self.parse_file_name(n)) {
                ids.insert(id);
            }
        }
        Ok(ids)
    }
}
