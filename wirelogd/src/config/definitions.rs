/*
 * Created on Mon Jun 15 2026
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

use core::{fmt, str::FromStr};
use serde::{
    de::{self, Deserializer, Visitor},
    Deserialize,
};
use std::path::{Path, PathBuf};

// defaults
pub const DEFAULT_FILE_MAX_ROWS: usize = 40_000;
pub const DEFAULT_MAX_IN_MEMORY_ENVELOPES: usize = 10;
pub const DEFAULT_STREAM_BUFFER_SIZE: usize = 8192;
pub const DEFAULT_CSV_SEPARATOR: &str = ",";
pub const DEFAULT_LOG_DIRECTORY: &str = "/var/log/";
pub const DEFAULT_LOG_FILE_PREFIX: &str = "wirelog";
pub const DEFAULT_MAX_LOGS: usize = 10;

/// How chatty the logger is about the envelopes it receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    #[default]
    Quiet,
    Verbose,
}

impl Verbosity {
    pub const fn is_verbose(&self) -> bool {
        matches!(self, Self::Verbose)
    }
}

impl FromStr for Verbosity {
    type Err = ();
    fn from_str(st: &str) -> Result<Verbosity, Self::Err> {
        if st.eq_ignore_ascii_case("quiet") {
            Ok(Verbosity::Quiet)
        } else if st.eq_ignore_ascii_case("verbose") {
            Ok(Verbosity::Verbose)
        } else {
            Err(())
        }
    }
}

struct VerbosityVisitor;

impl<'de> Visitor<'de> for VerbosityVisitor {
    type Value = Verbosity;
    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Expecting a string with the logging verbosity (QUIET or VERBOSE)")
    }
    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        value
            .parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}

impl<'de> Deserialize<'de> for Verbosity {
    fn deserialize<D>(deserializer: D) -> Result<Verbosity, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(VerbosityVisitor)
    }
}

/// # Logger options
///
/// The validated, immutable configuration snapshot of the wire logger. A new snapshot is
/// built for every (re)configuration; the engine never mutates one in place.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggerOptions {
    /// rows per file before the file is closed
    pub(super) file_max_rows: usize,
    /// envelopes kept in memory before a write cycle is triggered
    pub(super) max_in_memory_envelopes: usize,
    /// capacity of the buffered writer, in bytes
    pub(super) stream_buffer_size: usize,
    pub(super) csv_separator: String,
    pub(super) log_directory: PathBuf,
    /// the configured prefix (empty if not configured)
    pub(super) log_file_prefix: String,
    /// maximum number of log files retained on disk
    pub(super) max_logs: usize,
    pub(super) verbosity: Verbosity,
    /// an instance-identifying string, used as the prefix if none is configured
    pub(super) service_pid: Option<String>,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            file_max_rows: DEFAULT_FILE_MAX_ROWS,
            max_in_memory_envelopes: DEFAULT_MAX_IN_MEMORY_ENVELOPES,
            stream_buffer_size: DEFAULT_STREAM_BUFFER_SIZE,
            csv_separator: DEFAULT_CSV_SEPARATOR.to_owned(),
            log_directory: PathBuf::from(DEFAULT_LOG_DIRECTORY),
            log_file_prefix: String::new(),
            max_logs: DEFAULT_MAX_LOGS,
            verbosity: Verbosity::Quiet,
            service_pid: None,
        }
    }
}

impl LoggerOptions {
    /// Returns the default options, writing to the given directory
    pub fn new_in(log_directory: impl Into<PathBuf>) -> Self {
        Self {
            log_directory: log_directory.into(),
            ..Self::default()
        }
    }
    pub const fn file_max_rows(&self) -> usize {
        self.file_max_rows
    }
    pub const fn max_in_memory_envelopes(&self) -> usize {
        self.max_in_memory_envelopes
    }
    pub const fn stream_buffer_size(&self) -> usize {
        self.stream_buffer_size
    }
    pub fn csv_separator(&self) -> &str {
        &self.csv_separator
    }
    pub fn log_directory(&self) -> &Path {
        &self.log_directory
    }
    /// Returns the effective file name prefix:
    /// - the configured prefix, if non-empty
    /// - else the service pid, if non-empty
    /// - else `wirelog`
    pub fn log_file_prefix(&self) -> &str {
        if !self.log_file_prefix.is_empty() {
            return &self.log_file_prefix;
        }
        match self.service_pid.as_deref() {
            Some(pid) if !pid.is_empty() => pid,
            _ => DEFAULT_LOG_FILE_PREFIX,
        }
    }
    pub const fn max_logs(&self) -> usize {
        self.max_logs
    }
    pub const fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
    pub fn service_pid(&self) -> Option<&str> {
        self.service_pid.as_deref()
    }
}

// builder-style setters; used by embedders that construct options in code instead of
// going through a `Configset`. no validation happens here
impl LoggerOptions {
    pub fn with_file_max_rows(mut self, rows: usize) -> Self {
        self.file_max_rows = rows;
        self
    }
    pub fn with_max_in_memory_envelopes(mut self, envelopes: usize) -> Self {
        self.max_in_memory_envelopes = envelopes;
        self
    }
    pub fn with_stream_buffer_size(mut self, size: usize) -> Self {
        self.stream_buffer_size = size;
        self
    }
    pub fn with_csv_separator(mut self, separator: impl Into<String>) -> Self {
        self.csv_separator = separator.into();
        self
    }
    pub fn with_log_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_file_prefix = prefix.into();
        self
    }
    pub fn with_max_logs(mut self, max_logs: usize) -> Self {
        self.max_logs = max_logs;
        self
    }
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }
    pub fn with_service_pid(mut self, pid: impl Into<String>) -> Self {
        self.service_pid = Some(pid.into());
        self
    }
}

/// The type of configuration:
/// - The default configuration
/// - A custom supplied configuration
#[derive(Debug, PartialEq)]
pub enum ConfigType {
    Def(LoggerOptions),
    Custom(LoggerOptions),
}

impl ConfigType {
    pub fn into_options(self) -> LoggerOptions {
        match self {
            Self::Def(o) | Self::Custom(o) => o,
        }
    }
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}
