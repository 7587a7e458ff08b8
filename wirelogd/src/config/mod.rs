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

//! # Configuration
//!
//! The wire logger can be configured from exactly one of two sources:
//! - a YAML configuration file (see [`cfgfile`])
//! - environment variables (see [`cfgenv`])
//!
//! Every source is parsed into a [`Configset`] which validates each value, collecting errors
//! and warnings as it goes. A successful parse yields an immutable [`LoggerOptions`]
//! snapshot; the engine never reads raw key/value pairs.

// std imports
use core::str::FromStr;
use std::env::VarError;
use std::fs;
use std::path::{Path, PathBuf};
// internal modules
mod cfgenv;
mod cfgfile;
mod definitions;
mod feedback;
// internal imports
use self::cfgfile::Config as ConfigFile;
pub use self::definitions::*;
pub use self::feedback::{ConfigError, ErrorStack, WarningStack};

type StaticStr = &'static str;

#[derive(Debug)]
/// An enum representing the outcome of a parse operation for a specific configuration item from a
/// specific configuration source
pub enum ConfigSourceParseResult<T> {
    Okay(T),
    Absent,
    ParseFailure,
}

/// A trait for configuration sources. Any type implementing this trait is considered to be a valid
/// source for configuration
pub trait TryFromConfigSource<T: Sized>: Sized {
    /// Attempt to mutate the value if present. If any error occurs
    /// while parsing the value, return true. Else return false if all went well.
    /// Here:
    /// - `target_value`: is a mutable reference to the target var
    /// - `trip`: is a mutable ref to a bool that will be set to true if a value is present
    /// (whether parseable or not)
    fn mutate_failed(self, target_value: &mut T, trip: &mut bool) -> bool;
    /// Attempt to parse the value into the target type
    fn try_parse(self) -> ConfigSourceParseResult<T>;
}

impl<'a, T: FromStr + 'a> TryFromConfigSource<T> for Option<&'a str> {
    fn mutate_failed(self, target_value: &mut T, trip: &mut bool) -> bool {
        self.map(|slf| {
            *trip = true;
            match slf.parse() {
                Ok(p) => {
                    *target_value = p;
                    false
                }
                Err(_) => true,
            }
        })
        .unwrap_or(false)
    }
    fn try_parse(self) -> ConfigSourceParseResult<T> {
        self.map(|s| {
            s.parse()
                .map(|ret| ConfigSourceParseResult::Okay(ret))
                .unwrap_or(ConfigSourceParseResult::ParseFailure)
        })
        .unwrap_or(ConfigSourceParseResult::Absent)
    }
}

impl<T: FromStr> TryFromConfigSource<T> for Result<String, VarError> {
    fn mutate_failed(self, target_value: &mut T, trip: &mut bool) -> bool {
        match self {
            Ok(s) => {
                *trip = true;
                s.parse()
                    .map(|v| {
                        *target_value = v;
                        false
                    })
                    .unwrap_or(true)
            }
            Err(e) => {
                if matches!(e, VarError::NotPresent) {
                    false
                } else {
                    // yes, we got the var but failed to parse it into unicode; so trip
                    *trip = true;
                    true
                }
            }
        }
    }
    fn try_parse(self) -> ConfigSourceParseResult<T> {
        match self {
            Ok(s) => s
                .parse()
                .map(|v| ConfigSourceParseResult::Okay(v))
                .unwrap_or(ConfigSourceParseResult::ParseFailure),
            Err(e) => match e {
                VarError::NotPresent => ConfigSourceParseResult::Absent,
                VarError::NotUnicode(_) => ConfigSourceParseResult::ParseFailure,
            },
        }
    }
}

/// An already typed, optional value (for example, decoded from a config file)
pub struct Optional<T> {
    base: Option<T>,
}

impl<T> Optional<T> {
    pub const fn some(val: T) -> Self {
        Self { base: Some(val) }
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(base: Option<T>) -> Self {
        Self { base }
    }
}

impl<T> TryFromConfigSource<T> for Optional<T> {
    fn mutate_failed(self, target: &mut T, trip: &mut bool) -> bool {
        if let Some(v) = self.base {
            *trip = true;
            *target = v;
        }
        false
    }
    fn try_parse(self) -> ConfigSourceParseResult<T> {
        match self.base {
            Some(v) => ConfigSourceParseResult::Okay(v),
            None => ConfigSourceParseResult::Absent,
        }
    }
}

#[derive(Debug)]
/// A high-level configuration set that automatically handles errors, warnings and provides a convenient [`Result`]
/// type that can be used
pub struct Configset {
    did_mutate: bool,
    cfg: LoggerOptions,
    estack: ErrorStack,
    wstack: WarningStack,
}

impl Configset {
    const EMSG_ENV: StaticStr = "Environment";
    const EMSG_FILE: StaticStr = "Configuration file";

    /// Internal ctor for a given feedback source. We do not want to expose this to avoid
    /// erroneous feedback source names
    fn _new(feedback_source: StaticStr) -> Self {
        Self {
            did_mutate: false,
            cfg: LoggerOptions::default(),
            estack: ErrorStack::new(feedback_source),
            wstack: WarningStack::new(feedback_source),
        }
    }
    /// Create a new configset for environment variables
    pub fn new_env() -> Self {
        Self::_new(Self::EMSG_ENV)
    }
    /// Create a new configset for config files
    pub fn new_file() -> Self {
        Self {
            did_mutate: true,
            ..Self::_new(Self::EMSG_FILE)
        }
    }
    /// Mark the configset mutated
    fn mutated(&mut self) {
        self.did_mutate = true;
    }
    /// Push an error onto the error stack
    fn epush(&mut self, field_key: StaticStr, expected: StaticStr) {
        self.estack
            .push(format!("Bad value for `{field_key}`. Expected {expected}"))
    }
    /// Check if no errors have occurred
    pub fn is_okay(&self) -> bool {
        self.estack.is_empty()
    }
    /// Check if the configset was mutated
    pub fn is_mutated(&self) -> bool {
        self.did_mutate
    }
    /// Attempt to mutate with a target `TryFromConfigSource` type, and push in any error that occurs
    /// using the given diagnostic info
    fn try_mutate<T>(
        &mut self,
        new: impl TryFromConfigSource<T>,
        target: &mut T,
        field_key: StaticStr,
        expected: StaticStr,
    ) {
        if new.mutate_failed(target, &mut self.did_mutate) {
            self.epush(field_key, expected)
        }
    }
    /// Attempt to mutate with a target `TryFromConfigSource` type, and push in any error that occurs
    /// using the given diagnostic info while checking the correctly parsed type using the provided validation
    /// closure for any additional validation check that goes beyond type correctness
    fn try_mutate_with_condcheck<T, F>(
        &mut self,
        new: impl TryFromConfigSource<T>,
        target: &mut T,
        field_key: StaticStr,
        expected: StaticStr,
        validation_fn: F,
    ) where
        F: Fn(&T) -> bool,
    {
        let mut needs_error = false;
        match new.try_parse() {
            ConfigSourceParseResult::Okay(ok) => {
                self.mutated();
                needs_error = !validation_fn(&ok);
                if !needs_error {
                    *target = ok;
                }
            }
            ConfigSourceParseResult::ParseFailure => {
                self.mutated();
                needs_error = true
            }
            ConfigSourceParseResult::Absent => {}
        }
        if needs_error {
            self.epush(field_key, expected)
        }
    }
    /// Turn this configset into the final configuration, printing any warnings. If any
    /// error occurred, the error stack is returned instead
    pub fn into_result(self) -> Result<LoggerOptions, ConfigError> {
        let Configset {
            cfg,
            estack,
            wstack,
            ..
        } = self;
        if estack.is_empty() {
            wstack.print_warnings();
            Ok(cfg)
        } else {
            Err(ConfigError::CfgError(estack))
        }
    }
}

// rotation settings
impl Configset {
    pub fn rotation_settings(
        &mut self,
        nmax_rows: impl TryFromConfigSource<usize>,
        nmax_rows_key: StaticStr,
    ) {
        let mut max_rows = DEFAULT_FILE_MAX_ROWS;
        self.try_mutate_with_condcheck(
            nmax_rows,
            &mut max_rows,
            nmax_rows_key,
            "a positive integer greater than zero",
            |rows| *rows > 0,
        );
        self.cfg.file_max_rows = max_rows;
    }
}

// buffer settings
impl Configset {
    pub fn buffer_settings(
        &mut self,
        nmax_in_memory: impl TryFromConfigSource<usize>,
        nmax_in_memory_key: StaticStr,
        nstream_buffer: impl TryFromConfigSource<usize>,
        nstream_buffer_key: StaticStr,
    ) {
        let mut max_in_memory = DEFAULT_MAX_IN_MEMORY_ENVELOPES;
        let mut stream_buffer = DEFAULT_STREAM_BUFFER_SIZE;
        self.try_mutate_with_condcheck(
            nmax_in_memory,
            &mut max_in_memory,
            nmax_in_memory_key,
            "a positive integer greater than zero",
            |envelopes| *envelopes > 0,
        );
        self.try_mutate_with_condcheck(
            nstream_buffer,
            &mut stream_buffer,
            nstream_buffer_key,
            "a buffer size in bytes greater than zero",
            |size| *size > 0,
        );
        self.cfg.max_in_memory_envelopes = max_in_memory;
        self.cfg.stream_buffer_size = stream_buffer;
    }
}

// csv settings
impl Configset {
    pub fn csv_settings(
        &mut self,
        nseparator: impl TryFromConfigSource<String>,
        nseparator_key: StaticStr,
    ) {
        let mut separator = DEFAULT_CSV_SEPARATOR.to_owned();
        self.try_mutate_with_condcheck(
            nseparator,
            &mut separator,
            nseparator_key,
            "a non-empty separator",
            |sep| !sep.is_empty() && !sep.contains(['\n', '\r']),
        );
        if separator.chars().count() > 1 {
            self.wstack.push(format!(
                "The separator `{separator}` (from `{nseparator_key}`) is longer than one character"
            ));
        }
        self.cfg.csv_separator = separator;
    }
}

// location settings
impl Configset {
    pub fn location_settings(
        &mut self,
        ndirectory: impl TryFromConfigSource<PathBuf>,
        ndirectory_key: StaticStr,
        nprefix: impl TryFromConfigSource<String>,
        nprefix_key: StaticStr,
        npid: impl TryFromConfigSource<String>,
        npid_key: StaticStr,
    ) {
        let mut directory = PathBuf::from(DEFAULT_LOG_DIRECTORY);
        let mut prefix = String::new();
        let mut pid = String::new();
        self.try_mutate_with_condcheck(
            ndirectory,
            &mut directory,
            ndirectory_key,
            "a non-empty directory path",
            |dir| !dir.as_os_str().is_empty(),
        );
        self.try_mutate_with_condcheck(
            nprefix,
            &mut prefix,
            nprefix_key,
            "a file name prefix without path separators",
            |prefix| !prefix.contains(['/', '\\']),
        );
        self.try_mutate_with_condcheck(
            npid,
            &mut pid,
            npid_key,
            "a service pid without path separators",
            |pid| !pid.contains(['/', '\\']),
        );
        self.cfg.log_directory = directory;
        self.cfg.log_file_prefix = prefix;
        self.cfg.service_pid = if pid.is_empty() { None } else { Some(pid) };
    }
}

// retention settings
impl Configset {
    pub fn retention_settings(
        &mut self,
        nmax_count: impl TryFromConfigSource<usize>,
        nmax_count_key: StaticStr,
    ) {
        let mut max_count = DEFAULT_MAX_LOGS;
        self.try_mutate(
            nmax_count,
            &mut max_count,
            nmax_count_key,
            "a non-negative integer",
        );
        if max_count == 0 {
            self.wstack.push(format!(
                "Only the seed log file survives retention when `{nmax_count_key}` is 0"
            ));
        }
        self.cfg.max_logs = max_count;
    }
}

// verbosity settings
impl Configset {
    pub fn verbosity_settings(
        &mut self,
        nverbosity: impl TryFromConfigSource<Verbosity>,
        nverbosity_key: StaticStr,
    ) {
        let mut verbosity = Verbosity::default();
        self.try_mutate(nverbosity, &mut verbosity, nverbosity_key, "QUIET/VERBOSE");
        self.cfg.verbosity = verbosity;
    }
}

/// Where the configuration was loaded from. Kept around so that the same source can be
/// re-read on a reload
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Env,
}

impl ConfigSource {
    pub fn new(config_file: Option<PathBuf>) -> Self {
        match config_file {
            Some(path) => Self::File(path),
            None => Self::Env,
        }
    }
    /// (Re)load the configuration from this source
    pub fn load(&self) -> Result<ConfigType, ConfigError> {
        match self {
            Self::File(path) => get_config(Some(path)),
            Self::Env => get_config(None),
        }
    }
}

/// Read a YAML config file into a configset
pub fn parse_config_file(file: impl AsRef<Path>) -> Result<Configset, ConfigError> {
    let raw = fs::read_to_string(file)?;
    parse_config_str(&raw)
}

pub(crate) fn parse_config_str(raw: &str) -> Result<Configset, ConfigError> {
    let cfg_file: ConfigFile = serde_yaml::from_str(raw)?;
    Ok(cfgfile::from_file(cfg_file))
}

pub fn get_config(config_file: Option<&Path>) -> Result<ConfigType, ConfigError> {
    // get config from file
    let cfg_from_file = match config_file {
        Some(file) => Some(parse_config_file(file)?),
        None => None,
    };
    // get config from env
    let cfg_from_env = cfgenv::parse_env_config();
    resolve_config(cfg_from_file, cfg_from_env)
}

fn resolve_config(
    cfg_from_file: Option<Configset>,
    cfg_from_env: Configset,
) -> Result<ConfigType, ConfigError> {
    // calculate the number of config sources
    let cfg_degree = cfg_from_env.is_mutated() as u8 + cfg_from_file.is_some() as u8;
    // if degree is more than 1, there is a conflict
    if cfg_degree > 1 {
        return Err(ConfigError::Conflict);
    }
    match cfg_from_file {
        Some(cfg) => cfg.into_result().map(ConfigType::Custom),
        None if cfg_from_env.is_mutated() => cfg_from_env.into_result().map(ConfigType::Custom),
        // no configuration, use default
        None => Ok(ConfigType::Def(LoggerOptions::default())),
    }
}
