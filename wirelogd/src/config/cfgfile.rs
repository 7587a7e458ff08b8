/*
 * Created on Tue Jun 16 2026
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

use super::{Configset, Optional, Verbosity};
use serde::Deserialize;
use std::path::PathBuf;

/// This struct is an _object representation_ used for parsing the YAML file
///
/// ```yaml
/// log:
///   max.rows: 40000
///   max.in.memory.envelopes: 10
///   stream.buffer.size: 8192
///   csv.separator: ","
///   directory: /var/log/
///   file.prefix: wirelog
///   max.count: 10
///   verbosity: QUIET
///   service.pid: wire-logger-1
/// ```
#[derive(Deserialize, Debug, PartialEq)]
pub struct Config {
    /// The `log` key
    pub(super) log: ConfigKeyLog,
}

/// This struct represents the `log` key in the YAML file. Every key is optional; absent
/// keys take their default value
#[derive(Deserialize, Debug, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigKeyLog {
    /// The number of rows after which a log file is closed
    #[serde(rename = "max.rows")]
    pub(super) max_rows: Option<usize>,
    /// The number of envelopes buffered before they're written out
    #[serde(rename = "max.in.memory.envelopes")]
    pub(super) max_in_memory: Option<usize>,
    #[serde(rename = "stream.buffer.size")]
    pub(super) stream_buffer_size: Option<usize>,
    #[serde(rename = "csv.separator")]
    pub(super) csv_separator: Option<String>,
    pub(super) directory: Option<PathBuf>,
    #[serde(rename = "file.prefix")]
    pub(super) file_prefix: Option<String>,
    /// The maximum number of log files to keep
    #[serde(rename = "max.count")]
    pub(super) max_count: Option<usize>,
    pub(super) verbosity: Option<Verbosity>,
    #[serde(rename = "service.pid")]
    pub(super) service_pid: Option<String>,
}

pub fn from_file(file: Config) -> Configset {
    let mut set = Configset::new_file();
    let ConfigKeyLog {
        max_rows,
        max_in_memory,
        stream_buffer_size,
        csv_separator,
        directory,
        file_prefix,
        max_count,
        verbosity,
        service_pid,
    } = file.log;
    set.rotation_settings(Optional::from(max_rows), "log.max.rows");
    set.buffer_settings(
        Optional::from(max_in_memory),
        "log.max.in.memory.envelopes",
        Optional::from(stream_buffer_size),
        "log.stream.buffer.size",
    );
    set.csv_settings(Optional::from(csv_separator), "log.csv.separator");
    set.location_settings(
        Optional::from(directory),
        "log.directory",
        Optional::from(file_prefix),
        "log.file.prefix",
        Optional::from(service_pid),
        "log.service.pid",
    );
    set.retention_settings(Optional::from(max_count), "log.max.count");
    set.verbosity_settings(Optional::from(verbosity), "log.verbosity");
    set
}
