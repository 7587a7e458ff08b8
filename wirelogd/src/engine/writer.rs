/*
 * Created on Mon Jun 22 2026
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

//! # Rotation controller
//!
//! Owns the single log file that may be open for writing. A file is either [`Closed`] or
//! [`Open`], and the only way between the two is through [`RotationController::open`] and
//! [`RotationController::close`]. Deciding *when* to rotate is up to the engine.
//!
//! [`Closed`]: FileState::Closed
//! [`Open`]: FileState::Open

use super::{
    ids::{self, LogId},
    layout::LogDirectory,
};
use crate::util::{LogError, LogResult};
use libwire::WireRecord;
use std::{
    fs::{File, OpenOptions},
    io::{self, BufWriter, Write},
};

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

#[derive(Debug)]
struct OpenLog {
    id: LogId,
    /// data rows written so far (the header doesn't count)
    rows: usize,
    out: BufWriter<File>,
}

#[derive(Debug)]
enum FileState {
    Closed,
    Open(OpenLog),
}

#[derive(Debug)]
pub struct RotationController {
    state: FileState,
}

impl Default for RotationController {
    fn default() -> Self {
        Self::new()
    }
}

impl RotationController {
    pub const fn new() -> Self {
        Self {
            state: FileState::Closed,
        }
    }
    pub const fn is_open(&self) -> bool {
        matches!(self.state, FileState::Open(_))
    }
    pub fn open_id(&self) -> Option<LogId> {
        match &self.state {
            FileState::Open(log) => Some(log.id),
            FileState::Closed => None,
        }
    }
    /// Rows written to the open file; 0 if no file is open
    pub fn rows(&self) -> usize {
        match &self.state {
            FileState::Open(log) => log.rows,
            FileState::Closed => 0,
        }
    }
    /// Open a new log file under a freshly allocated id. If a file is already open, its id
    /// is returned and nothing else happens
    pub fn open(&mut self, layout: &LogDirectory, stream_buffer_size: usize) -> LogResult<LogId> {
        if let FileState::Open(log) = &self.state {
            return Ok(log.id);
        }
        layout.ensure_exists()?;
        let id = ids::allocate(&layout.scan_ids()?).ok_or(LogError::IdsExhausted)?;
        let path = layout.file_path(id);
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| {
                LogError::ioerror_extra(e, format_args!("creating log file `{}`", path.display()))
            })?;
        log::info!("Opened log file {}", path.display());
        self.state = FileState::Open(OpenLog {
            id,
            rows: 0,
            out: BufWriter::with_capacity(stream_buffer_size, file),
        });
        Ok(id)
    }
    /// Append one record as a data row (preceded by the header if this is the first row of
    /// the file). Returns the number of data rows in the file after this write
    pub fn append(
        &mut self,
        columns: &[String],
        record: &WireRecord,
        separator: &str,
    ) -> LogResult<usize> {
        let log = match &mut self.state {
            FileState::Open(log) => log,
            FileState::Closed => return Err(LogError::NoOpenFile),
        };
        if log.rows == 0 {
            write_header(&mut log.out, columns, separator)?;
        }
        write_row(&mut log.out, columns, record, separator)?;
        log.rows += 1;
        Ok(log.rows)
    }
    /// Push buffered output down to the file
    pub fn flush(&mut self) -> LogResult<()> {
        if let FileState::Open(log) = &mut self.state {
            log.out.flush()?;
        }
        Ok(())
    }
    /// Flush and close the open file, returning its id. The file is closed even if the
    /// final flush fails
    pub fn close(&mut self) -> LogResult<Option<LogId>> {
        match core::mem::replace(&mut self.state, FileState::Closed) {
            FileState::Open(mut log) => {
                log.out.flush()?;
                log::info!("Closed log file {} after {} row(s)", log.id, log.rows);
                Ok(Some(log.id))
            }
            FileState::Closed => Ok(None),
        }
    }
}

/// Write the column names joined by the separator
pub fn write_header(out: &mut impl Write, columns: &[String], separator: &str) -> io::Result<()> {
    for (i, column) in columns.iter().enumerate() {
        if i != 0 {
            out.write_all(separator.as_bytes())?;
        }
        out.write_all(column.as_bytes())?;
    }
    out.write_all(LINE_ENDING.as_bytes())
}

/// Write one value per column (empty if the record doesn't have the field) joined by the
/// separator
pub fn write_row(
    out: &mut impl Write,
    columns: &[String],
    record: &WireRecord,
    separator: &str,
) -> io::Result<()> {
    for (i, column) in columns.iter().enumerate() {
        if i != 0 {
            out.write_all(separator.as_bytes())?;
        }
        if let Some(value) = record.get(column) {
            write!(out, "{value}")?;
        }
    }
    out.write_all(LINE_ENDING.as_bytes())
}
