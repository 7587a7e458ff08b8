/*
 * Created on Thu Jun 18 2026
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

//! # The wire logger
//!
//! Envelopes delivered to [`WireLogger::on_wire_receive`] are buffered and, once the
//! in-memory threshold is reached, written out as CSV rows to the open log file. A file is
//! rotated when it reaches the row threshold, or before any more rows are written if the
//! column set grew since it was opened. Every time a file is closed, retention trims the
//! log directory down to the configured number of files.
//!
//! All state lives in a single [`LoggerCore`] behind one lock, so deliveries, rotations and
//! reconfigurations never interleave.

mod buffer;
pub mod ids;
pub mod layout;
pub mod retention;
mod schema;
#[cfg(test)]
mod tests;
pub mod writer;

use self::{
    buffer::EnvelopeBuffer, ids::LogId, layout::LogDirectory, schema::ColumnSet,
    writer::RotationController,
};
use crate::{config::LoggerOptions, util::LogResult};
use libwire::{WireEnvelope, WireRecord};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// The logger's state while it is active
#[derive(Debug)]
pub struct LoggerCore {
    options: LoggerOptions,
    layout: LogDirectory,
    columns: ColumnSet,
    pending: EnvelopeBuffer,
    writer: RotationController,
}

impl LoggerCore {
    pub fn new(options: LoggerOptions) -> Self {
        Self {
            layout: Self::layout_for(&options),
            options,
            columns: ColumnSet::new(),
            pending: EnvelopeBuffer::new(),
            writer: RotationController::new(),
        }
    }
    fn layout_for(options: &LoggerOptions) -> LogDirectory {
        LogDirectory::new(options.log_directory(), options.log_file_prefix())
    }
    /// Buffer an envelope, running a write cycle if the buffer is full
    pub fn receive(&mut self, envelope: WireEnvelope) {
        if self.options.verbosity().is_verbose() {
            log::info!(
                "Received envelope from `{}` with {} record(s)",
                envelope.emitter_pid(),
                envelope.len()
            );
            for record in envelope.records() {
                log::info!("Record: {record:?}");
            }
        } else {
            log::trace!(
                "Received envelope from `{}` with {} record(s)",
                envelope.emitter_pid(),
                envelope.len()
            );
        }
        self.columns.observe_envelope(&envelope);
        self.pending.append(envelope);
        if self.pending.len() >= self.options.max_in_memory_envelopes() {
            if let Err(e) = self.flush_cycle() {
                log::error!(
                    "Failed to write log rows; {} envelope(s) will be retried: {e}",
                    self.pending.len()
                );
            }
        }
    }
    /// Write every buffered envelope. On failure, whatever wasn't written stays buffered
    pub fn flush_cycle(&mut self) -> LogResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        if self.columns.is_changed() && self.writer.is_open() {
            // new columns never go into a file whose header lacks them
            self.close_current();
        }
        let mut batch = self.pending.drain();
        let ret = self.write_pending(&mut batch);
        if !batch.is_empty() {
            self.pending.restore(batch);
        }
        ret?;
        if let Err(e) = self.writer.flush() {
            self.close_current();
            return Err(e);
        }
        Ok(())
    }
    fn write_pending(&mut self, batch: &mut VecDeque<WireEnvelope>) -> LogResult<()> {
        while let Some(mut envelope) = batch.pop_front() {
            let mut written = 0;
            while written < envelope.len() {
                if let Err(e) = self.write_record(&envelope.records()[written]) {
                    batch.push_front(envelope.split_off(written));
                    return Err(e);
                }
                written += 1;
            }
        }
        Ok(())
    }
    fn write_record(&mut self, record: &WireRecord) -> LogResult<()> {
        if !self.writer.is_open() {
            self.writer
                .open(&self.layout, self.options.stream_buffer_size())?;
            self.columns.clear_changed();
        }
        let rows = match self.writer.append(
            self.columns.as_slice(),
            record,
            self.options.csv_separator(),
        ) {
            Ok(rows) => rows,
            Err(e) => {
                // the row may be torn, so nothing else goes into this file
                self.close_current();
                return Err(e);
            }
        };
        if rows >= self.options.file_max_rows() {
            self.close_current();
        }
        Ok(())
    }
    /// Close the open file (if any) and run retention
    fn close_current(&mut self) {
        match self.writer.close() {
            Ok(Some(_)) => {}
            Ok(None) => return,
            Err(e) => log::error!("Failed to flush log file on close: {e}"),
        }
        retention::collect(&self.layout, self.options.max_logs());
    }
    /// Write out everything buffered and close the open file
    pub fn flush_and_close(&mut self) {
        if let Err(e) = self.flush_cycle() {
            log::error!(
                "Failed to write log rows; {} envelope(s) are still buffered: {e}",
                self.pending.len()
            );
        }
        self.close_current();
    }
    /// Install new options. Everything buffered is written under the old options first; if
    /// that fails, the envelopes stay buffered and the column set is rebuilt from them
    pub fn reconfigure(&mut self, options: LoggerOptions) {
        self.flush_and_close();
        self.columns.reset();
        for envelope in self.pending.iter() {
            self.columns.observe_envelope(envelope);
        }
        self.layout = Self::layout_for(&options);
        self.options = options;
        log::info!(
            "Logging to {} with prefix `{}`",
            self.layout.directory().display(),
            self.layout.prefix()
        );
    }
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
    pub fn columns(&self) -> &[String] {
        self.columns.as_slice()
    }
    pub fn open_log_id(&self) -> Option<LogId> {
        self.writer.open_id()
    }
    pub fn open_log_rows(&self) -> usize {
        self.writer.rows()
    }
}

/// # Wire logger
///
/// The lifecycle wrapper around [`LoggerCore`]: `activate` with the initial options,
/// `updated` on every reconfiguration and `deactivate` on shutdown. Envelopes delivered
/// while the logger isn't active are dropped.
#[derive(Debug, Default)]
pub struct WireLogger {
    core: Mutex<Option<LoggerCore>>,
}

impl WireLogger {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn activate(&self, options: LoggerOptions) {
        let mut core = self.core.lock();
        match core.as_mut() {
            Some(active) => {
                log::warn!("Wire logger is already active; reconfiguring");
                active.reconfigure(options);
            }
            None => {
                log::info!(
                    "Activating wire logger in {} with prefix `{}`",
                    options.log_directory().display(),
                    options.log_file_prefix()
                );
                *core = Some(LoggerCore::new(options));
            }
        }
    }
    pub fn updated(&self, options: LoggerOptions) {
        let mut core = self.core.lock();
        match core.as_mut() {
            Some(active) => {
                log::info!("Updating wire logger configuration");
                active.reconfigure(options);
            }
            None => {
                log::warn!("Wire logger was not active; activating with the updated configuration");
                *core = Some(LoggerCore::new(options));
            }
        }
    }
    pub fn deactivate(&self) {
        let Some(mut core) = self.core.lock().take() else {
            return;
        };
        core.flush_and_close();
        if core.pending_len() != 0 {
            log::error!(
                "Dropping {} envelope(s) that could not be written",
                core.pending_len()
            );
        }
        log::info!("Wire logger deactivated");
    }
    pub fn on_wire_receive(&self, envelope: WireEnvelope) {
        match self.core.lock().as_mut() {
            Some(core) => core.receive(envelope),
            None => log::debug!(
                "Wire logger is not active; dropping envelope from `{}`",
                envelope.emitter_pid()
            ),
        }
    }
    pub fn is_active(&self) -> bool {
        self.core.lock().is_some()
    }
    pub fn pending_len(&self) -> usize {
        self.core.lock().as_ref().map_or(0, LoggerCore::pending_len)
    }
    pub fn columns(&self) -> Vec<String> {
        self.core
            .lock()
            .as_ref()
            .map(|core| core.columns().to_vec())
            .unwrap_or_default()
    }
    pub fn open_log_id(&self) -> Option<LogId> {
        self.core.lock().as_ref().and_then(LoggerCore::open_log_id)
    }
}
