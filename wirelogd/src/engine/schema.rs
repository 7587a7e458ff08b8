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

//! The column set: every field name seen since the last reset, in the order in which it was
//! first seen. This order is the CSV column order and is never re-sorted.

use libwire::{WireEnvelope, WireRecord};
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct ColumnSet {
    /// columns in first-seen order
    columns: Vec<String>,
    /// membership index over `columns`
    seen: HashSet<String>,
    /// set when the column set grew; cleared by the writer when a new file is opened
    changed: bool,
}

impl ColumnSet {
    pub fn new() -> Self {
        Self::default()
    }
    /// Add the record's field names, returning true if the set grew
    pub fn observe(&mut self, record: &WireRecord) -> bool {
        let mut grew = false;
        for name in record.field_names() {
            if !self.seen.contains(name) {
                self.seen.insert(name.to_owned());
                self.columns.push(name.to_owned());
                grew = true;
            }
        }
        self.changed |= grew;
        grew
    }
    /// Observe every record in the envelope, returning true if the set grew
    pub fn observe_envelope(&mut self, envelope: &WireEnvelope) -> bool {
        envelope
            .records()
            .iter()
            .fold(false, |grew, record| self.observe(record) | grew)
    }
    /// Forget every column and the changed flag
    pub fn reset(&mut self) {
        self.columns.clear();
        self.seen.clear();
        self.changed = false;
    }
    /// Check if the set grew since the flag was last cleared
    pub const fn is_changed(&self) -> bool {
        self.changed
    }
    pub fn clear_changed(&mut self) {
        self.changed = false;
    }
    pub fn as_slice(&self) -> &[String] {
        &self.columns
    }
}
