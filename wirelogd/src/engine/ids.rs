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

//! Log file identifiers
//!
//! An id is the wall clock time (milliseconds since the UNIX epoch) at which the file was
//! created, bumped past the newest id on disk if the clock says otherwise. Hence ids are
//! unique within a directory and their numeric order is their age order, which is all
//! retention needs to find the oldest file.

use chrono::Utc;
use std::collections::BTreeSet;

pub type LogId = u64;

/// The seed log file. Retention never deletes it
pub const SEED_LOG_ID: LogId = 0;

/// Allocate a new id that is strictly greater than every id in `existing`. Returns `None`
/// if `u64::MAX` is already taken
pub fn allocate(existing: &BTreeSet<LogId>) -> Option<LogId> {
    allocate_from(now_millis(), existing)
}

/// Same as [`allocate`], but with an explicit candidate instead of the current time
pub fn allocate_from(candidate: LogId, existing: &BTreeSet<LogId>) -> Option<LogId> {
    match existing.last() {
        Some(&latest) if candidate <= latest => {
            // never write a log into the past
            let Some(adjusted) = latest.checked_add(1) else {
                log::error!("Log ID {candidate} is in the past and no ID after {latest} exists");
                return None;
            };
            log::warn!("Log ID {candidate} is in the past. Adjusting ID to {latest} + 1 = {adjusted}");
            Some(adjusted)
        }
        _ => Some(candidate),
    }
}

fn now_millis() -> LogId {
    Utc::now().timestamp_millis().max(0) as LogId
}
