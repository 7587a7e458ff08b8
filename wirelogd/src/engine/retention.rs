/*
 * Created on Sat Jun 20 2026
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

//! # Retention
//!
//! Keeps the number of log files in a directory at or below the configured cap by deleting
//! the oldest ones (smallest ids first). The seed log file (id 0) is never deleted, so with
//! a cap of 0 the seed file alone may remain.

use super::{
    ids::{LogId, SEED_LOG_ID},
    layout::LogDirectory,
};
use std::{
    collections::BTreeSet,
    fs,
    io::{self, ErrorKind},
    path::Path,
};

/// Returns the ids that have to go for `ids` to fit within `max_logs`, oldest first
pub fn select_expired(ids: &BTreeSet<LogId>, max_logs: usize) -> Vec<LogId> {
    let mut count = ids.len();
    let mut expired = Vec::new();
    for &id in ids {
        if count <= max_logs {
            break;
        }
        if id == SEED_LOG_ID {
            continue;
        }
        expired.push(id);
        count -= 1;
    }
    expired
}

/// Delete expired log files from the directory, returning the ids that were deleted (or
/// were already gone). A failed deletion is logged and the next file is tried
pub fn collect(layout: &LogDirectory, max_logs: usize) -> Vec<LogId> {
    collect_with(layout, max_logs, |path| fs::remove_file(path))
}

pub(super) fn collect_with(
    layout: &LogDirectory,
    max_logs: usize,
    remove: impl Fn(&Path) -> io::Result<()>,
) -> Vec<LogId> {
    let ids = match layout.scan_ids() {
        Ok(ids) => ids,
        Err(e) => {
            log::error!("Retention skipped: {e}");
            return Vec::new();
        }
    };
    let mut deleted = Vec::new();
    for id in select_expired(&ids, max_logs) {
        let path = layout.file_path(id);
        match remove(&path) {
            Ok(()) => {
                log::info!("Retention: deleted log file {}", path.display());
                deleted.push(id);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => deleted.push(id),
            Err(e) => log::error!("Retention: failed to delete {}: {e}", path.display()),
        }
    }
    deleted
}

#[cfg(test)]
mod tests {
    use super::{collect, collect_with, select_expired};
    use crate::{engine::layout::LogDirectory, util::test_utils::TestDir};
    use std::{
        collections::BTreeSet,
        fs,
        io::{Error, ErrorKind},
    };

    #[test]
    fn oldest_go_first_and_seed_stays() {
        let ids = BTreeSet::from([0, 1, 2, 3, 4]);
        assert_eq!(select_expired(&ids, 3), [1, 2]);
        assert_eq!(select_expired(&ids, 0), [1, 2, 3, 4]);
        assert!(select_expired(&ids, 5).is_empty());
        assert!(select_expired(&ids, 10).is_empty());
    }

    #[test]
    fn seed_alone_may_exceed_cap() {
        assert!(select_expired(&BTreeSet::from([0]), 0).is_empty());
    }

    #[test]
    fn without_seed() {
        let ids = BTreeSet::from([100, 200, 300]);
        assert_eq!(select_expired(&ids, 1), [100, 200]);
    }

    #[test]
    fn collect_deletes_from_disk() {
        let dir = TestDir::create("retention");
        for id in 0..5 {
            dir.touch(&format!("wirelog_{id}.csv"));
        }
        dir.touch("unrelated.txt");
        let layout = LogDirectory::new(dir.path(), "wirelog");
        assert_eq!(collect(&layout, 3), [1, 2]);
        assert_eq!(
            dir.file_names(),
            ["unrelated.txt", "wirelog_0.csv", "wirelog_3.csv", "wirelog_4.csv"]
        );
        // nothing more to do
        assert!(collect(&layout, 3).is_empty());
    }

    #[test]
    fn collect_on_missing_directory() {
        let dir = TestDir::new("retention-missing");
        let layout = LogDirectory::new(dir.path(), "wirelog");
        assert!(collect(&layout, 0).is_empty());
    }

    #[test]
    fn failed_deletion_moves_on() {
        let dir = TestDir::create("retention-failing");
        for id in 0..5 {
            dir.touch(&format!("wirelog_{id}.csv"));
        }
        let layout = LogDirectory::new(dir.path(), "wirelog");
        let stuck = layout.file_path(1);
        let deleted = collect_with(&layout, 3, |path| {
            if path == stuck.as_path() {
                Err(Error::new(ErrorKind::PermissionDenied, "denied"))
            } else {
                fs::remove_file(path)
            }
        });
        assert_eq!(deleted, [2]);
        assert_eq!(
            dir.file_names(),
            ["wirelog_0.csv", "wirelog_1.csv", "wirelog_3.csv", "wirelog_4.csv"]
        );
    }
}
