/*
 * Created on Tue Jun 23 2026
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

use super::{layout::LogDirectory, LoggerCore, WireLogger};
use crate::{
    config::{LoggerOptions, Verbosity},
    util::test_utils::TestDir,
};
use libwire::{WireEnvelope, WireRecord};
use std::fs;

fn envelope(record: WireRecord) -> WireEnvelope {
    WireEnvelope::new("test.emitter", vec![record])
}

fn reading(sensor: &str, value: i32) -> WireRecord {
    WireRecord::new()
        .with_field("sensor", sensor)
        .with_field("value", value)
}

/// Returns the lines of every log file in the directory, oldest file first
fn log_files(dir: &TestDir, prefix: &str) -> Vec<Vec<String>> {
    let layout = LogDirectory::new(dir.path(), prefix);
    layout
        .scan_ids()
        .unwrap()
        .into_iter()
        .map(|id| dir.read_lines(&layout.file_name(id)))
        .collect()
}

#[test]
fn header_follows_first_seen_order() {
    let dir = TestDir::new("engine-header");
    let mut core = LoggerCore::new(LoggerOptions::new_in(dir.path()).with_max_in_memory_envelopes(1));
    for i in 0..4i32 {
        core.receive(envelope(
            WireRecord::new()
                .with_field("zeta", i)
                .with_field("alpha", i * 10)
                .with_field("mid", "m"),
        ));
    }
    core.flush_and_close();
    let files = log_files(&dir, "wirelog");
    assert_eq!(files.len(), 1);
    assert_eq!(
        files[0],
        ["zeta,alpha,mid", "0,0,m", "1,10,m", "2,20,m", "3,30,m"]
    );
}

#[test]
fn reaching_buffer_threshold_flushes_once() {
    let dir = TestDir::new("engine-threshold");
    let mut core = LoggerCore::new(LoggerOptions::new_in(dir.path()).with_max_in_memory_envelopes(3));
    core.receive(envelope(reading("a", 1)));
    core.receive(envelope(reading("a", 2)));
    assert_eq!(core.pending_len(), 2);
    // nothing touched the disk yet
    assert!(dir.file_names().is_empty());
    core.receive(envelope(reading("a", 3)));
    assert_eq!(core.pending_len(), 0);
    assert!(core.open_log_id().is_some());
    assert_eq!(core.open_log_rows(), 3);
    // flushed, so readable while still open
    let files = log_files(&dir, "wirelog");
    assert_eq!(files, [["sensor,value", "a,1", "a,2", "a,3"]]);
}

#[test]
fn schema_change_rotates_before_writing() {
    let dir = TestDir::new("engine-schema");
    let mut core = LoggerCore::new(LoggerOptions::new_in(dir.path()).with_max_in_memory_envelopes(1));
    core.receive(envelope(reading("a", 1)));
    let first = core.open_log_id().unwrap();
    core.receive(envelope(reading("b", 2).with_field("unit", "C")));
    let second = core.open_log_id().unwrap();
    assert!(second > first);
    core.receive(envelope(reading("c", 3)));
    assert_eq!(core.open_log_id(), Some(second));
    core.flush_and_close();
    let files = log_files(&dir, "wirelog");
    assert_eq!(files.len(), 2);
    assert_eq!(files[0], ["sensor,value", "a,1"]);
    assert_eq!(files[1], ["sensor,value,unit", "b,2,C", "c,3,"]);
}

#[test]
fn schema_change_in_buffer_closes_open_file() {
    let dir = TestDir::new("engine-schema-buffered");
    let mut core = LoggerCore::new(LoggerOptions::new_in(dir.path()).with_max_in_memory_envelopes(2));
    core.receive(envelope(reading("a", 1)));
    core.receive(envelope(reading("a", 2)));
    let first = core.open_log_id().unwrap();
    // same columns, then a new one, in the same write cycle
    core.receive(envelope(reading("a", 3)));
    core.receive(envelope(WireRecord::new().with_field("extra", true)));
    assert_ne!(core.open_log_id(), Some(first));
    core.flush_and_close();
    let files = log_files(&dir, "wirelog");
    assert_eq!(files.len(), 2);
    assert_eq!(files[0], ["sensor,value", "a,1", "a,2"]);
    assert_eq!(files[1], ["sensor,value,extra", "a,3,", ",,true"]);
}

#[test]
fn row_threshold_is_exact() {
    let dir = TestDir::new("engine-rows");
    let mut core = LoggerCore::new(
        LoggerOptions::new_in(dir.path())
            .with_file_max_rows(3)
            .with_max_in_memory_envelopes(7),
    );
    for i in 0..7 {
        core.receive(envelope(reading("s", i)));
    }
    // 3 + 3 rows were closed mid-cycle, the last row stays open
    assert_eq!(core.open_log_rows(), 1);
    core.flush_and_close();
    let files = log_files(&dir, "wirelog");
    let rows: Vec<usize> = files.iter().map(|f| f.len() - 1).collect();
    assert_eq!(rows, [3, 3, 1]);
    assert_eq!(files[1], ["sensor,value", "s,3", "s,4", "s,5"]);
}

#[test]
fn multi_record_envelope_spans_files() {
    let dir = TestDir::new("engine-span");
    let mut core = LoggerCore::new(
        LoggerOptions::new_in(dir.path())
            .with_file_max_rows(2)
            .with_max_in_memory_envelopes(1),
    );
    core.receive(WireEnvelope::new(
        "batch",
        (0..5).map(|i| reading("s", i)).collect(),
    ));
    assert_eq!(core.pending_len(), 0);
    core.flush_and_close();
    let rows: Vec<usize> = log_files(&dir, "wirelog")
        .iter()
        .map(|f| f.len() - 1)
        .collect();
    assert_eq!(rows, [2, 2, 1]);
}

#[test]
fn line_and_field_counts() {
    let dir = TestDir::new("engine-shape");
    let mut core = LoggerCore::new(
        LoggerOptions::new_in(dir.path())
            .with_csv_separator(";")
            .with_max_in_memory_envelopes(4),
    );
    core.receive(envelope(WireRecord::new().with_field("a", 1i32)));
    core.receive(envelope(WireRecord::new().with_field("b", 2.5f64)));
    core.receive(envelope(WireRecord::new().with_field("c", vec![1u8, 2])));
    core.receive(envelope(WireRecord::new()));
    core.flush_and_close();
    let files = log_files(&dir, "wirelog");
    assert_eq!(files.len(), 1);
    let lines = &files[0];
    assert_eq!(lines.len(), 4 + 1);
    for line in lines {
        assert_eq!(line.split(';').count(), 3);
    }
    assert_eq!(lines[0], "a;b;c");
    assert_eq!(lines[3], ";;0102");
    assert_eq!(lines[4], ";;");
}

#[test]
fn empty_envelope_counts_toward_threshold() {
    let dir = TestDir::new("engine-empty");
    let mut core = LoggerCore::new(LoggerOptions::new_in(dir.path()).with_max_in_memory_envelopes(2));
    core.receive(WireEnvelope::new("quiet", vec![]));
    core.receive(WireEnvelope::new("quiet", vec![]));
    assert_eq!(core.pending_len(), 0);
    // no rows, so no file either
    assert!(core.open_log_id().is_none());
    assert!(dir.file_names().is_empty());
}

#[test]
fn forced_flush_is_idempotent() {
    let dir = TestDir::new("engine-idempotent");
    let mut core = LoggerCore::new(
        LoggerOptions::new_in(dir.path())
            .with_max_in_memory_envelopes(100)
            .with_max_logs(1),
    );
    // nothing buffered and nothing open: no file
    core.flush_and_close();
    assert!(dir.file_names().is_empty());
    core.receive(envelope(reading("a", 1)));
    core.flush_and_close();
    let after_first = dir.file_names();
    assert_eq!(after_first.len(), 1);
    core.flush_and_close();
    assert_eq!(dir.file_names(), after_first);
    assert!(core.open_log_id().is_none());
}

#[test]
fn retention_runs_on_every_close() {
    let dir = TestDir::create("engine-retention");
    dir.touch("wirelog_0.csv");
    let mut core = LoggerCore::new(
        LoggerOptions::new_in(dir.path())
            .with_file_max_rows(1)
            .with_max_in_memory_envelopes(1)
            .with_max_logs(3),
    );
    for i in 0..6 {
        core.receive(envelope(reading("s", i)));
    }
    let layout = LogDirectory::new(dir.path(), "wirelog");
    let ids: Vec<u64> = layout.scan_ids().unwrap().into_iter().collect();
    assert_eq!(ids.len(), 3);
    assert_eq!(ids[0], 0);
    // the two newest survive
    assert_eq!(dir.read_lines(&layout.file_name(ids[1])), ["sensor,value", "s,4"]);
    assert_eq!(dir.read_lines(&layout.file_name(ids[2])), ["sensor,value", "s,5"]);
}

#[test]
fn failed_write_cycle_keeps_envelopes() {
    let dir = TestDir::create("engine-failure");
    // a file where the log directory should be
    dir.touch("blocker");
    let logs = dir.path().join("blocker").join("logs");
    let mut core = LoggerCore::new(LoggerOptions::new_in(&logs).with_max_in_memory_envelopes(2));
    core.receive(envelope(reading("a", 1)));
    core.receive(envelope(reading("a", 2)));
    assert_eq!(core.pending_len(), 2);
    assert!(core.open_log_id().is_none());
    core.flush_and_close();
    assert_eq!(core.pending_len(), 2);
    // clear the way; the next trigger retries the same data
    fs::remove_file(dir.path().join("blocker")).unwrap();
    core.receive(envelope(reading("a", 3)));
    assert_eq!(core.pending_len(), 0);
    core.flush_and_close();
    let layout = LogDirectory::new(&logs, "wirelog");
    let ids: Vec<u64> = layout.scan_ids().unwrap().into_iter().collect();
    assert_eq!(ids.len(), 1);
    let lines: Vec<String> = fs::read_to_string(layout.file_path(ids[0]))
        .unwrap()
        .lines()
        .map(ToOwned::to_owned)
        .collect();
    assert_eq!(lines, ["sensor,value", "a,1", "a,2", "a,3"]);
}

#[test]
fn reconfigure_flushes_under_old_options() {
    let old_dir = TestDir::new("engine-reconf-old");
    let new_dir = TestDir::new("engine-reconf-new");
    let mut core = LoggerCore::new(
        LoggerOptions::new_in(old_dir.path())
            .with_log_file_prefix("old")
            .with_max_in_memory_envelopes(10),
    );
    core.receive(envelope(reading("a", 1)));
    core.receive(envelope(reading("a", 2)));
    core.reconfigure(
        LoggerOptions::new_in(new_dir.path())
            .with_log_file_prefix("new")
            .with_csv_separator("|")
            .with_max_in_memory_envelopes(1),
    );
    assert_eq!(core.pending_len(), 0);
    assert!(core.columns().is_empty());
    assert!(core.open_log_id().is_none());
    assert_eq!(log_files(&old_dir, "old"), [["sensor,value", "a,1", "a,2"]]);
    core.receive(envelope(WireRecord::new().with_field("value", 3i32)));
    core.flush_and_close();
    assert_eq!(log_files(&new_dir, "new"), [["value", "3"]]);
}

#[test]
fn reconfigure_after_failure_rebuilds_columns() {
    let dir = TestDir::create("engine-reconf-fail");
    dir.touch("blocker");
    let mut core = LoggerCore::new(
        LoggerOptions::new_in(dir.path().join("blocker")).with_max_in_memory_envelopes(10),
    );
    core.receive(envelope(reading("a", 1)));
    core.reconfigure(LoggerOptions::new_in(dir.path().join("logs")));
    assert_eq!(core.pending_len(), 1);
    assert_eq!(core.columns(), ["sensor", "value"]);
    core.flush_and_close();
    let layout = LogDirectory::new(dir.path().join("logs"), "wirelog");
    let ids: Vec<u64> = layout.scan_ids().unwrap().into_iter().collect();
    assert_eq!(ids.len(), 1);
    assert_eq!(
        fs::read_to_string(layout.file_path(ids[0])).unwrap().lines().count(),
        2
    );
}

#[test]
fn verbose_logging_does_not_change_output() {
    let dir = TestDir::new("engine-verbose");
    let mut core = LoggerCore::new(
        LoggerOptions::new_in(dir.path())
            .with_verbosity(Verbosity::Verbose)
            .with_max_in_memory_envelopes(1),
    );
    core.receive(envelope(reading("v", 1)));
    core.flush_and_close();
    assert_eq!(log_files(&dir, "wirelog"), [["sensor,value", "v,1"]]);
}

#[test]
fn service_pid_names_the_files() {
    let dir = TestDir::new("engine-pid");
    let mut core = LoggerCore::new(
        LoggerOptions::new_in(dir.path())
            .with_service_pid("org.example.logger")
            .with_max_in_memory_envelopes(1),
    );
    core.receive(envelope(reading("p", 1)));
    core.flush_and_close();
    assert_eq!(log_files(&dir, "org.example.logger").len(), 1);
    assert!(log_files(&dir, "wirelog").is_empty());
}

#[test]
fn logger_lifecycle() {
    let dir = TestDir::new("engine-lifecycle");
    let logger = WireLogger::new();
    assert!(!logger.is_active());
    // dropped: nothing is listening yet
    logger.on_wire_receive(envelope(reading("x", 0)));
    assert_eq!(logger.pending_len(), 0);
    logger.activate(LoggerOptions::new_in(dir.path()));
    assert!(logger.is_active());
    logger.on_wire_receive(envelope(reading("x", 1)));
    assert_eq!(logger.pending_len(), 1);
    assert_eq!(logger.columns(), ["sensor", "value"]);
    assert!(logger.open_log_id().is_none());
    logger.deactivate();
    assert!(!logger.is_active());
    assert_eq!(log_files(&dir, "wirelog"), [["sensor,value", "x,1"]]);
    // a second deactivate is harmless
    logger.deactivate();
    assert_eq!(log_files(&dir, "wirelog").len(), 1);
}

#[test]
fn updated_on_inactive_logger_activates() {
    let dir = TestDir::new("engine-updated");
    let logger = WireLogger::new();
    logger.updated(LoggerOptions::new_in(dir.path()).with_max_in_memory_envelopes(1));
    assert!(logger.is_active());
    logger.on_wire_receive(envelope(reading("u", 1)));
    assert!(logger.open_log_id().is_some());
    logger.updated(LoggerOptions::new_in(dir.path()).with_max_in_memory_envelopes(1));
    assert!(logger.open_log_id().is_none());
    assert!(logger.columns().is_empty());
    logger.deactivate();
}
