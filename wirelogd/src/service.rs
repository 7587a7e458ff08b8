/*
 * Created on Sat Aug 01 2026
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

//! # Ingestion
//!
//! Upstream deliveries arrive as newline-delimited JSON, one envelope per line:
//! ```text
//! {"emitter": "sensor-1", "records": [{"temp": {"type": "DOUBLE", "value": 21.5}}]}
//! ```
//! Every decoded envelope is handed to the logger. Lines that don't decode are logged and
//! skipped; they never stop ingestion.

use crate::engine::WireLogger;
use libwire::WireEnvelope;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt};

/// Decode one line. Blank lines are not envelopes
pub fn decode_line(line: &[u8]) -> Option<Result<WireEnvelope, serde_json::Error>> {
    if line.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        Some(serde_json::from_slice(line))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    pub delivered: usize,
    pub rejected: usize,
}

pub struct Ingest<R> {
    reader: R,
    /// the current line; only cleared once it has been handled
    line: Vec<u8>,
    stats: IngestStats,
}

impl<R: AsyncBufRead + Unpin> Ingest<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            stats: IngestStats::default(),
        }
    }
    pub fn stats(&self) -> IngestStats {
        self.stats
    }
    /// Read the next line and deliver it. Returns `false` once the input is exhausted.
    ///
    /// This is cancel safe: if the returned future is dropped before it completes, no line
    /// is lost. Lines are raw bytes, so input that isn't UTF-8 is rejected like any other
    /// undecodable line
    pub async fn next(&mut self, logger: &WireLogger) -> io::Result<bool> {
        if self.reader.read_until(b'\n', &mut self.line).await? == 0 && self.line.is_empty() {
            return Ok(false);
        }
        let line = core::mem::take(&mut self.line);
        match decode_line(&line) {
            Some(Ok(envelope)) => {
                // deliveries may write to disk
                tokio::task::block_in_place(|| logger.on_wire_receive(envelope));
                self.stats.delivered += 1;
            }
            Some(Err(e)) => {
                log::warn!("Skipping undecodable envelope: {e}");
                self.stats.rejected += 1;
            }
            None => {}
        }
        Ok(true)
    }
    /// Deliver everything until the input is exhausted
    pub async fn run_to_end(&mut self, logger: &WireLogger) -> io::Result<IngestStats> {
        while self.next(logger).await? {}
        Ok(self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_line, Ingest, IngestStats};
    use crate::{config::LoggerOptions, engine::WireLogger, util::test_utils::TestDir};
    use libwire::TypedValue;

    #[test]
    fn decode() {
        assert!(decode_line(b"").is_none());
        assert!(decode_line(b"   \n").is_none());
        let env = decode_line(
            br#"{"emitter": "s1", "records": [{"b": {"type": "BOOLEAN", "value": true}, "a": {"type": "LONG", "value": 7}}]}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(env.emitter_pid(), "s1");
        let rec = &env.records()[0];
        assert_eq!(rec.field_names().collect::<Vec<_>>(), ["b", "a"]);
        assert_eq!(rec.get("a"), Some(&TypedValue::Long(7)));
        assert!(decode_line(b"{not json").unwrap().is_err());
        assert!(decode_line(b"\xff\xfe garbage").unwrap().is_err());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn ingest_to_end() {
        let dir = TestDir::new("ingest");
        let logger = WireLogger::new();
        logger.activate(LoggerOptions::new_in(dir.path()).with_max_in_memory_envelopes(2));
        let input: &[u8] = br#"{"emitter": "s1", "records": [{"x": {"type": "INTEGER", "value": 1}}]}

garbage
{"emitter": "s1", "records": [{"x": {"type": "INTEGER", "value": 2}}]}
{"emitter": "s1"}
"#;
        let stats = Ingest::new(input).run_to_end(&logger).await.unwrap();
        assert_eq!(
            stats,
            IngestStats {
                delivered: 3,
                rejected: 1
            }
        );
        logger.deactivate();
        let names = dir.file_names();
        assert_eq!(names.len(), 1);
        assert_eq!(dir.read_lines(&names[0]), ["x", "1", "2"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn invalid_utf8_is_skipped() {
        let dir = TestDir::new("ingest-utf8");
        let logger = WireLogger::new();
        logger.activate(LoggerOptions::new_in(dir.path()).with_max_in_memory_envelopes(1));
        let mut input = b"\xff\xfe garbage\n".to_vec();
        input.extend_from_slice(
            br#"{"emitter": "s1", "records": [{"x": {"type": "INTEGER", "value": 5}}]}"#,
        );
        let stats = Ingest::new(&input[..]).run_to_end(&logger).await.unwrap();
        assert_eq!(
            stats,
            IngestStats {
                delivered: 1,
                rejected: 1
            }
        );
        logger.deactivate();
        let names = dir.file_names();
        assert_eq!(names.len(), 1);
        assert_eq!(dir.read_lines(&names[0]), ["x", "5"]);
    }

    #[tokio::test]
    async fn next_reports_eof() {
        let logger = WireLogger::new();
        let mut ingest = Ingest::new(&b""[..]);
        assert!(!ingest.next(&logger).await.unwrap());
        assert_eq!(ingest.stats(), IngestStats::default());
    }
}
