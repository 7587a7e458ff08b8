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

use libwire::WireEnvelope;
use std::collections::VecDeque;

/// Envelopes received since the last write cycle, in arrival order. The buffer itself
/// enforces no limit; the engine checks its threshold after every append
#[derive(Debug, Default)]
pub struct EnvelopeBuffer {
    envelopes: VecDeque<WireEnvelope>,
}

impl EnvelopeBuffer {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn append(&mut self, envelope: WireEnvelope) {
        self.envelopes.push_back(envelope)
    }
    pub fn len(&self) -> usize {
        self.envelopes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.envelopes.is_empty()
    }
    /// Take every buffered envelope, leaving the buffer empty
    pub fn drain(&mut self) -> VecDeque<WireEnvelope> {
        core::mem::take(&mut self.envelopes)
    }
    /// Put unwritten envelopes back in front of anything that arrived since they were
    /// drained, so that arrival order is kept
    pub fn restore(&mut self, mut unwritten: VecDeque<WireEnvelope>) {
        unwritten.extend(self.envelopes.drain(..));
        self.envelopes = unwritten;
    }
    pub fn iter(&self) -> impl Iterator<Item = &WireEnvelope> {
        self.envelopes.iter()
    }
}
