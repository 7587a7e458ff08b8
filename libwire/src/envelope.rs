/*
 * Created on Tue Jun 09 2026
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

use crate::value::TypedValue;
use core::fmt;
use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer,
};

/// A record: a set of named, typed values
///
/// Fields keep the order in which they were first inserted (or, when decoded, the order in
/// which they appear in the source document). Inserting a name that already exists replaces
/// the value in place without moving the field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WireRecord {
    fields: Vec<(String, TypedValue)>,
}

impl WireRecord {
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }
    /// Builder-style insert
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<TypedValue>) -> Self {
        self.insert(name, value);
        self
    }
    /// Insert a field, returning the previous value if the name was already present
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<TypedValue>,
    ) -> Option<TypedValue> {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(core::mem::replace(slot, value)),
            None => {
                self.fields.push((name, value));
                None
            }
        }
    }
    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.fields
            .iter()
            .find_map(|(n, v)| if n == name { Some(v) } else { None })
    }
    /// Returns the field names in arrival order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }
    pub fn len(&self) -> usize {
        self.fields.len()
    }
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<TypedValue>> FromIterator<(K, V)> for WireRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        iter.into_iter().for_each(|(k, v)| {
            record.insert(k, v);
        });
        record
    }
}

struct WireRecordVisitor;

impl<'de> Visitor<'de> for WireRecordVisitor {
    type Value = WireRecord;
    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a map of field names to typed values")
    }
    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut record = WireRecord {
            fields: Vec::with_capacity(map.size_hint().unwrap_or(0)),
        };
        while let Some((name, value)) = map.next_entry::<String, TypedValue>()? {
            record.insert(name, value);
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for WireRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(WireRecordVisitor)
    }
}

/// # Wire envelope
///
/// A wire envelope is one delivery unit: zero or more records along with the identity of
/// the component that emitted them. Most envelopes carry exactly one record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireEnvelope {
    #[serde(rename = "emitter")]
    emitter_pid: String,
    #[serde(default)]
    records: Vec<WireRecord>,
}

impl WireEnvelope {
    pub fn new(emitter_pid: impl Into<String>, records: Vec<WireRecord>) -> Self {
        Self {
            emitter_pid: emitter_pid.into(),
            records,
        }
    }
    /// Returns the identity of the emitter
    pub fn emitter_pid(&self) -> &str {
        &self.emitter_pid
    }
    pub fn records(&self) -> &[WireRecord] {
        &self.records
    }
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    /// Splits the envelope in two at the given record index. `self` keeps the records
    /// `[0, at)` and the returned envelope (same emitter) gets `[at, len)`
    ///
    /// ## Panics
    /// If `at > len`
    pub fn split_off(&mut self, at: usize) -> Self {
        Self {
            emitter_pid: self.emitter_pid.clone(),
            records: self.records.split_off(at),
        }
    }
}
