/*
 * Created on Mon Jun 08 2026
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

//! The core library for Wirelog
//!
//! This contains the wire data model which is shared by the logging engine and by anything
//! that delivers records to it:
//! - [`TypedValue`]: a single value tagged with its [`DataType`]
//! - [`WireRecord`]: a set of named values, kept in the order in which they arrived
//! - [`WireEnvelope`]: one delivery unit, a batch of records tagged with its emitter
//!
//! All three can be decoded with `serde`, so upstream deliveries can be read from any
//! self-describing format.

mod envelope;
mod value;

pub use self::envelope::{WireEnvelope, WireRecord};
pub use self::value::{DataType, TypedValue};

/// The current version of the wirelog crates
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
