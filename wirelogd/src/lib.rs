/*
 * Created on Fri Jun 12 2026
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

//! # Wirelog
//!
//! `wirelogd` turns a stream of wire envelopes into rotating CSV log files. The column
//! layout of each file is discovered from the records themselves, and old files are
//! garbage collected so that the log directory never holds more than a configured number
//! of files.
//!
//! - [`config`]: loading and validating [`LoggerOptions`](config::LoggerOptions)
//! - [`engine`]: the [`WireLogger`] and the components it is built from
//! - [`service`]: decoding upstream deliveries

pub mod config;
pub mod engine;
pub mod service;
pub mod util;

pub use self::engine::WireLogger;
