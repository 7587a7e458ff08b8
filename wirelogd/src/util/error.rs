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

use std::{fmt, io::Error as IoError};

pub type LogResult<T> = Result<T, LogError>;

#[derive(Debug)]
pub enum LogError {
    IoError(IoError),
    IoErrorExtra(IoError, String),
    /// A row was written while no log file was open
    NoOpenFile,
    /// The newest log file already has the largest possible id
    IdsExhausted,
}

impl LogError {
    pub fn ioerror_extra(ioe: IoError, extra: impl ToString) -> Self {
        Self::IoErrorExtra(ioe, extra.to_string())
    }
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError(nerr) => write!(f, "I/O error: {}", nerr),
            Self::IoErrorExtra(ioe, extra) => write!(f, "I/O error while {extra}: {ioe}"),
            Self::NoOpenFile => write!(f, "no log file is open for writing"),
            Self::IdsExhausted => write!(f, "no log file id is left to allocate"),
        }
    }
}

impl std::error::Error for LogError {}

impl From<IoError> for LogError {
    fn from(ioe: IoError) -> Self {
        Self::IoError(ioe)
    }
}

#[test]
fn error_fmt() {
    use std::io::ErrorKind;
    let e = LogError::ioerror_extra(
        IoError::new(ErrorKind::PermissionDenied, "denied"),
        "creating log file `/var/log/wirelog_1.csv`",
    );
    assert_eq!(
        e.to_string(),
        "I/O error while creating log file `/var/log/wirelog_1.csv`: denied"
    );
}
