/*
 * Created on Tue Jun 16 2026
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

use core::{fmt, ops};
use serde_yaml::Error as YamlError;
use std::io::Error as IoError;

#[cfg(test)]
const EMSG_ENV: &str = "Environment";

/// Messages collected from one configuration source, rendered as an indented list
#[derive(Debug, PartialEq)]
pub struct FeedbackStack {
    messages: Vec<String>,
    kind: &'static str,
    source: &'static str,
}

impl FeedbackStack {
    pub fn source(&self) -> &'static str {
        self.source
    }
    pub fn push(&mut self, f: impl ToString) {
        self.messages.push(f.to_string())
    }
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
    pub fn len(&self) -> usize {
        self.messages.len()
    }
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl fmt::Display for FeedbackStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_empty() {
            write!(f, "{} {}:", self.source, self.kind)?;
            for msg in self.messages.iter() {
                write!(f, "\n    - {msg}")?;
            }
        }
        Ok(())
    }
}

macro_rules! feedback_stack {
    ($(#[$attr:meta])* $name:ident, $kind:literal) => {
        $(#[$attr])*
        #[derive(Debug, PartialEq)]
        pub struct $name(FeedbackStack);
        impl $name {
            pub fn new(source: &'static str) -> Self {
                Self(FeedbackStack {
                    messages: Vec::new(),
                    kind: $kind,
                    source,
                })
            }
        }
        impl ops::Deref for $name {
            type Target = FeedbackStack;
            fn deref(&self) -> &FeedbackStack {
                &self.0
            }
        }
        impl ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut FeedbackStack {
                &mut self.0
            }
        }
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

feedback_stack!(
    /// Validation failures. Any of these rejects the configuration
    ErrorStack,
    "errors"
);
feedback_stack!(
    /// Accepted but suspicious values
    WarningStack,
    "warnings"
);

impl WarningStack {
    pub fn print_warnings(&self) {
        if !self.is_empty() {
            log::warn!("{}", self);
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    OSError(IoError),
    CfgError(ErrorStack),
    ConfigFileParseError(YamlError),
    Conflict,
}

impl PartialEq for ConfigError {
    fn eq(&self, oth: &Self) -> bool {
        match (self, oth) {
            (Self::OSError(lhs), Self::OSError(rhs)) => lhs.to_string() == rhs.to_string(),
            (Self::CfgError(lhs), Self::CfgError(rhs)) => lhs == rhs,
            (Self::ConfigFileParseError(lhs), Self::ConfigFileParseError(rhs)) => {
                lhs.to_string() == rhs.to_string()
            }
            (Self::Conflict, Self::Conflict) => true,
            _ => false,
        }
    }
}

impl From<IoError> for ConfigError {
    fn from(e: IoError) -> Self {
        Self::OSError(e)
    }
}

impl From<YamlError> for ConfigError {
    fn from(e: YamlError) -> Self {
        Self::ConfigFileParseError(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigFileParseError(e) => write!(f, "Configuration file parse failed: {}", e),
            Self::OSError(e) => write!(f, "OS Error: {}", e),
            Self::CfgError(e) => write!(f, "{}", e),
            Self::Conflict => write!(
                f,
                "Conflict error: Either provide environment variables or a config file for configuration"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
