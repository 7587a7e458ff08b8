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

use super::Configset;
use std::env::VarError;

/// Returns the environment configuration
pub(super) fn parse_env_config() -> Configset {
    parse_env_config_with(|key| std::env::var(key))
}

/// Same as [`parse_env_config`], but reads variables through the given getter
pub(super) fn parse_env_config_with(get_var: impl Fn(&str) -> Result<String, VarError>) -> Configset {
    let mut defset = Configset::new_env();
    macro_rules! fenv {
        (
            $fn:ident,
            $(
                $field:ident
            ),*
        ) => {
            defset.$fn(
                $(
                    get_var(stringify!($field)),
                    stringify!($field),
                )*
            );
        };
    }
    fenv!(rotation_settings, WIRELOG_MAX_ROWS);
    fenv!(
        buffer_settings,
        WIRELOG_MAX_IN_MEMORY,
        WIRELOG_STREAM_BUFFER_SIZE
    );
    fenv!(csv_settings, WIRELOG_CSV_SEPARATOR);
    fenv!(
        location_settings,
        WIRELOG_DIRECTORY,
        WIRELOG_FILE_PREFIX,
        WIRELOG_SERVICE_PID
    );
    fenv!(retention_settings, WIRELOG_MAX_COUNT);
    fenv!(verbosity_settings, WIRELOG_VERBOSITY);
    defset
}
