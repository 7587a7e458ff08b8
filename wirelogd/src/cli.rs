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

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version = libwire::VERSION, about, long_about = None)]
pub struct Cli {
    #[arg(
        short,
        long,
        help = "Sets a YAML configuration file to use instead of environment variables",
        value_name = "FILE"
    )]
    pub config: Option<PathBuf>,
}
