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

//! # wirelogd
//!
//! The wire logger daemon. Envelopes are read as newline-delimited JSON from `stdin` and
//! logged until the input ends or the process is asked to terminate. On Unix, `SIGHUP`
//! reloads the configuration from wherever it was first loaded.

use clap::Parser;
use env_logger::Builder;
use libwire::VERSION;
use std::{env, process};
use tokio::io::{self, BufReader};
use wirelogd::{
    config::{ConfigSource, ConfigType, LoggerOptions},
    service::Ingest,
    util::os::{ReloadSignal, TerminationSignal},
    WireLogger,
};

mod cli;

#[cfg(all(not(target_env = "msvc"), not(miri)))]
use jemallocator::Jemalloc;

#[cfg(all(not(target_env = "msvc"), not(miri)))]
#[global_allocator]
/// Jemallocator - this is the default memory allocator for platforms other than msvc
static GLOBAL: Jemalloc = Jemalloc;

fn main() {
    Builder::new()
        .parse_filters(&env::var("WIRELOG_LOG").unwrap_or_else(|_| "info".to_owned()))
        .init();
    let cli = cli::Cli::parse();
    let source = ConfigSource::new(cli.config);
    let options = match load_options(&source) {
        Some(options) => options,
        None => process::exit(0x01),
    };
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .thread_name("wirelogd")
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("Failed to start runtime: {e}");
            process::exit(0x01);
        }
    };
    log::info!("wirelogd v{VERSION}");
    let logger = WireLogger::new();
    logger.activate(options);
    let ret = runtime.block_on(run(&logger, &source));
    // whatever is still buffered is written out before we go
    logger.deactivate();
    // the stdin reader may still be blocked on a read
    runtime.shutdown_background();
    if let Err(e) = ret {
        log::error!("wirelogd stopped with error: {e}");
        process::exit(0x01);
    }
    log::info!("Goodbye :)");
}

/// Load the configuration, logging what went wrong (if anything)
fn load_options(source: &ConfigSource) -> Option<LoggerOptions> {
    match source.load() {
        Ok(ConfigType::Custom(options)) => {
            log::info!("Using settings from supplied configuration");
            Some(options)
        }
        Ok(ConfigType::Def(options)) => {
            log::warn!("No configuration supplied. Using default settings");
            Some(options)
        }
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            None
        }
    }
}

async fn run(logger: &WireLogger, source: &ConfigSource) -> io::Result<()> {
    let termination = TerminationSignal::init()?;
    tokio::pin!(termination);
    let mut reload = ReloadSignal::init()?;
    let mut ingest = Ingest::new(BufReader::new(io::stdin()));
    loop {
        tokio::select! {
            more = ingest.next(logger) => {
                if !more? {
                    log::info!("Input closed");
                    break;
                }
            }
            _ = reload.recv() => {
                log::info!("Reloading configuration");
                // a bad configuration leaves the current one in place
                if let Some(options) = load_options(source) {
                    logger.updated(options);
                }
            }
            _ = &mut termination => {
                log::info!("Received termination signal");
                break;
            }
        }
    }
    let stats = ingest.stats();
    log::info!(
        "Delivered {} envelope(s), rejected {}",
        stats.delivered,
        stats.rejected
    );
    Ok(())
}
