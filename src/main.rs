// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::rc::Rc;

use anyhow::{Context, Result};

use finwatch::config::Config;
use finwatch::gateway::HttpGateway;
use finwatch::storage::{KeyValueStorage, SqliteStorage};
use finwatch::store::FinancialStore;
use finwatch::{cli, commands, utils};

fn main() -> Result<()> {
    utils::init_tracing();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut cfg = Config::load().context("Could not resolve configuration")?;
    if let Some(url) = matches.get_one::<String>("api-url") {
        cfg = cfg.with_api_base_url(url);
    }

    let storage: Rc<dyn KeyValueStorage> =
        Rc::new(SqliteStorage::open_default().context("Could not open local storage")?);
    let gateway = HttpGateway::new(&cfg, storage.clone()).context("Could not build HTTP client")?;
    let mut store = FinancialStore::new(gateway, storage.clone());

    match matches.subcommand() {
        Some(("tx", sub)) => commands::transactions::handle(&mut store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&mut store, sub)?,
        Some(("category", sub)) => commands::categories::handle(&store, sub),
        Some(("export", sub)) => commands::exporter::handle(&mut store, sub)?,
        Some(("session", sub)) => commands::session::handle(storage.as_ref(), sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
