// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::gateway::TransactionGateway;
use crate::store::FinancialStore;
use crate::utils::pretty_table;

pub fn handle<G: TransactionGateway>(store: &FinancialStore<G>, m: &clap::ArgMatches) {
    if let Some(("list", _)) = m.subcommand() {
        let data = store.categories().iter().map(|c| vec![c.clone()]).collect();
        println!("{}", pretty_table(&["Category"], data));
    }
}
