// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod exporter;
pub mod reports;
pub mod session;
pub mod transactions;

use crate::gateway::TransactionGateway;
use crate::store::FinancialStore;

/// Prints whatever the last store action left in its error slot.
pub fn report_store_error<G: TransactionGateway>(store: &FinancialStore<G>) {
    if let Some(msg) = store.error() {
        eprintln!("warning: {}", msg);
    }
    if let Some(url) = store.login_redirect() {
        eprintln!("Log in again at {} and run `finwatch session login --token <TOKEN>`", url);
    }
}

/// Reload from the API (or the local mirror) and report any failure.
pub fn load<G: TransactionGateway>(store: &mut FinancialStore<G>) {
    store.load_transactions();
    report_store_error(store);
}
