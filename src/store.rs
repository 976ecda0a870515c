// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory application state plus the actions that talk to the gateway.
//!
//! Actions take `&mut self` and block on the gateway, so a second load can
//! only start once the first has finished writing state.

use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::{error, info, warn};

use crate::aggregates;
use crate::error::GatewayError;
use crate::gateway::TransactionGateway;
use crate::models::{Statistics, TransactionParameters, ViewRecord};
use crate::storage::{KeyValueStorage, TRANSACTIONS_KEY};

pub const LOAD_FAILED: &str = "Failed to load transactions";
pub const CREATE_FAILED: &str = "Failed to create transaction";
pub const DELETE_FAILED: &str = "Failed to delete transaction";

pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Groceries",
    "Transport",
    "Housing",
    "Entertainment",
    "Health",
    "Clothing",
    "Education",
    "Other",
];

pub struct FinancialStore<G: TransactionGateway> {
    gateway: G,
    storage: Rc<dyn KeyValueStorage>,
    transactions: Vec<ViewRecord>,
    categories: Vec<String>,
    error: Option<String>,
    initialized: bool,
    login_redirect: Option<String>,
}

impl<G: TransactionGateway> FinancialStore<G> {
    pub fn new(gateway: G, storage: Rc<dyn KeyValueStorage>) -> Self {
        Self {
            gateway,
            storage,
            transactions: Vec::new(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            error: None,
            initialized: false,
            login_redirect: None,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// First load. Does nothing once a load has succeeded.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.error = None;
        match self.gateway.list_all() {
            Ok(txs) => {
                info!(count = txs.len(), "received transactions from api");
                self.transactions = txs;
                self.initialized = true;
            }
            Err(e) => {
                error!(error = %e, "error loading transactions");
                self.record_failure(&e, LOAD_FAILED);
            }
        }
    }

    /// Reload from the API, falling back to the local mirror on failure.
    pub fn load_transactions(&mut self) {
        self.error = None;
        match self.gateway.list_all() {
            Ok(txs) => {
                info!(count = txs.len(), "received transactions from api");
                self.transactions = txs;
            }
            Err(e) => {
                error!(error = %e, "error loading transactions");
                self.record_failure(&e, LOAD_FAILED);
                self.load_from_mirror();
            }
        }
    }

    pub fn add_transaction(&mut self, params: &TransactionParameters) -> Option<ViewRecord> {
        self.error = None;
        match self.gateway.create(params) {
            Ok(tx) => {
                self.transactions.push(tx.clone());
                self.save_to_mirror();
                Some(tx)
            }
            Err(e) => {
                error!(error = %e, "error creating transaction");
                self.record_failure(&e, CREATE_FAILED);
                None
            }
        }
    }

    /// Removes the record locally even when the remote delete fails.
    pub fn delete_transaction(&mut self, id: &str) {
        self.error = None;
        if let Err(e) = self.gateway.delete(id) {
            error!(error = %e, id, "error deleting transaction");
            self.record_failure(&e, DELETE_FAILED);
        }
        self.transactions.retain(|t| t.id != id);
        self.save_to_mirror();
    }

    pub fn save_to_mirror(&self) {
        let json = match serde_json::to_string(&self.transactions) {
            Ok(j) => j,
            Err(e) => {
                error!(error = %e, "could not serialize transactions for the mirror");
                return;
            }
        };
        match self.storage.set(TRANSACTIONS_KEY, &json) {
            Ok(()) => info!(count = self.transactions.len(), "mirrored transactions"),
            Err(e) => error!(error = %e, "error saving transactions to local storage"),
        }
    }

    /// Replaces state with the mirror when one exists; otherwise leaves it as is.
    pub fn load_from_mirror(&mut self) {
        let stored = match self.storage.get(TRANSACTIONS_KEY) {
            Ok(Some(s)) => s,
            Ok(None) => return,
            Err(e) => {
                error!(error = %e, "error reading local storage");
                return;
            }
        };
        match serde_json::from_str::<Vec<ViewRecord>>(&stored) {
            Ok(txs) => {
                warn!(count = txs.len(), "using transactions from local storage");
                self.transactions = txs;
            }
            Err(e) => error!(error = %e, "error loading from local storage"),
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn record_failure(&mut self, err: &GatewayError, fallback: &str) {
        if let GatewayError::Unauthorized { login_url } = err {
            self.login_redirect = Some(login_url.clone());
            self.error = Some(err.to_string());
            return;
        }
        self.error = Some(err.server_message().unwrap_or(fallback).to_string());
    }

    pub fn transactions(&self) -> &[ViewRecord] {
        &self.transactions
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Set once the API has rejected the session.
    pub fn login_redirect(&self) -> Option<&str> {
        self.login_redirect.as_deref()
    }

    pub fn total_balance(&self) -> f64 {
        aggregates::total_balance(&self.transactions)
    }

    pub fn income(&self) -> f64 {
        aggregates::income(&self.transactions)
    }

    pub fn expenses(&self) -> f64 {
        aggregates::expenses(&self.transactions)
    }

    pub fn transactions_by_category(&self) -> BTreeMap<String, f64> {
        aggregates::by_category(&self.transactions)
    }

    pub fn summary(&self) -> Statistics {
        aggregates::summary(&self.transactions)
    }
}
