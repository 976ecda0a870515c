// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::storage::{AUTH_TOKEN_KEY, KeyValueStorage};

pub fn handle(storage: &dyn KeyValueStorage, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("login", sub)) => {
            let token = sub.get_one::<String>("token").context("Missing --token")?;
            storage.set(AUTH_TOKEN_KEY, token.trim())?;
            println!("Token stored; it will be sent with every request.");
        }
        Some(("logout", _)) => {
            storage.remove(AUTH_TOKEN_KEY)?;
            println!("Token removed.");
        }
        Some(("status", _)) => {
            if storage.get(AUTH_TOKEN_KEY)?.is_some() {
                println!("Logged in (token stored).");
            } else {
                println!("Not logged in.");
            }
        }
        _ => {}
    }
    Ok(())
}
