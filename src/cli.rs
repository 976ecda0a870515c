// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn kind_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(["income", "expense"])
        .help("Transaction kind")
}

pub fn build_cli() -> Command {
    Command::new("finwatch")
        .about("Personal finance tracking client for a remote transactions API")
        .version(clap::crate_version!())
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .help("Override the API base URL"),
        )
        .subcommand(
            Command::new("tx")
                .about("Work with transactions")
                .subcommand(json_flags(
                    Command::new("list").about("Load and list all transactions"),
                ))
                .subcommand(json_flags(
                    Command::new("page")
                        .about("List one page of raw transactions")
                        .arg(
                            Arg::new("page")
                                .long("page")
                                .value_parser(value_parser!(u32))
                                .default_value("0"),
                        )
                        .arg(
                            Arg::new("size")
                                .long("size")
                                .value_parser(value_parser!(u32))
                                .default_value("20"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Fetch a single transaction")
                        .arg(Arg::new("id").required(true)),
                ))
                .subcommand(
                    Command::new("add")
                        .about("Create a transaction")
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(kind_arg().required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .required(true)
                                .help("YYYY-MM-DD or ISO-8601 UTC datetime ending in Z"),
                        )
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("update")
                        .about("Update fields of a transaction")
                        .arg(Arg::new("id").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .allow_hyphen_values(true),
                        )
                        .arg(kind_arg())
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregates")
                .subcommand(json_flags(
                    Command::new("summary").about("Balance, income and expenses"),
                ))
                .subcommand(json_flags(
                    Command::new("by-category").about("Net amount per category"),
                ))
                .subcommand(json_flags(
                    Command::new("stats").about("Statistics computed by the server"),
                )),
        )
        .subcommand(
            Command::new("category")
                .about("Categories")
                .subcommand(Command::new("list").about("List preset categories")),
        )
        .subcommand(
            Command::new("export")
                .about("Export loaded transactions")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["csv", "json"])
                        .default_value("csv"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(
            Command::new("session")
                .about("Manage the API session token")
                .subcommand(
                    Command::new("login")
                        .about("Store a bearer token")
                        .arg(Arg::new("token").long("token").required(true)),
                )
                .subcommand(Command::new("logout").about("Forget the bearer token"))
                .subcommand(Command::new("status").about("Show whether a token is stored")),
        )
}
