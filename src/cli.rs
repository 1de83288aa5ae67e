// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, Command, arg, crate_version, value_parser};

fn user_arg() -> clap::Arg {
    arg!(--user <USER> "Owner of the stored records").required(true)
}

fn profile_arg() -> clap::Arg {
    arg!(--profile <TOML> "Statement profile describing the bank export").required(false)
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print JSON"))
        .arg(arg!(--jsonl "Print one JSON object per line").conflicts_with("json"))
}

pub fn build_cli() -> Command {
    Command::new("budgetmaster")
        .version(crate_version!())
        .about("Normalize bank statement exports and keep a per-user budgeting ledger")
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("clean")
                .about("Normalize a raw statement export without storing it")
                .arg(arg!(--path <PATH> "Raw export file").required(true))
                .arg(profile_arg())
                .arg(
                    arg!(--format <FORMAT> "Output format")
                        .value_parser(["csv", "json"])
                        .default_value("csv"),
                )
                .arg(arg!(--out <PATH> "Write here instead of stdout").required(false)),
        )
        .subcommand(
            Command::new("import")
                .about("Normalize a raw statement export and store it for a user")
                .arg(user_arg())
                .arg(arg!(--path <PATH> "Raw export file").required(true))
                .arg(profile_arg())
                .arg(arg!(--replace "Replace the user's stored transactions")),
        )
        .subcommand(
            Command::new("tx")
                .about("Stored transactions")
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(user_arg())
                        .arg(arg!(--month <MONTH> "YYYY-MM").required(false))
                        .arg(
                            arg!(--category <CATEGORY> "income|expense")
                                .required(false)
                                .value_parser(["income", "expense"]),
                        )
                        .arg(
                            arg!(--limit <N>)
                                .required(false)
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("add")
                        .about("Record a single transaction by hand")
                        .arg(user_arg())
                        .arg(arg!(--date <DATE> "YYYY-MM-DD").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_name("TYPE")
                                .help("Free-text type; see `tx types` for ones already used"),
                        )
                        .arg(
                            arg!(--category <CATEGORY> "income|expense")
                                .required(true)
                                .value_parser(["income", "expense"]),
                        )
                        .arg(arg!(--amount <AMOUNT> "Non-negative amount").required(true))
                        .arg(arg!(--description <TEXT>).required(false)),
                )
                .subcommand(
                    Command::new("delete")
                        .arg(user_arg())
                        .arg(
                            arg!(--id <ID>)
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                )
                .subcommand(
                    Command::new("types")
                        .about("Distinct transaction types seen for a user")
                        .arg(user_arg())
                        .arg(arg!(--json "Print JSON")),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly budgets")
                .subcommand(
                    Command::new("set")
                        .arg(user_arg())
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(arg!(--month <MONTH> "YYYY-MM").required(true))
                        .arg(arg!(--planned <AMOUNT>).required(true))
                        .arg(
                            arg!(--pattern <REGEX> "Also count expenses whose description matches")
                                .required(false),
                        )
                        .arg(arg!(--recurring "Applies to every later month too")),
                )
                .subcommand(
                    Command::new("delete")
                        .arg(user_arg())
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(arg!(--month <MONTH> "YYYY-MM").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(user_arg())
                        .arg(arg!(--month <MONTH> "YYYY-MM").required(false)),
                )),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(user_arg())
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(arg!(--target <AMOUNT>).required(true))
                        .arg(arg!(--deadline <DATE> "YYYY-MM-DD").required(true)),
                )
                .subcommand(
                    Command::new("fund")
                        .arg(user_arg())
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(arg!(--amount <AMOUNT>).required(true)),
                )
                .subcommand(
                    Command::new("delete")
                        .arg(user_arg())
                        .arg(arg!(--name <NAME>).required(true)),
                )
                .subcommand(json_flags(Command::new("list").arg(user_arg()))),
        )
        .subcommand(
            Command::new("report").about("Reports").subcommand(json_flags(
                Command::new("summary")
                    .about("Income and expense totals for a month")
                    .arg(user_arg())
                    .arg(arg!(--month <MONTH> "YYYY-MM").required(true)),
            )),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(user_arg())
                    .arg(
                        arg!(--format <FORMAT>)
                            .value_parser(["csv", "json"])
                            .default_value("csv"),
                    )
                    .arg(arg!(--out <PATH>).required(true)),
            ),
        )
        .subcommand(
            Command::new("reset")
                .about("Delete a user's transactions, budgets and savings goals")
                .arg(user_arg()),
        )
}
