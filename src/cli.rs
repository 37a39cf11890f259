// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

pub fn build_cli() -> Command {
    Command::new("homeledger")
        .about("Household budget, recurring obligations, itemized expenses, and rewards")
        .version(clap::crate_version!())
        .arg(
            Arg::new("as_of")
                .long("as-of")
                .global(true)
                .value_name("YYYY-MM-DD")
                .help("Treat this date as today for period math"),
        )
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(income_cmd())
        .subcommand(expense_cmd())
        .subcommand(subscription_cmd())
        .subcommand(budget_cmd())
        .subcommand(points_cmd())
        .subcommand(category_cmd())
        .subcommand(payment_cmd())
        .subcommand(person_cmd())
        .subcommand(grocery_cmd())
        .subcommand(dashboard_cmd())
        .subcommand(report_cmd())
        .subcommand(
            Command::new("export").about("Export the whole store as JSON").arg(
                Arg::new("out")
                    .long("out")
                    .required(true)
                    .help("Output file path"),
            ),
        )
        .subcommand(
            Command::new("import")
                .about("Import data")
                .subcommand(
                    Command::new("json")
                        .about("Replace all collections from a JSON backup")
                        .arg(Arg::new("path").long("path").required(true)),
                )
                .subcommand(
                    Command::new("csv")
                        .about("Add expenses from a CSV file")
                        .arg(Arg::new("path").long("path").required(true)),
                ),
        )
}

fn income_cmd() -> Command {
    let fields = |cmd: Command| {
        cmd.arg(Arg::new("name").long("name").required(true))
            .arg(Arg::new("source").long("source").required(true))
            .arg(
                Arg::new("type")
                    .long("type")
                    .required(true)
                    .value_parser(["recurring", "one-time"]),
            )
            .arg(Arg::new("amount").long("amount").required(true))
            .arg(
                Arg::new("date")
                    .long("date")
                    .help("Required for one-time income"),
            )
    };
    Command::new("income")
        .about("Income sources")
        .subcommand(fields(Command::new("add").about("Add an income source")))
        .subcommand(json_flags(Command::new("list").about("List income sources")))
        .subcommand(fields(
            Command::new("edit").about("Overwrite an income source").arg(id_arg()),
        ))
        .subcommand(Command::new("rm").about("Delete an income source").arg(id_arg()))
}

fn expense_cmd() -> Command {
    let fields = |cmd: Command| {
        cmd.arg(Arg::new("date").long("date").required(true))
            .arg(Arg::new("payee").long("payee").required(true))
            .arg(Arg::new("category").long("category").required(true))
            .arg(Arg::new("subcategory").long("subcategory").required(true))
            .arg(Arg::new("payment").long("payment").required(true))
            .arg(Arg::new("amount").long("amount").required(true))
            .arg(Arg::new("notes").long("notes"))
    };
    Command::new("expense")
        .about("Expenses and their itemization")
        .subcommand(fields(Command::new("add").about("Record an expense")))
        .subcommand(json_flags(
            Command::new("list")
                .about("List expenses")
                .arg(Arg::new("month").long("month").value_name("YYYY-MM"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(fields(
            Command::new("edit")
                .about("Overwrite an expense (items are preserved)")
                .arg(id_arg()),
        ))
        .subcommand(Command::new("rm").about("Delete an expense").arg(id_arg()))
        .subcommand(
            Command::new("item")
                .about("Itemize an expense")
                .subcommand(
                    Command::new("add")
                        .about("Append a line item")
                        .arg(
                            Arg::new("expense")
                                .long("expense")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove the line item at an index")
                        .arg(
                            Arg::new("expense")
                                .long("expense")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("index")
                                .long("index")
                                .required(true)
                                .value_parser(value_parser!(usize)),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list").about("Show items and the remainder").arg(
                        Arg::new("expense")
                            .long("expense")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )),
        )
}

fn subscription_cmd() -> Command {
    let fields = |cmd: Command| {
        cmd.arg(Arg::new("name").long("name").required(true))
            .arg(Arg::new("amount").long("amount").required(true))
            .arg(
                Arg::new("start")
                    .long("start")
                    .required(true)
                    .help("Start date; its day-of-month is the billing day"),
            )
            .arg(Arg::new("method").long("method"))
    };
    Command::new("subscription")
        .about("Recurring subscriptions")
        .subcommand(fields(Command::new("add").about("Add a subscription")))
        .subcommand(json_flags(Command::new("list").about("List subscriptions")))
        .subcommand(
            Command::new("toggle")
                .about("Cancel or reactivate a subscription")
                .arg(id_arg()),
        )
        .subcommand(fields(
            Command::new("edit")
                .about("Overwrite a subscription (status is preserved)")
                .arg(id_arg()),
        ))
        .subcommand(Command::new("rm").about("Delete a subscription").arg(id_arg()))
}

fn budget_cmd() -> Command {
    let fields = |cmd: Command| {
        cmd.arg(Arg::new("category").long("category").required(true))
            .arg(Arg::new("subcategory").long("subcategory").required(true))
            .arg(Arg::new("amount").long("amount").required(true))
            .arg(Arg::new("method").long("method"))
            .arg(
                Arg::new("pay_type")
                    .long("pay-type")
                    .value_parser(["Manual", "Auto"])
                    .default_value("Manual"),
            )
            .arg(
                Arg::new("due_day")
                    .long("due-day")
                    .value_parser(value_parser!(u32).range(1..=31)),
            )
    };
    Command::new("budget")
        .about("Recurring budget line items and their paid state")
        .subcommand(fields(Command::new("add").about("Add a budget line")))
        .subcommand(json_flags(
            Command::new("list").about("List budgets with this period's paid state"),
        ))
        .subcommand(
            Command::new("toggle")
                .about("Flip paid/unpaid for a period")
                .arg(id_arg())
                .arg(
                    Arg::new("period")
                        .long("period")
                        .value_name("YYYY-MM")
                        .help("Defaults to the current period"),
                ),
        )
        .subcommand(
            Command::new("sweep")
                .about("Mark all due Auto budgets paid for the current period"),
        )
        .subcommand(fields(
            Command::new("edit")
                .about("Overwrite a budget (paid months are preserved)")
                .arg(id_arg()),
        ))
        .subcommand(Command::new("rm").about("Delete a budget").arg(id_arg()))
}

fn points_cmd() -> Command {
    Command::new("points")
        .about("Credit-card point rules")
        .subcommand(
            Command::new("add")
                .about("Add a point rule")
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("subcategory").long("subcategory").required(true))
                .arg(Arg::new("card").long("card").required(true))
                .arg(Arg::new("multiplier").long("multiplier").required(true)),
        )
        .subcommand(json_flags(Command::new("list").about("List point rules")))
        .subcommand(Command::new("rm").about("Delete a point rule").arg(id_arg()))
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Expense categories and subcategories")
        .subcommand(
            Command::new("add")
                .about("Add a category")
                .arg(Arg::new("name").long("name").required(true)),
        )
        .subcommand(json_flags(Command::new("list").about("List categories")))
        .subcommand(
            Command::new("rename")
                .about("Rename a category")
                .arg(id_arg())
                .arg(Arg::new("name").long("name").required(true)),
        )
        .subcommand(Command::new("rm").about("Delete a category").arg(id_arg()))
        .subcommand(
            Command::new("sub")
                .about("Manage subcategories")
                .subcommand(
                    Command::new("add")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("rename")
                        .arg(id_arg())
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true)),
                ),
        )
}

fn payment_cmd() -> Command {
    Command::new("payment")
        .about("Payment methods")
        .subcommand(
            Command::new("add")
                .about("Add a payment method")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("type").long("type").required(true)),
        )
        .subcommand(json_flags(Command::new("list").about("List payment methods")))
        .subcommand(Command::new("rm").about("Delete a payment method").arg(id_arg()))
}

fn person_cmd() -> Command {
    Command::new("person")
        .about("People and birthdays")
        .subcommand(
            Command::new("add")
                .about("Add a person")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("birthday").long("birthday").required(true)),
        )
        .subcommand(json_flags(Command::new("list").about("List people")))
        .subcommand(Command::new("birthdays").about("Birthdays in the next 30 days"))
        .subcommand(Command::new("rm").about("Delete a person").arg(id_arg()))
}

fn grocery_cmd() -> Command {
    Command::new("grocery")
        .about("Grocery items and shopping lists")
        .subcommand(
            Command::new("item")
                .about("Tracked grocery item names")
                .subcommand(
                    Command::new("add").arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(Command::new("list"))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("list")
                .about("Shopping lists")
                .subcommand(
                    Command::new("create")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("item")
                                .long("item")
                                .action(ArgAction::Append)
                                .value_name("NAME=AMOUNT")
                                .help("Repeatable; amount defaults to 0"),
                        ),
                )
                .subcommand(Command::new("show"))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
}

fn dashboard_cmd() -> Command {
    Command::new("dashboard")
        .about("Derived views over the current data")
        .subcommand(json_flags(
            Command::new("feed").about("Recent and upcoming cash events (7-day windows)"),
        ))
        .subcommand(Command::new("summary").about("Budgeted / spent / remaining cards"))
        .subcommand(
            Command::new("calendar")
                .about("Expense calendar for a month")
                .arg(Arg::new("month").long("month").value_name("YYYY-MM")),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Monthly and yearly reports")
        .subcommand(json_flags(
            Command::new("monthly")
                .about("Income vs expenses, budget vs actual, spend and points")
                .arg(Arg::new("month").long("month").required(true).value_name("YYYY-MM")),
        ))
        .subcommand(json_flags(
            Command::new("yearly")
                .about("Yearly spend breakdowns and item price history")
                .arg(Arg::new("year").long("year").required(true).value_name("YYYY"))
                .arg(
                    Arg::new("item")
                        .long("item")
                        .help("Grocery item name for the price-history table"),
                ),
        ))
}
