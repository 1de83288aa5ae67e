// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use budgetmaster::cli;
use budgetmaster::commands::importer;
use budgetmaster::commands::transactions::{TxFilter, distinct_types, query_rows};
use budgetmaster::models::Category;
use rust_decimal::Decimal;
use common::{APRIL, conn, latin1_statement, row};

fn run_import(conn: &mut rusqlite::Connection, args: &[&str]) {
    let mut argv = vec!["budgetmaster", "import"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(conn, import_m).unwrap();
    } else {
        panic!("no import subcommand");
    }
}

#[test]
fn import_normalizes_and_stores_for_user() {
    let mut conn = conn();
    let file = latin1_statement(APRIL);
    let path = file.path().to_str().unwrap().to_string();
    let padded = format!("  {}  ", path);
    run_import(&mut conn, &["--user", " alice ", "--path", padded.as_str()]);

    let rows = query_rows(&conn, "alice", &TxFilter::default()).unwrap();
    assert_eq!(rows.len(), 3);
    // newest first
    assert_eq!(rows[0].date.to_string(), "2025-04-07");
    assert_eq!(rows[0].user_id, "alice");
    assert_eq!(rows[0].amount, Decimal::new(8990, 2));
    assert_eq!(rows[0].description, "rema 1000");
    assert_eq!(rows[1].category, Category::Income);
    assert_eq!(rows[1].amount, Decimal::from(35000));
    assert!(!rows[1].created_at.is_empty());
    assert_eq!(rows[1].description, "");
    assert_eq!(rows[2].r#type, "food");
}

#[test]
fn import_appends_unless_replace() {
    let mut conn = conn();
    let file = latin1_statement(APRIL);
    let path = file.path().to_str().unwrap().to_string();

    run_import(&mut conn, &["--user", "alice", "--path", path.as_str()]);
    run_import(&mut conn, &["--user", "alice", "--path", path.as_str()]);
    assert_eq!(query_rows(&conn, "alice", &TxFilter::default()).unwrap().len(), 6);

    run_import(&mut conn, &["--user", "alice", "--path", path.as_str(), "--replace"]);
    assert_eq!(query_rows(&conn, "alice", &TxFilter::default()).unwrap().len(), 3);
}

#[test]
fn replace_only_touches_the_calling_user() {
    let mut conn = conn();
    importer::insert_rows(
        &mut conn,
        "bob",
        &[row("2025-03-01", "rent", Category::Expense, "9000", "")],
        false,
    )
    .unwrap();
    importer::insert_rows(
        &mut conn,
        "alice",
        &[row("2025-03-02", "food", Category::Expense, "12", "")],
        true,
    )
    .unwrap();

    let bob = query_rows(&conn, "bob", &TxFilter::default()).unwrap();
    assert_eq!(bob.len(), 1);
    assert_eq!(bob[0].r#type, "rent");
}

#[test]
fn distinct_types_in_first_seen_order() {
    let mut conn = conn();
    importer::insert_rows(
        &mut conn,
        "alice",
        &[
            row("2025-04-01", "salary", Category::Income, "100", ""),
            row("2025-04-02", "food", Category::Expense, "5", ""),
            row("2025-04-03", "", Category::Expense, "5", ""),
            row("2025-04-04", "salary", Category::Income, "100", ""),
            row("2025-04-05", "transport", Category::Expense, "30", ""),
        ],
        false,
    )
    .unwrap();
    importer::insert_rows(
        &mut conn,
        "bob",
        &[row("2025-04-01", "gaming", Category::Expense, "60", "")],
        false,
    )
    .unwrap();

    assert_eq!(
        distinct_types(&conn, "alice").unwrap(),
        vec!["salary", "food", "transport"]
    );
    assert!(distinct_types(&conn, "nobody").unwrap().is_empty());
}

#[test]
fn import_of_unreadable_statement_stores_nothing() {
    let mut conn = conn();
    let file = latin1_statement("");
    let path = file.path().to_str().unwrap().to_string();
    let matches =
        cli::build_cli().get_matches_from(["budgetmaster", "import", "--user", "alice", "--path", path.as_str()]);
    let Some(("import", import_m)) = matches.subcommand() else {
        panic!("no import subcommand");
    };
    let err = importer::handle(&mut conn, import_m).unwrap_err();
    assert!(format!("{:#}", err).contains("no header row"));
    assert!(query_rows(&conn, "alice", &TxFilter::default()).unwrap().is_empty());
}

#[test]
fn import_rejects_blank_user() {
    let mut conn = conn();
    let file = latin1_statement(APRIL);
    let path = file.path().to_str().unwrap().to_string();
    let matches =
        cli::build_cli().get_matches_from(["budgetmaster", "import", "--user", "  ", "--path", path.as_str()]);
    let Some(("import", import_m)) = matches.subcommand() else {
        panic!("no import subcommand");
    };
    assert!(importer::handle(&mut conn, import_m).is_err());
}
