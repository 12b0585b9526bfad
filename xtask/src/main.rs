// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! Lint, build and test orchestration for the staff ledger workspace, plus
//! `verify-schema`, which migrates a scratch `SQLite` database with the
//! embedded persistence migrations and checks the ledger schema against what
//! the store relies on:
//!
//! - the `employees`, `attendance` and `financial_transactions` tables and
//!   their columns
//! - one attendance row per employee and date
//! - `ON DELETE RESTRICT` foreign keys from both child tables to `employees`
//! - the append-only triggers on `financial_transactions`
//! - that every migration reverts and re-applies cleanly

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{fmt::Debug, io, process::Output, vec};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{eyre::Context, eyre::eyre, Result};
use diesel::sql_types::{Integer, Text};
use diesel::{Connection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use duct::cmd;
use std::collections::{BTreeMap, BTreeSet};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");

/// Tables and columns the ledger store reads and writes.
const EXPECTED_TABLES: [(&str, &[&str]); 3] = [
    (
        "employees",
        &[
            "employee_id",
            "name",
            "position",
            "phone",
            "daily_wage_cents",
            "current_balance_cents",
            "total_bonuses_cents",
            "total_deductions_cents",
            "payment_status",
            "is_active",
            "hire_date",
            "last_payment_date",
        ],
    ),
    (
        "attendance",
        &[
            "attendance_id",
            "employee_id",
            "attendance_date",
            "status",
            "check_in_time",
            "check_out_time",
            "notes",
        ],
    ),
    (
        "financial_transactions",
        &[
            "transaction_id",
            "employee_id",
            "transaction_type",
            "amount_cents",
            "description",
            "transaction_date",
            "created_at",
        ],
    ),
];

/// Triggers that keep the ledger append-only.
const EXPECTED_TRIGGERS: [&str; 2] = [
    "financial_transactions_no_update",
    "financial_transactions_no_delete",
];

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Everything CI runs: lint, deny, machete, build, test, verify-schema
    CI,

    /// Build all targets
    #[command(visible_alias = "b")]
    Build,

    /// Check dependency licenses and advisories
    #[command(visible_alias = "cd")]
    Deny,

    /// Check for unused dependencies
    #[command(visible_alias = "m")]
    Machete,

    /// Clippy, rustdoc, rustfmt and typos
    #[command(visible_alias = "l")]
    Lint,

    /// Clippy with warnings denied
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Rustdoc with warnings denied
    #[command(visible_alias = "d")]
    LintDocs,

    /// Rustfmt in check mode
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Spell check
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Apply rustfmt
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run every test target, including the file-database concurrency tests
    #[command(visible_alias = "t")]
    Test,

    /// Migrate a scratch `SQLite` database and verify the ledger schema
    #[command(visible_alias = "vs")]
    VerifySchema,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Deny => deny(),
            Self::Machete => machete(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::LintTypos => lint_typos(),
            Self::FixFormatting => fix_format(),
            Self::Test => test(),
            Self::VerifySchema => verify_schema(),
        }
    }
}

fn ci() -> Result<()> {
    lint()?;
    deny()?;
    machete()?;
    build()?;
    test()?;
    verify_schema()
}

fn deny() -> Result<()> {
    run_cargo(vec!["deny", "check"])
}

fn machete() -> Result<()> {
    cmd!("cargo-machete").run_with_trace()?;
    Ok(())
}

fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    lint_typos()
}

fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Builds rustdoc for each default member with docs.rs flags.
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        tracing::info!(package = %package.name, "Checking docs");
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

fn fix_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all"])
}

fn lint_typos() -> Result<()> {
    cmd!("typos").run_with_trace()?;
    Ok(())
}

fn test() -> Result<()> {
    run_cargo(vec!["test", "--all-targets"])
}

fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // set by the outer cargo invocation; would pin the stable toolchain
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Migrate a scratch database and check the ledger schema.
fn verify_schema() -> Result<()> {
    tracing::info!("Starting ledger schema verification");

    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .wrap_err("Failed to enable foreign keys on SQLite")?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply migrations: {e}"))?;
    tracing::info!("Migrations applied successfully");

    let schema = introspect_schema(&mut conn)?;
    check_schema(&schema)?;
    check_triggers(&mut conn)?;

    tracing::info!("Reverting and re-applying migrations");
    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to revert migrations: {e}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to re-apply migrations: {e}"))?;

    let reapplied = introspect_schema(&mut conn)?;
    if reapplied != schema {
        return Err(eyre!("Schema differs after revert and re-apply"));
    }

    tracing::info!("✓ Ledger schema verification passed");
    Ok(())
}

/// Normalized schema representation
#[derive(Debug, Clone, PartialEq, Eq)]
struct Schema {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Table {
    columns: BTreeSet<String>,
    foreign_keys: BTreeSet<ForeignKey>,
    unique_constraints: BTreeSet<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKey {
    from_column: String,
    to_table: String,
    to_column: String,
    on_delete: String,
}

/// Introspect the `SQLite` schema
fn introspect_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
        #[diesel(sql_type = Text)]
        on_delete: String,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Integer)]
        unique: i32,
    }

    #[derive(QueryableByName)]
    struct IndexColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let mut schema = Schema {
        tables: BTreeMap::new(),
    };

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name"
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    for table in tables {
        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get columns for table {}", table.name))?;

        let fks: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({})", table.name))
                .load(conn)
                .wrap_err(format!(
                    "Failed to get foreign keys for table {}",
                    table.name
                ))?;

        let indexes: Vec<IndexInfo> =
            diesel::sql_query(format!("PRAGMA index_list({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get indexes for table {}", table.name))?;

        let mut unique_constraints = BTreeSet::new();
        for idx in indexes.into_iter().filter(|idx| idx.unique == 1) {
            let index_columns: Vec<IndexColumnInfo> =
                diesel::sql_query(format!("PRAGMA index_info({})", idx.name))
                    .load(conn)
                    .wrap_err(format!("Failed to get index columns for {}", idx.name))?;
            unique_constraints.insert(index_columns.into_iter().map(|c| c.name).collect());
        }

        schema.tables.insert(
            table.name,
            Table {
                columns: columns.into_iter().map(|c| c.name).collect(),
                foreign_keys: fks
                    .into_iter()
                    .map(|fk| ForeignKey {
                        from_column: fk.from,
                        to_table: fk.table,
                        to_column: fk.to,
                        on_delete: fk.on_delete,
                    })
                    .collect(),
                unique_constraints,
            },
        );
    }

    Ok(schema)
}

/// Compare the introspected schema with what the store relies on
fn check_schema(schema: &Schema) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    for (table_name, expected_columns) in EXPECTED_TABLES {
        let Some(table) = schema.tables.get(table_name) else {
            errors.push(format!("Missing table: {table_name}"));
            continue;
        };

        for column in expected_columns {
            if !table.columns.contains(*column) {
                errors.push(format!("Table {table_name}: missing column {column}"));
            }
        }

        if table_name != "employees" {
            let restricted = table.foreign_keys.iter().any(|fk| {
                fk.from_column == "employee_id"
                    && fk.to_table == "employees"
                    && fk.to_column == "employee_id"
                    && fk.on_delete == "RESTRICT"
            });
            if !restricted {
                errors.push(format!(
                    "Table {table_name}: employee_id must reference employees(employee_id) ON DELETE RESTRICT"
                ));
            }
        }
    }

    let one_mark_per_day = vec![String::from("employee_id"), String::from("attendance_date")];
    if !schema
        .tables
        .get("attendance")
        .is_some_and(|t| t.unique_constraints.contains(&one_mark_per_day))
    {
        errors.push(String::from(
            "Table attendance: missing UNIQUE (employee_id, attendance_date)",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        for error in &errors {
            tracing::error!("{error}");
        }
        Err(eyre!("Schema verification found {} problem(s)", errors.len()))
    }
}

/// Check that the ledger's append-only triggers exist
fn check_triggers(conn: &mut SqliteConnection) -> Result<()> {
    #[derive(QueryableByName)]
    struct TriggerName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let triggers: Vec<TriggerName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='trigger' AND tbl_name='financial_transactions'",
    )
    .load(conn)
    .wrap_err("Failed to query SQLite triggers")?;

    let present: BTreeSet<String> = triggers.into_iter().map(|t| t.name).collect();
    let missing: Vec<&str> = EXPECTED_TRIGGERS
        .into_iter()
        .filter(|name| !present.contains(*name))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(eyre!("Missing append-only triggers: {}", missing.join(", ")))
    }
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
/// Logs each external command before and after a failure.
trait ExpressionExt {
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!(command = ?self, "Running");
        self.run()
            .inspect_err(|e| tracing::error!(command = ?self, error = %e, "Command failed"))
    }
}
