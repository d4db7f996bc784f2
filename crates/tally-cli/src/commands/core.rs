//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_seed` - Insert demo transactions

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tally_core::db::Database;
use tally_core::models::NewTransaction;
use tally_core::TransactionType;

/// Identity seeded data belongs to, matching the server's no-auth identity
const SEED_USER: &str = "local-dev";

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let _db = open_db(db_path, no_encrypt)?;

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Start the web UI: tally serve");
    println!("  2. Optionally load demo data: tally seed");

    Ok(())
}

/// Demo transactions for a fresh install
fn demo_transactions() -> Result<Vec<NewTransaction>> {
    let rows: [(f64, &str, &str, TransactionType, &str); 6] = [
        (
            1200.0,
            "Salary for July",
            "2025-07-01",
            TransactionType::Income,
            "Salary",
        ),
        (
            150.0,
            "Groceries",
            "2025-07-02",
            TransactionType::Expense,
            "Food & Dining",
        ),
        (
            60.0,
            "Bus pass",
            "2025-07-03",
            TransactionType::Expense,
            "Transportation",
        ),
        (
            200.0,
            "Freelance project",
            "2025-07-04",
            TransactionType::Income,
            "Freelance",
        ),
        (
            80.0,
            "Movie night",
            "2025-07-05",
            TransactionType::Expense,
            "Entertainment",
        ),
        (
            100.0,
            "Electricity bill",
            "2025-07-06",
            TransactionType::Expense,
            "Bills & Utilities",
        ),
    ];

    rows.iter()
        .map(|(amount, description, date, kind, category)| {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .context("Invalid demo transaction date")?;
            NewTransaction::new(*amount, description, date, *kind, category)
                .context("Invalid demo transaction")
        })
        .collect()
}

pub fn cmd_seed(db_path: &Path, no_encrypt: bool) -> Result<()> {
    let db = open_db(db_path, no_encrypt)?;
    let user = db.get_or_create_user(SEED_USER)?;

    let transactions = demo_transactions()?;
    let count = transactions.len();
    for tx in &transactions {
        db.insert_transaction(user.id, tx)?;
    }

    println!("✅ Inserted {} demo transactions for '{}'", count, SEED_USER);
    println!("   Run 'tally serve --no-auth' to browse them.");

    Ok(())
}
