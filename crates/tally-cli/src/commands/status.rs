//! Status command implementation

use std::path::Path;

use anyhow::Result;

use super::open_db;

pub fn cmd_status(db_path: &Path, no_encrypt: bool) -> Result<()> {
    use std::fs;
    use tally_core::db::DB_KEY_ENV;

    println!();
    println!("📊 Tally Status");
    println!("   ─────────────────────────────────────────────────────────────");

    // Database path
    println!("   Database: {}", db_path.display());

    if !db_path.exists() {
        println!("   Size: (database not initialized)");
        println!();
        println!("   Run 'tally init' to create it.");
        println!();
        return Ok(());
    }

    if let Ok(metadata) = fs::metadata(db_path) {
        let size_kb = metadata.len() as f64 / 1024.0;
        if size_kb < 1024.0 {
            println!("   Size: {:.1} KB", size_kb);
        } else {
            println!("   Size: {:.1} MB", size_kb / 1024.0);
        }
    }

    // Open the database and report its actual state
    match open_db(db_path, no_encrypt) {
        Ok(db) => {
            if db.is_encrypted() {
                println!("   🔒 Encryption: ENABLED ({}=***)", DB_KEY_ENV);
            } else {
                println!("   ⚠️  Encryption: DISABLED");
            }

            println!();
            println!("   Users: {}", db.count_users()?);
            println!("   Transactions: {}", db.count_transactions()?);
            println!("   Budgets: {}", db.count_budgets()?);
        }
        Err(e) => {
            println!();
            println!("   ❌ Error opening database: {}", e);
            let has_key = std::env::var(DB_KEY_ENV).is_ok();
            if !no_encrypt && !has_key {
                println!("      Set {} or use --no-encrypt", DB_KEY_ENV);
            } else if has_key {
                println!("      (Check if {} is correct)", DB_KEY_ENV);
            }
        }
    }

    println!();
    Ok(())
}
