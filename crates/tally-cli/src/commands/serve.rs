//! Server command implementation

use std::path::Path;

use anyhow::Result;
use tally_server::ServerConfig;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    no_encrypt: bool,
    static_dir: Option<&Path>,
) -> Result<()> {
    println!("🚀 Starting Tally web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    // Parse API keys from environment (comma-separated)
    let api_keys: Vec<String> = std::env::var("TALLY_API_KEYS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    tracing::debug!("Loaded {} API keys from TALLY_API_KEYS", api_keys.len());

    // Parse allowed CORS origins from environment (comma-separated)
    let allowed_origins: Vec<String> = std::env::var("TALLY_ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else {
        println!("   🔒 Authentication: identity header from deployment edge");
        if !api_keys.is_empty() {
            println!("   🔑 API keys: {} configured", api_keys.len());
        } else {
            println!("      Set TALLY_API_KEYS for Bearer token access");
        }
    }

    let db = open_db(db_path, no_encrypt)?;

    let config = ServerConfig {
        require_auth: !no_auth,
        allowed_origins,
        api_keys,
    };

    let static_dir = static_dir.and_then(|p| p.to_str());
    tally_server::serve_with_config(db, host, port, static_dir, config).await
}
