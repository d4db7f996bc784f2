//! User resolution
//!
//! There is no registration flow: identity arrives from the deployment edge
//! and a row is created the first time an email touches the API.

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::User;

impl Database {
    /// Look up a user by email, creating the row if it does not exist
    pub fn get_or_create_user(&self, email: &str) -> Result<User> {
        let conn = self.conn()?;

        // The unique index on email makes the insert race-safe; a concurrent
        // insert for the same email is simply ignored and re-read.
        conn.execute(
            "INSERT OR IGNORE INTO users (email) VALUES (?)",
            params![email],
        )?;

        let user = conn.query_row(
            "SELECT id, email, created_at FROM users WHERE email = ?",
            params![email],
            |row| {
                Ok(User {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    created_at: parse_datetime(&row.get::<_, String>(2)?),
                })
            },
        )?;

        Ok(user)
    }

    /// Count users (for the status command)
    pub fn count_users(&self) -> Result<i64> {
        let conn = self.conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?)
    }
}
