//! HTTP request handlers organized by domain

pub mod auth;
pub mod budgets;
pub mod transactions;

// Re-export all handlers for use in router
pub use auth::*;
pub use budgets::*;
pub use transactions::*;
