//! Database tests

use super::*;
use crate::categories::{ExpenseCategory, TransactionType};
use crate::models::{NewTransaction, TransactionUpdate};
use crate::period::Period;
use chrono::NaiveDate;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn new_expense(amount: f64, description: &str, day: &str, category: &str) -> NewTransaction {
    NewTransaction::new(amount, description, date(day), TransactionType::Expense, category).unwrap()
}

#[test]
fn test_in_memory_db() {
    let db = Database::in_memory().unwrap();
    assert_eq!(db.count_transactions().unwrap(), 0);
    assert_eq!(db.count_budgets().unwrap(), 0);
}

#[test]
fn test_is_encrypted_reflects_how_the_pool_was_opened() {
    let db = Database::in_memory().unwrap();
    assert!(!db.is_encrypted());

    let path = format!("/tmp/tally_test_enc_{}.db", std::process::id());
    let _ = std::fs::remove_file(&path);
    let encrypted = Database::new_with_key(&path, Some("correct horse battery")).unwrap();
    assert!(encrypted.is_encrypted());
    drop(encrypted);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_get_or_create_user_is_idempotent() {
    let db = Database::in_memory().unwrap();

    let user = db.get_or_create_user("sam@example.com").unwrap();
    let again = db.get_or_create_user("sam@example.com").unwrap();
    assert_eq!(user.id, again.id);
    assert_eq!(db.count_users().unwrap(), 1);

    let other = db.get_or_create_user("kim@example.com").unwrap();
    assert_ne!(user.id, other.id);
}

#[test]
fn test_transaction_crud() {
    let db = Database::in_memory().unwrap();
    let user = db.get_or_create_user("sam@example.com").unwrap();

    let tx = db
        .insert_transaction(user.id, &new_expense(50.0, "Groceries", "2025-06-05", "Food & Dining"))
        .unwrap();
    assert!(tx.id > 0);
    assert_eq!(tx.amount, 50.0);
    assert_eq!(tx.kind, TransactionType::Expense);
    assert_eq!(tx.category.as_str(), "Food & Dining");

    let fetched = db.get_transaction(user.id, tx.id).unwrap().unwrap();
    assert_eq!(fetched.description, "Groceries");
    assert_eq!(fetched.date, date("2025-06-05"));

    let updated = db
        .update_transaction(
            user.id,
            tx.id,
            &TransactionUpdate {
                amount: Some(75.0),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.amount, 75.0);
    assert_eq!(updated.description, "Groceries");

    db.delete_transaction(user.id, tx.id).unwrap();
    assert!(db.get_transaction(user.id, tx.id).unwrap().is_none());
    assert!(matches!(
        db.delete_transaction(user.id, tx.id),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn test_transactions_are_isolated_per_user() {
    let db = Database::in_memory().unwrap();
    let sam = db.get_or_create_user("sam@example.com").unwrap();
    let kim = db.get_or_create_user("kim@example.com").unwrap();

    let tx = db
        .insert_transaction(sam.id, &new_expense(20.0, "Coffee", "2025-06-01", "Food & Dining"))
        .unwrap();

    assert!(db.get_transaction(kim.id, tx.id).unwrap().is_none());
    assert!(db.list_transactions(kim.id).unwrap().is_empty());
    assert!(matches!(
        db.delete_transaction(kim.id, tx.id),
        Err(Error::NotFound(_))
    ));
    // Still there for the owner
    assert!(db.get_transaction(sam.id, tx.id).unwrap().is_some());
}

#[test]
fn test_list_transactions_newest_first() {
    let db = Database::in_memory().unwrap();
    let user = db.get_or_create_user("sam@example.com").unwrap();

    db.insert_transaction(user.id, &new_expense(10.0, "First", "2025-06-01", "Other"))
        .unwrap();
    db.insert_transaction(user.id, &new_expense(20.0, "Third", "2025-06-20", "Other"))
        .unwrap();
    db.insert_transaction(user.id, &new_expense(30.0, "Second", "2025-06-10", "Other"))
        .unwrap();

    let list = db.list_transactions(user.id).unwrap();
    let descriptions: Vec<&str> = list.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(descriptions, vec!["Third", "Second", "First"]);
}

#[test]
fn test_update_revalidates_category_against_type() {
    let db = Database::in_memory().unwrap();
    let user = db.get_or_create_user("sam@example.com").unwrap();

    let tx = db
        .insert_transaction(user.id, &new_expense(100.0, "Bus pass", "2025-06-02", "Transportation"))
        .unwrap();

    // Switching type without a matching category must fail
    let result = db.update_transaction(
        user.id,
        tx.id,
        &TransactionUpdate {
            kind: Some(TransactionType::Income),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(Error::InvalidData(_))));

    // Switching type and category together is fine
    let updated = db
        .update_transaction(
            user.id,
            tx.id,
            &TransactionUpdate {
                kind: Some(TransactionType::Income),
                category: Some("Salary".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.kind, TransactionType::Income);
    assert_eq!(updated.category.as_str(), "Salary");
}

#[test]
fn test_expense_totals_by_category() {
    let db = Database::in_memory().unwrap();
    let user = db.get_or_create_user("sam@example.com").unwrap();

    db.insert_transaction(user.id, &new_expense(50.0, "Groceries", "2025-06-05", "Food & Dining"))
        .unwrap();
    db.insert_transaction(user.id, &new_expense(60.0, "Dinner", "2025-06-10", "Food & Dining"))
        .unwrap();
    db.insert_transaction(user.id, &new_expense(200.0, "Flight", "2025-06-12", "Travel"))
        .unwrap();
    // Outside the range
    db.insert_transaction(user.id, &new_expense(99.0, "May rent", "2025-05-31", "Bills & Utilities"))
        .unwrap();
    // Income never counts toward expense totals
    let salary =
        NewTransaction::new(1000.0, "Salary", date("2025-06-01"), TransactionType::Income, "Salary")
            .unwrap();
    db.insert_transaction(user.id, &salary).unwrap();

    let totals = db
        .expense_totals_by_category(user.id, date("2025-06-01"), date("2025-06-30"))
        .unwrap();

    assert_eq!(totals.len(), 2);
    // Sorted by total descending
    assert_eq!(totals[0].category, ExpenseCategory::Travel);
    assert_eq!(totals[0].total, 200.0);
    assert_eq!(totals[0].count, 1);
    assert_eq!(totals[1].category, ExpenseCategory::FoodDining);
    assert_eq!(totals[1].total, 110.0);
    assert_eq!(totals[1].count, 2);
    assert_eq!(totals[1].average, 55.0);
}

#[test]
fn test_monthly_expenses_zero_fills_all_twelve_months() {
    let db = Database::in_memory().unwrap();
    let user = db.get_or_create_user("sam@example.com").unwrap();

    db.insert_transaction(user.id, &new_expense(40.0, "Movie", "2025-03-08", "Entertainment"))
        .unwrap();
    db.insert_transaction(user.id, &new_expense(60.0, "Show", "2025-03-20", "Entertainment"))
        .unwrap();
    // Different year, must not appear
    db.insert_transaction(user.id, &new_expense(500.0, "Old", "2024-03-01", "Entertainment"))
        .unwrap();

    let months = db.monthly_expenses(user.id, 2025).unwrap();
    assert_eq!(months.len(), 12);
    assert_eq!(months[0].month, "Jan");
    assert_eq!(months[0].amount, 0.0);
    assert_eq!(months[2].month, "Mar");
    assert_eq!(months[2].amount, 100.0);
    assert_eq!(months[2].count, 2);
    assert_eq!(months[11].month, "Dec");
}

#[test]
fn test_category_breakdown_in_registry_order() {
    let db = Database::in_memory().unwrap();
    let user = db.get_or_create_user("sam@example.com").unwrap();

    db.insert_transaction(user.id, &new_expense(30.0, "Pharmacy", "2025-06-01", "Healthcare"))
        .unwrap();

    let breakdown = db.category_breakdown(user.id, TransactionType::Expense).unwrap();
    assert_eq!(breakdown.len(), 12);
    assert_eq!(breakdown[0].category.as_str(), "Food & Dining");
    assert_eq!(breakdown[0].amount, 0.0);
    assert_eq!(breakdown[5].category.as_str(), "Healthcare");
    assert_eq!(breakdown[5].amount, 30.0);
    assert_eq!(breakdown[5].count, 1);

    let income = db.category_breakdown(user.id, TransactionType::Income).unwrap();
    assert_eq!(income.len(), 7);
    assert!(income.iter().all(|row| row.amount == 0.0));
}

#[test]
fn test_budget_upsert_replaces_in_place() {
    let db = Database::in_memory().unwrap();
    let user = db.get_or_create_user("sam@example.com").unwrap();
    let period = Period::new(6, 2025).unwrap();

    let first = db
        .upsert_budget(user.id, ExpenseCategory::FoodDining, 200.0, period)
        .unwrap();
    let second = db
        .upsert_budget(user.id, ExpenseCategory::FoodDining, 350.0, period)
        .unwrap();

    // Same row, new amount, no duplicate
    assert_eq!(first.id, second.id);
    assert_eq!(second.amount, 350.0);
    assert_eq!(db.count_budgets().unwrap(), 1);

    let budgets = db.list_budgets(user.id, period).unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].amount, 350.0);
}

#[test]
fn test_budget_keys_are_scoped_by_category_period_and_user() {
    let db = Database::in_memory().unwrap();
    let sam = db.get_or_create_user("sam@example.com").unwrap();
    let kim = db.get_or_create_user("kim@example.com").unwrap();
    let june = Period::new(6, 2025).unwrap();
    let july = Period::new(7, 2025).unwrap();

    db.upsert_budget(sam.id, ExpenseCategory::FoodDining, 200.0, june).unwrap();
    db.upsert_budget(sam.id, ExpenseCategory::Travel, 400.0, june).unwrap();
    db.upsert_budget(sam.id, ExpenseCategory::FoodDining, 250.0, july).unwrap();
    db.upsert_budget(kim.id, ExpenseCategory::FoodDining, 100.0, june).unwrap();

    assert_eq!(db.count_budgets().unwrap(), 4);

    let sam_june = db.list_budgets(sam.id, june).unwrap();
    assert_eq!(sam_june.len(), 2);
    // Ordered by category label
    assert_eq!(sam_june[0].category, ExpenseCategory::FoodDining);
    assert_eq!(sam_june[1].category, ExpenseCategory::Travel);

    let kim_june = db.list_budgets(kim.id, june).unwrap();
    assert_eq!(kim_june.len(), 1);
    assert_eq!(kim_june[0].amount, 100.0);
}

#[test]
fn test_budget_rejects_non_positive_amount() {
    let db = Database::in_memory().unwrap();
    let user = db.get_or_create_user("sam@example.com").unwrap();
    let period = Period::new(6, 2025).unwrap();

    assert!(matches!(
        db.upsert_budget(user.id, ExpenseCategory::Other, 0.0, period),
        Err(Error::InvalidData(_))
    ));
    assert!(matches!(
        db.upsert_budget(user.id, ExpenseCategory::Other, -5.0, period),
        Err(Error::InvalidData(_))
    ));
}

#[test]
fn test_budget_delete() {
    let db = Database::in_memory().unwrap();
    let user = db.get_or_create_user("sam@example.com").unwrap();
    let period = Period::new(6, 2025).unwrap();

    let budget = db
        .upsert_budget(user.id, ExpenseCategory::Insurance, 80.0, period)
        .unwrap();

    db.delete_budget(user.id, budget.id).unwrap();
    assert!(db.get_budget(user.id, budget.id).unwrap().is_none());
    assert!(matches!(
        db.delete_budget(user.id, budget.id),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn test_new_transaction_validation() {
    // Non-positive amount
    assert!(NewTransaction::new(0.0, "x", date("2025-06-01"), TransactionType::Expense, "Other")
        .is_err());
    // Blank description
    assert!(NewTransaction::new(10.0, "  ", date("2025-06-01"), TransactionType::Expense, "Other")
        .is_err());
    // Category from the wrong registry
    assert!(NewTransaction::new(
        10.0,
        "Paycheck",
        date("2025-06-01"),
        TransactionType::Expense,
        "Salary"
    )
    .is_err());
}
