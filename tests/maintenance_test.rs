// ABOUTME: Tests for charset conversion, engine conversion and optimize
// ABOUTME: Runs the bulk operations against an in-memory session and inspects the statements

mod common;

use common::FakeSession;
use mysql_admin_tools::error::ValidationError;
use mysql_admin_tools::filters::Selection;
use mysql_admin_tools::maintenance::{
    convert_charset, convert_engine, optimize_tables, ForeignKeyChecks,
};
use mysql_admin_tools::mysql::Session;

fn shop() -> FakeSession {
    FakeSession::new()
        .with_schema("shop")
        .with_table("shop", "orders", "InnoDB", "latin1_swedish_ci")
        .with_table("shop", "products", "Aria", "utf8mb4_unicode_ci")
        .with_table("shop", "users", "InnoDB", "latin1_swedish_ci")
        .with_view("shop", "order_totals")
}

fn shop_selection() -> Selection {
    Selection::new(Some("shop".into()), vec![]).unwrap()
}

#[tokio::test]
async fn test_charset_conversion_brackets_with_foreign_key_checks() {
    let mut session = shop();
    let report = convert_charset(&mut session, &shop_selection(), "utf8mb4_unicode_ci")
        .await
        .unwrap();

    assert_eq!(report.visited, vec!["shop.orders", "shop.users"]);
    assert_eq!(report.skipped, vec!["shop.products"]);
    assert_eq!(
        session.statements,
        vec![
            "SET foreign_key_checks = 0",
            "ALTER TABLE `shop`.`orders` CONVERT TO CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci",
            "ALTER TABLE `shop`.`users` CONVERT TO CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci",
            "SET foreign_key_checks = 1",
        ]
    );
}

#[tokio::test]
async fn test_charset_conversion_is_idempotent() {
    let mut session = shop();
    let selection = shop_selection();

    let first = convert_charset(&mut session, &selection, "utf8mb4_unicode_ci")
        .await
        .unwrap();
    assert_eq!(first.visited.len(), 2);

    session.statements.clear();
    let second = convert_charset(&mut session, &selection, "utf8mb4_unicode_ci")
        .await
        .unwrap();

    assert!(second.visited.is_empty());
    assert_eq!(second.skipped.len(), 3);
    assert!(session.statements_starting_with("ALTER TABLE").is_empty());
}

#[tokio::test]
async fn test_collation_comparison_ignores_case() {
    let mut session = shop();
    let report = convert_charset(&mut session, &shop_selection(), "UTF8MB4_UNICODE_CI")
        .await
        .unwrap();
    assert_eq!(report.skipped, vec!["shop.products"]);
}

#[tokio::test]
async fn test_engine_conversion_only_alters_other_engines() {
    let mut session = FakeSession::new()
        .with_schema("shop")
        .with_table("shop", "orders", "InnoDB", "utf8mb4_general_ci")
        .with_table("shop", "sessions", "Aria", "utf8mb4_general_ci");

    let report = convert_engine(&mut session, &shop_selection(), "InnoDB")
        .await
        .unwrap();

    assert_eq!(
        session.statements_starting_with("ALTER TABLE"),
        vec!["ALTER TABLE `shop`.`sessions` ENGINE = InnoDB"]
    );
    assert_eq!(report.visited, vec!["shop.sessions"]);
    assert_eq!(report.skipped, vec!["shop.orders"]);
}

#[tokio::test]
async fn test_foreign_key_checks_restored_after_failure() {
    let mut session = shop().failing_on("`shop`.`orders`");

    let result = convert_engine(&mut session, &shop_selection(), "MyISAM").await;

    assert!(result.is_err());
    assert_eq!(
        session.statements.last().map(String::as_str),
        Some("SET foreign_key_checks = 1")
    );
    // The loop stops at the first failure
    assert!(session
        .statements_starting_with("ALTER TABLE `shop`.`products`")
        .is_empty());
}

#[tokio::test]
async fn test_alteration_error_wins_over_restore_error() {
    let mut session = shop()
        .failing_on("ENGINE")
        .failing_on("foreign_key_checks = 1");

    let mut guard = ForeignKeyChecks::suspend(&mut session).await.unwrap();
    let outcome = guard
        .session()
        .execute("ALTER TABLE `shop`.`orders` ENGINE = Aria")
        .await;
    let err = guard.restore(outcome).await.unwrap_err();

    assert!(err.to_string().contains("Simulated failure"));
    assert!(err.to_string().contains("ENGINE = Aria"));
}

#[tokio::test]
async fn test_named_tables_are_never_skipped() {
    let mut session = shop();
    let selection = Selection::new(Some("shop".into()), vec!["products".into()]).unwrap();

    let report = convert_engine(&mut session, &selection, "Aria").await.unwrap();

    assert_eq!(report.visited, vec!["shop.products"]);
    assert_eq!(
        session.statements_starting_with("ALTER TABLE"),
        vec!["ALTER TABLE `shop`.`products` ENGINE = Aria"]
    );
}

#[tokio::test]
async fn test_invalid_engine_is_rejected_before_any_statement() {
    let mut session = shop();

    let err = convert_engine(&mut session, &shop_selection(), "InnoDB; DROP TABLE users")
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::InvalidIdentifier { kind: "engine", .. })
    ));
    assert!(session.statements.is_empty());
    assert_eq!(session.queries, 0);
}

#[tokio::test]
async fn test_optimize_always_runs_without_foreign_key_bracketing() {
    let mut session = shop();
    let selection = shop_selection();

    optimize_tables(&mut session, &selection).await.unwrap();
    let report = optimize_tables(&mut session, &selection).await.unwrap();

    assert_eq!(report.visited.len(), 3);
    assert_eq!(session.statements.len(), 6);
    assert!(session
        .statements
        .iter()
        .all(|sql| sql.starts_with("OPTIMIZE TABLE ")));
    assert_eq!(session.statements[0], "OPTIMIZE TABLE `shop`.`orders`");
}

#[tokio::test]
async fn test_all_schemas_are_processed_in_order() {
    let mut session = FakeSession::new()
        .with_schema("zoo")
        .with_schema("crm")
        .with_table("zoo", "animals", "MyISAM", "latin1_swedish_ci")
        .with_table("crm", "contacts", "MyISAM", "latin1_swedish_ci");

    let report = convert_engine(&mut session, &Selection::all(), "InnoDB")
        .await
        .unwrap();

    assert_eq!(report.visited, vec!["crm.contacts", "zoo.animals"]);
}
