// ABOUTME: Tests for resolving schema and table filters against a catalog
// ABOUTME: Covers catalog enumeration, view exclusion and catalog-free named tables

mod common;

use common::FakeSession;
use mysql_admin_tools::filters::Selection;
use mysql_admin_tools::mysql::Quoting;

fn catalog() -> FakeSession {
    FakeSession::new()
        .with_schema("shop")
        .with_schema("crm")
        .with_table("shop", "users", "InnoDB", "utf8mb4_general_ci")
        .with_table("shop", "orders", "InnoDB", "utf8mb4_general_ci")
        .with_view("shop", "recent_orders")
        .with_table("crm", "contacts", "Aria", "utf8mb4_general_ci")
}

fn names(tables: &[mysql_admin_tools::mysql::Table]) -> Vec<String> {
    tables
        .iter()
        .map(|t| t.qualified_name(Quoting::Bare))
        .collect()
}

#[tokio::test]
async fn test_no_filters_resolves_every_base_table() {
    let mut session = catalog();
    let tables = Selection::all().resolve(&mut session).await.unwrap();
    assert_eq!(
        names(&tables),
        vec!["crm.contacts", "shop.orders", "shop.users"]
    );
}

#[tokio::test]
async fn test_schema_filter_skips_schema_listing() {
    let mut session = catalog();
    let selection = Selection::new(Some("shop".into()), vec![]).unwrap();

    let tables = selection.resolve(&mut session).await.unwrap();

    assert_eq!(names(&tables), vec!["shop.orders", "shop.users"]);
    // Only the table listing of "shop" hit the catalog
    assert_eq!(session.queries, 1);
}

#[tokio::test]
async fn test_table_filters_are_taken_as_given() {
    let mut session = catalog();
    let selection =
        Selection::new(Some("shop".into()), vec!["users".into(), "missing".into()]).unwrap();

    let tables = selection.resolve(&mut session).await.unwrap();

    assert_eq!(names(&tables), vec!["shop.users", "shop.missing"]);
    assert!(tables.iter().all(|t| t.engine.is_empty()));
    assert_eq!(session.queries, 0);
}

#[tokio::test]
async fn test_unknown_schema_resolves_to_nothing() {
    let mut session = catalog();
    let selection = Selection::new(Some("nope".into()), vec![]).unwrap();
    assert!(selection.resolve(&mut session).await.unwrap().is_empty());
}
