use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    spendlog_db::health_check(&pool).await.unwrap();

    for table in ["categories", "expenses", "expense_notes"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The constraint names the error mapping relies on must exist.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_named_constraints_exist(pool: PgPool) {
    let names: Vec<(String,)> = sqlx::query_as(
        "SELECT conname::text FROM pg_constraint
         WHERE conname IN ('uq_categories_name', 'fk_expenses_category', 'fk_expense_notes_expense')
         ORDER BY conname",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    let names: Vec<&str> = names.iter().map(|(n,)| n.as_str()).collect();
    assert_eq!(
        names,
        vec![
            spendlog_db::constraint::FK_EXPENSE_NOTES_EXPENSE,
            spendlog_db::constraint::FK_EXPENSES_CATEGORY,
            spendlog_db::constraint::UQ_CATEGORIES_NAME,
        ]
    );
}
