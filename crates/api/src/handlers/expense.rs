//! Handlers for the `/expenses` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use spendlog_core::error::CoreError;
use spendlog_core::types::{parse_id, DbId};
use spendlog_db::constraint::{is_foreign_key_violation, FK_EXPENSES_CATEGORY};
use spendlog_db::models::expense::{
    CreateExpense, Expense, ExpenseDetail, PatchExpense, UpdateExpense,
};
use spendlog_db::repositories::ExpenseRepo;
use spendlog_db::DbPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::presenter::{
    present_expense, present_expense_deleted, present_expenses, ExpenseDeletedView,
    ExpenseListView, ExpenseView,
};
use crate::state::AppState;

const ENTITY: &str = "Expense";

/// Turn a broken category reference into a validation failure.
fn unknown_category(err: sqlx::Error, category_id: Option<DbId>) -> AppError {
    if !is_foreign_key_violation(&err, FK_EXPENSES_CATEGORY) {
        return AppError::Database(err);
    }
    let msg = match category_id {
        Some(id) => format!("Category {id} does not exist"),
        None => "Referenced category does not exist".to_string(),
    };
    tracing::warn!(error = %msg, "Expense references unknown category");
    AppError::Core(CoreError::Validation(msg))
}

fn not_found(id: DbId) -> AppError {
    tracing::warn!(expense_id = %id, "Expense not found");
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// Resolve category and notes for a freshly written row.
async fn load_detail(pool: &DbPool, expense: Expense) -> AppResult<ExpenseDetail> {
    let id = expense.id;
    ExpenseRepo::with_details(pool, vec![expense])
        .await?
        .pop()
        .ok_or_else(|| AppError::InternalError(format!("detail lookup lost expense {id}")))
}

/// POST /api/v1/expenses
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateExpense>,
) -> AppResult<(StatusCode, Json<ExpenseView>)> {
    input.validate().map_err(CoreError::from)?;

    let expense = ExpenseRepo::create(&state.pool, &input)
        .await
        .map_err(|e| unknown_category(e, Some(input.category_id)))?;

    tracing::info!(
        expense_id = %expense.id,
        category_id = %expense.category_id,
        amount = expense.amount,
        "Expense created",
    );

    let detail = load_detail(&state.pool, expense).await?;
    Ok((
        StatusCode::CREATED,
        Json(present_expense(&detail, &state.config.display_offset)),
    ))
}

/// GET /api/v1/expenses
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ExpenseListView>> {
    let details = ExpenseRepo::list_details(&state.pool).await?;
    tracing::debug!(count = details.len(), "Listed expenses");
    Ok(Json(present_expenses(&details, &state.config.display_offset)))
}

/// GET /api/v1/expenses/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ExpenseView>> {
    let id = parse_id(&raw_id, ENTITY)?;
    let detail = ExpenseRepo::find_detail_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(present_expense(&detail, &state.config.display_offset)))
}

/// PUT /api/v1/expenses/{id}
///
/// Overwrites description, amount, category and spent-at.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    AppJson(input): AppJson<UpdateExpense>,
) -> AppResult<Json<ExpenseView>> {
    let id = parse_id(&raw_id, ENTITY)?;
    input.validate().map_err(CoreError::from)?;

    let expense = ExpenseRepo::update(&state.pool, id, &input)
        .await
        .map_err(|e| unknown_category(e, Some(input.category_id)))?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(expense_id = %id, "Expense updated");

    let detail = load_detail(&state.pool, expense).await?;
    Ok(Json(present_expense(&detail, &state.config.display_offset)))
}

/// PATCH /api/v1/expenses/{id}
///
/// Applies only the fields that are present and non-empty.
pub async fn patch(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    AppJson(input): AppJson<PatchExpense>,
) -> AppResult<Json<ExpenseView>> {
    let id = parse_id(&raw_id, ENTITY)?;
    input.validate().map_err(CoreError::from)?;

    let new_category = input.category_id;
    let expense = ExpenseRepo::patch(&state.pool, id, input)
        .await
        .map_err(|e| unknown_category(e, new_category))?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(expense_id = %id, "Expense patched");

    let detail = load_detail(&state.pool, expense).await?;
    Ok(Json(present_expense(&detail, &state.config.display_offset)))
}

/// DELETE /api/v1/expenses/{id}
///
/// Attached notes are removed with the expense.
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ExpenseDeletedView>> {
    let id = parse_id(&raw_id, ENTITY)?;

    let expense = ExpenseRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(expense_id = %id, description = %expense.description, "Expense deleted");

    Ok(Json(present_expense_deleted(expense.id, &expense.description)))
}
