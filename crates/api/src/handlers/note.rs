//! Handlers for notes nested under `/expenses/{id}/notes`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use spendlog_core::error::CoreError;
use spendlog_core::types::{parse_id, DbId};
use spendlog_db::constraint::{is_foreign_key_violation, FK_EXPENSE_NOTES_EXPENSE};
use spendlog_db::models::note::{CreateNote, Note};
use spendlog_db::repositories::{ExpenseRepo, NoteRepo};
use spendlog_db::DbPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::presenter::NoteListView;
use crate::state::AppState;

fn expense_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Expense",
        id,
    })
}

async fn ensure_expense_exists(pool: &DbPool, id: DbId) -> AppResult<()> {
    match ExpenseRepo::find_by_id(pool, id).await? {
        Some(_) => Ok(()),
        None => Err(expense_not_found(id)),
    }
}

/// GET /api/v1/expenses/{id}/notes
pub async fn list(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<NoteListView>> {
    let expense_id = parse_id(&raw_id, "Expense")?;
    ensure_expense_exists(&state.pool, expense_id).await?;

    let notes = NoteRepo::list_for_expense(&state.pool, expense_id).await?;
    Ok(Json(NoteListView { notes }))
}

/// POST /api/v1/expenses/{id}/notes
pub async fn create(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    AppJson(input): AppJson<CreateNote>,
) -> AppResult<(StatusCode, Json<Note>)> {
    let expense_id = parse_id(&raw_id, "Expense")?;
    input.validate().map_err(CoreError::from)?;
    ensure_expense_exists(&state.pool, expense_id).await?;

    // The expense can still vanish between the check and the insert.
    let note = NoteRepo::create(&state.pool, expense_id, &input)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e, FK_EXPENSE_NOTES_EXPENSE) {
                expense_not_found(expense_id)
            } else {
                AppError::Database(e)
            }
        })?;

    tracing::info!(expense_id = %expense_id, note_id = note.id, "Expense note added");

    Ok((StatusCode::CREATED, Json(note)))
}
