//! Handlers for the `/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use spendlog_core::error::CoreError;
use spendlog_core::patch::provided;
use spendlog_core::types::{parse_id, DbId};
use spendlog_db::constraint::{
    is_foreign_key_violation, is_unique_violation, FK_EXPENSES_CATEGORY, UQ_CATEGORIES_NAME,
};
use spendlog_db::models::category::{CreateCategory, PatchCategory, UpdateCategory};
use spendlog_db::repositories::CategoryRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::presenter::{
    present_categories, present_category, present_category_deleted, CategoryDeletedView,
    CategoryListView, CategoryView,
};
use crate::state::AppState;

const ENTITY: &str = "Category";

/// Turn a unique violation on the category name into a conflict.
///
/// Create, full update and partial update all report duplicates this way.
fn duplicate_name(err: sqlx::Error, name: Option<&str>) -> AppError {
    if !is_unique_violation(&err, UQ_CATEGORIES_NAME) {
        return AppError::Database(err);
    }
    let msg = match name {
        Some(name) => format!("A category named '{name}' already exists"),
        None => "A category with this name already exists".to_string(),
    };
    tracing::warn!(error = %msg, "Duplicate category name");
    AppError::Core(CoreError::Conflict(msg))
}

fn not_found(id: DbId) -> AppError {
    tracing::warn!(category_id = %id, "Category not found");
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// POST /api/v1/categories
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCategory>,
) -> AppResult<(StatusCode, Json<CategoryView>)> {
    input.validate().map_err(CoreError::from)?;

    let category = CategoryRepo::create(&state.pool, &input)
        .await
        .map_err(|e| duplicate_name(e, Some(&input.name)))?;

    tracing::info!(category_id = %category.id, name = %category.name, "Category created");

    Ok((StatusCode::CREATED, Json(present_category(&category))))
}

/// GET /api/v1/categories
pub async fn list(State(state): State<AppState>) -> AppResult<Json<CategoryListView>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    tracing::debug!(count = categories.len(), "Listed categories");
    Ok(Json(present_categories(&categories)))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<CategoryView>> {
    let id = parse_id(&raw_id, ENTITY)?;
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(present_category(&category)))
}

/// PUT /api/v1/categories/{id}
///
/// Replaces `name` and `order`; an omitted `order` is cleared.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    AppJson(input): AppJson<UpdateCategory>,
) -> AppResult<Json<CategoryView>> {
    let id = parse_id(&raw_id, ENTITY)?;
    input.validate().map_err(CoreError::from)?;

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await
        .map_err(|e| duplicate_name(e, Some(&input.name)))?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(category_id = %id, name = %category.name, "Category updated");

    Ok(Json(present_category(&category)))
}

/// PATCH /api/v1/categories/{id}
///
/// Applies only the fields that are present and non-empty.
pub async fn patch(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    AppJson(input): AppJson<PatchCategory>,
) -> AppResult<Json<CategoryView>> {
    let id = parse_id(&raw_id, ENTITY)?;
    input.validate().map_err(CoreError::from)?;

    let new_name = provided(input.name.clone());
    let category = CategoryRepo::patch(&state.pool, id, input)
        .await
        .map_err(|e| duplicate_name(e, new_name.as_deref()))?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(category_id = %id, name = %category.name, "Category patched");

    Ok(Json(present_category(&category)))
}

/// DELETE /api/v1/categories/{id}
///
/// Refused with 409 while expenses still reference the category.
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<CategoryDeletedView>> {
    let id = parse_id(&raw_id, ENTITY)?;

    let category = CategoryRepo::delete(&state.pool, id)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e, FK_EXPENSES_CATEGORY) {
                tracing::warn!(category_id = %id, "Category still referenced by expenses");
                AppError::Core(CoreError::Conflict(format!(
                    "Category {id} is still referenced by expenses"
                )))
            } else {
                AppError::Database(e)
            }
        })?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(category_id = %id, name = %category.name, "Category deleted");

    Ok(Json(present_category_deleted(&category)))
}
