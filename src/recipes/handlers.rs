use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{info, instrument};

use crate::{
    auth::session::AuthUser,
    db::AppState,
    error::ApiError,
    recipes::{
        dto::{CreateRecipeRequest, RecipeResponse},
        repo,
    },
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/recipes", get(list_recipes).post(create_recipe))
}

/// Lists every user's recipes; visible to any signed-in user.
#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let recipes = repo::list_all(&state.db).await?;
    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    payload.validate()?;

    // Owner comes from the session, never from the body.
    let recipe = repo::create(
        &state.db,
        user_id,
        &payload.title,
        &payload.instructions,
        payload.minutes_to_complete,
    )
    .await?;

    info!(recipe_id = %recipe.id, %user_id, "recipe created");
    Ok((StatusCode::CREATED, Json(recipe.into())))
}
