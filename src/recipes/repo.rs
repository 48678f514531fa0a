use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Recipe row joined with its owner's public columns.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeWithOwner {
    pub id: Uuid,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: Option<i32>,
    pub user_id: Uuid,
    pub username: String,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

pub async fn list_all(db: &PgPool) -> sqlx::Result<Vec<RecipeWithOwner>> {
    sqlx::query_as::<_, RecipeWithOwner>(
        r#"
        SELECT r.id, r.title, r.instructions, r.minutes_to_complete,
               u.id AS user_id, u.username, u.image_url, u.bio
        FROM recipes r
        JOIN users u ON u.id = r.user_id
        ORDER BY r.created_at DESC
        "#,
    )
    .fetch_all(db)
    .await
}

/// Insert a recipe owned by `user_id` and read it back with its owner.
/// Both statements run in one transaction; a constraint violation rolls
/// back before the error is surfaced.
pub async fn create(
    db: &PgPool,
    user_id: Uuid,
    title: &str,
    instructions: &str,
    minutes_to_complete: Option<i32>,
) -> sqlx::Result<RecipeWithOwner> {
    let mut tx = db.begin().await?;

    let recipe_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO recipes (user_id, title, instructions, minutes_to_complete)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(title)
    .bind(instructions)
    .bind(minutes_to_complete)
    .fetch_one(&mut *tx)
    .await?;

    let row = sqlx::query_as::<_, RecipeWithOwner>(
        r#"
        SELECT r.id, r.title, r.instructions, r.minutes_to_complete,
               u.id AS user_id, u.username, u.image_url, u.bio
        FROM recipes r
        JOIN users u ON u.id = r.user_id
        WHERE r.id = $1
        "#,
    )
    .bind(recipe_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(row)
}
