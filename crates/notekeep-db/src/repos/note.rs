use crate::errors::{StoreError, StoreResult};
use anyhow::Context;
use chrono::{DateTime, Utc};
use notekeep_common::models::{Note, NoteSummary, NoteUpdate, Page, SortOrder, UserId};
use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NoteRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Note {
            id: row.id,
            user_id: UserId(row.user_id),
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// The id tiebreak keeps pages stable when two notes share a timestamp.
const LIST_ASC: &str = "SELECT id, title, content, created_at, updated_at FROM notes WHERE user_id = $1 ORDER BY created_at ASC, id ASC LIMIT $2 OFFSET $3";
const LIST_DESC: &str = "SELECT id, title, content, created_at, updated_at FROM notes WHERE user_id = $1 ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3";

/// Note persistence with per-owner access control.
///
/// Every operation on an existing note first resolves the owner by id alone,
/// so a missing note (`NotFound`) and a foreign note (`AccessDenied`) are
/// reported differently. The statement that follows still filters on the
/// owner; if the row vanished in between, the result is `NotFound`.
pub struct NoteRepo;

impl NoteRepo {
    pub async fn create(
        pool: &PgPool,
        owner: UserId,
        title: &str,
        content: &str,
    ) -> StoreResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO notes (user_id, title, content) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(owner.get())
        .bind(title)
        .bind(content)
        .fetch_one(pool)
        .await
        .context("Failed to create note")?;
        Ok(id)
    }

    pub async fn list(
        pool: &PgPool,
        owner: UserId,
        page: Page,
    ) -> StoreResult<Vec<NoteSummary>> {
        let sql = match page.sort {
            SortOrder::Asc => LIST_ASC,
            SortOrder::Desc => LIST_DESC,
        };
        let rows = sqlx::query_as::<_, NoteSummary>(sql)
            .bind(owner.get())
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
            .context("Failed to list notes")?;
        Ok(rows)
    }

    pub async fn get(pool: &PgPool, owner: UserId, note_id: i64) -> StoreResult<NoteRow> {
        Self::check_owner(pool, owner, note_id).await?;

        let row = sqlx::query_as::<_, NoteRow>(
            "SELECT id, user_id, title, content, created_at, updated_at FROM notes WHERE id = $1 AND user_id = $2",
        )
        .bind(note_id)
        .bind(owner.get())
        .fetch_optional(pool)
        .await
        .context("Failed to get note")?;
        row.ok_or(StoreError::NotFound)
    }

    /// Apply a partial update. `updated_at` is refreshed even when the
    /// update carries no fields.
    pub async fn update(
        pool: &PgPool,
        owner: UserId,
        note_id: i64,
        update: &NoteUpdate,
    ) -> StoreResult<()> {
        Self::check_owner(pool, owner, note_id).await?;

        let result = sqlx::query(
            r#"UPDATE notes
               SET title = COALESCE($1, title),
                   content = COALESCE($2, content),
                   updated_at = NOW()
               WHERE id = $3 AND user_id = $4"#,
        )
        .bind(update.title.as_deref())
        .bind(update.content.as_deref())
        .bind(note_id)
        .bind(owner.get())
        .execute(pool)
        .await
        .context("Failed to update note")?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    pub async fn delete(pool: &PgPool, owner: UserId, note_id: i64) -> StoreResult<()> {
        Self::check_owner(pool, owner, note_id).await?;

        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(note_id)
            .bind(owner.get())
            .execute(pool)
            .await
            .context("Failed to delete note")?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn check_owner(pool: &PgPool, owner: UserId, note_id: i64) -> StoreResult<()> {
        let stored_owner = sqlx::query_scalar::<_, i64>("SELECT user_id FROM notes WHERE id = $1")
            .bind(note_id)
            .fetch_optional(pool)
            .await
            .context("Failed to look up note owner")?;

        match stored_owner {
            None => Err(StoreError::NotFound),
            Some(stored) if stored != owner.get() => {
                tracing::warn!(note_id, requester = %owner, "Note belongs to another user");
                Err(StoreError::AccessDenied)
            }
            Some(_) => Ok(()),
        }
    }
}
