//! Repository for the `people` table.

use reelflow_core::roles::Role;
use reelflow_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::person::{CreatePerson, PersonRow, PersonWorkload};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, email, full_name, role, is_trusted_writer, is_active, created_at, updated_at";

/// Provides CRUD operations for people.
pub struct PersonRepo;

impl PersonRepo {
    /// Insert a new person, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePerson) -> Result<PersonRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO people (email, full_name, role, is_trusted_writer)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PersonRow>(&query)
            .bind(&input.email)
            .bind(&input.full_name)
            .bind(input.role.as_str())
            .bind(input.is_trusted_writer)
            .fetch_one(pool)
            .await
    }

    /// Find a person by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PersonRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM people WHERE id = $1");
        sqlx::query_as::<_, PersonRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List everyone holding `role`, oldest first. Includes inactive people.
    pub async fn list_by_role(pool: &PgPool, role: Role) -> Result<Vec<PersonRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM people WHERE role = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, PersonRow>(&query)
            .bind(role.as_str())
            .fetch_all(pool)
            .await
    }

    /// List people with their active assignment counts, optionally limited
    /// to one role. Least loaded first.
    pub async fn list_with_workload<'e>(
        executor: impl PgExecutor<'e>,
        role: Option<Role>,
    ) -> Result<Vec<PersonWorkload>, sqlx::Error> {
        sqlx::query_as::<_, PersonWorkload>(
            "SELECT p.id, p.email, p.full_name, p.role, p.is_trusted_writer, p.is_active,
                    p.created_at, COUNT(c.id) AS active_assignments
             FROM people p
             LEFT JOIN content_items c
               ON (c.videographer_id = p.id OR c.editor_id = p.id OR c.posting_manager_id = p.id)
              AND NOT c.is_dissolved
              AND c.production_stage IS DISTINCT FROM 'POSTED'
             WHERE ($1::text IS NULL OR p.role = $1)
             GROUP BY p.id
             ORDER BY active_assignments ASC, p.created_at ASC, p.id ASC",
        )
        .bind(role.map(Role::as_str))
        .fetch_all(executor)
        .await
    }

    /// Set the active flag. Returns `true` if a row was updated.
    pub async fn set_active(pool: &PgPool, id: DbId, is_active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE people SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(is_active)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
