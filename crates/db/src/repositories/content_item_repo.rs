//! Repository for the `content_items` table.

use reelflow_core::queue::QueueFilter;
use reelflow_core::stage::ProductionStage;
use reelflow_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::content_item::{ContentItemRow, ContentItemWrite};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, reference_url, author_id, status, \
    production_stage, rejection_count, is_dissolved, videographer_id, editor_id, \
    posting_manager_id, admin_remarks, hook_strength, content_quality, viral_potential, \
    replication_clarity, version, created_at, updated_at";

/// Predicate for items that still count as work in progress.
const ACTIVE_PREDICATE: &str =
    "NOT is_dissolved AND production_stage IS DISTINCT FROM 'POSTED'";

/// Provides CRUD operations for content items.
pub struct ContentItemRepo;

impl ContentItemRepo {
    /// Insert a new content item at version 1, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &ContentItemWrite,
    ) -> Result<ContentItemRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_items
                (title, description, reference_url, author_id, status, production_stage,
                 rejection_count, is_dissolved, videographer_id, editor_id, posting_manager_id,
                 admin_remarks, hook_strength, content_quality, viral_potential,
                 replication_clarity)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentItemRow>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.reference_url)
            .bind(input.author_id)
            .bind(input.status)
            .bind(input.production_stage)
            .bind(input.rejection_count)
            .bind(input.is_dissolved)
            .bind(input.videographer_id)
            .bind(input.editor_id)
            .bind(input.posting_manager_id)
            .bind(&input.admin_remarks)
            .bind(input.hook_strength)
            .bind(input.content_quality)
            .bind(input.viral_potential)
            .bind(input.replication_clarity)
            .fetch_one(pool)
            .await
    }

    /// Find a content item by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContentItemRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_items WHERE id = $1");
        sqlx::query_as::<_, ContentItemRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a content item by ID and lock its row until the surrounding
    /// transaction ends.
    pub async fn find_for_update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<ContentItemRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_items WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, ContentItemRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Check whether a content item exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM content_items WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Overwrite every mutable column if the stored version still equals
    /// `expected_version`, bumping the version by one.
    ///
    /// Returns `None` when no row matched: either the item does not exist or
    /// another writer saved it first. Use [`exists`](Self::exists) to tell
    /// the two apart.
    pub async fn update_versioned<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        expected_version: i64,
        input: &ContentItemWrite,
    ) -> Result<Option<ContentItemRow>, sqlx::Error> {
        let query = format!(
            "UPDATE content_items SET
                title = $3,
                description = $4,
                reference_url = $5,
                status = $6,
                production_stage = $7,
                rejection_count = $8,
                is_dissolved = $9,
                videographer_id = $10,
                editor_id = $11,
                posting_manager_id = $12,
                admin_remarks = $13,
                hook_strength = $14,
                content_quality = $15,
                viral_potential = $16,
                replication_clarity = $17,
                version = version + 1
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentItemRow>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.reference_url)
            .bind(input.status)
            .bind(input.production_stage)
            .bind(input.rejection_count)
            .bind(input.is_dissolved)
            .bind(input.videographer_id)
            .bind(input.editor_id)
            .bind(input.posting_manager_id)
            .bind(&input.admin_remarks)
            .bind(input.hook_strength)
            .bind(input.content_quality)
            .bind(input.viral_potential)
            .bind(input.replication_clarity)
            .fetch_optional(executor)
            .await
    }

    /// List items matching `filter`, oldest first.
    pub async fn list(
        pool: &PgPool,
        filter: &QueueFilter,
    ) -> Result<Vec<ContentItemRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_items
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::text IS NULL OR production_stage = $2)
               AND ($3::bigint IS NULL
                    OR videographer_id = $3 OR editor_id = $3 OR posting_manager_id = $3)
               AND ($4 OR ({ACTIVE_PREDICATE}))
             ORDER BY created_at ASC, id ASC
             LIMIT $5"
        );
        sqlx::query_as::<_, ContentItemRow>(&query)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.stage.map(ProductionStage::as_str))
            .bind(filter.assignee_id)
            .bind(filter.include_inactive)
            .bind(filter.effective_limit())
            .fetch_all(pool)
            .await
    }

    /// Count active items where the person holds any assignment slot.
    pub async fn count_active_for_person(
        pool: &PgPool,
        person_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM content_items
             WHERE (videographer_id = $1 OR editor_id = $1 OR posting_manager_id = $1)
               AND {ACTIVE_PREDICATE}"
        );
        sqlx::query_scalar(&query).bind(person_id).fetch_one(pool).await
    }
}
