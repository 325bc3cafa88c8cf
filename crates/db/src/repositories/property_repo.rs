//! Repository for the `properties` table.

use rentdesk_core::pagination::escape_like;
use rentdesk_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::property::{
    CreateProperty, Property, PropertyFilter, PropertyStatus, UpdateProperty, UpdatePropertyOutcome,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, property_type, location, rent_per_month, \
                        security_deposit, area, amenities, images, features, status, \
                        created_by, created_at, updated_at";

/// Filter clause for listings. `$1`..`$3` are status, type and city pattern;
/// a `NULL` parameter disables its condition.
const FILTER: &str = "($1::property_status IS NULL OR status = $1)
                  AND ($2::property_type IS NULL OR property_type = $2)
                  AND ($3::text IS NULL OR location->>'city' ILIKE $3)";

/// Provides CRUD operations for properties.
pub struct PropertyRepo;

impl PropertyRepo {
    /// Insert a new `available` property, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProperty) -> Result<Property, sqlx::Error> {
        let query = format!(
            "INSERT INTO properties
                (title, description, property_type, location, rent_per_month,
                 security_deposit, area, amenities, images, features, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.property_type)
            .bind(Json(&input.location))
            .bind(input.rent_per_month)
            .bind(input.security_deposit)
            .bind(input.area)
            .bind(&input.amenities)
            .bind(&input.images)
            .bind(Json(&input.features))
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a property by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Property>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM properties WHERE id = $1");
        sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of properties matching `filter`, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &PropertyFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Property>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM properties
             WHERE {FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(filter.status)
            .bind(filter.property_type)
            .bind(city_pattern(filter))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count all properties matching `filter`.
    pub async fn count(pool: &PgPool, filter: &PropertyFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM properties WHERE {FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.status)
            .bind(filter.property_type)
            .bind(city_pattern(filter))
            .fetch_one(pool)
            .await
    }

    /// Update a property. Only non-`None` fields in `input` are applied.
    ///
    /// The row is locked while the status change is checked, so an edit
    /// cannot interleave with a rental being created or ended on the same
    /// property. A status change the ledger owns writes nothing and returns
    /// [`UpdatePropertyOutcome::StatusLocked`].
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProperty,
    ) -> Result<UpdatePropertyOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current: Option<PropertyStatus> =
            sqlx::query_scalar("SELECT status FROM properties WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(current) = current else {
            return Ok(UpdatePropertyOutcome::NotFound);
        };
        if let Some(requested) = input.status {
            if !current.allows_manual_change_to(requested) {
                return Ok(UpdatePropertyOutcome::StatusLocked { current, requested });
            }
        }

        let query = format!(
            "UPDATE properties SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                property_type = COALESCE($4, property_type),
                location = COALESCE($5, location),
                rent_per_month = COALESCE($6, rent_per_month),
                security_deposit = COALESCE($7, security_deposit),
                area = COALESCE($8, area),
                amenities = COALESCE($9, amenities),
                images = COALESCE($10, images),
                features = COALESCE($11, features),
                status = COALESCE($12, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let property = sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.property_type)
            .bind(input.location.as_ref().map(Json))
            .bind(input.rent_per_month)
            .bind(input.security_deposit)
            .bind(input.area)
            .bind(&input.amenities)
            .bind(&input.images)
            .bind(input.features.as_ref().map(Json))
            .bind(input.status)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(UpdatePropertyOutcome::Updated(property))
    }

    /// Delete a property by ID. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation while rentals still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn city_pattern(filter: &PropertyFilter) -> Option<String> {
    filter
        .city
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| format!("%{}%", escape_like(c)))
}
