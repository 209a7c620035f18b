//! Responsibility center repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use vestry_shared::{AppError, AppResult};
use vestry_shared::types::ResponsibilityCenterId;

use crate::entities::responsibility_centers;

fn db_err(e: DbErr) -> AppError {
    AppError::Database(e.to_string())
}

/// Input for creating a responsibility center.
#[derive(Debug, Clone)]
pub struct CreateCenterInput {
    /// Unique center code.
    pub code: String,
    /// Center name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Responsibility center repository.
#[derive(Debug, Clone)]
pub struct CenterRepository {
    db: DatabaseConnection,
}

impl CenterRepository {
    /// Creates a new center repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a responsibility center.
    ///
    /// # Errors
    ///
    /// Returns a conflict error when the code is taken.
    pub async fn create(
        &self,
        input: CreateCenterInput,
    ) -> AppResult<responsibility_centers::Model> {
        let existing = responsibility_centers::Entity::find()
            .filter(responsibility_centers::Column::Code.eq(&input.code))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_some() {
            return Err(AppError::Conflict(format!(
                "Responsibility center code already exists: {}",
                input.code
            )));
        }

        let now = Utc::now().into();
        let model = responsibility_centers::ActiveModel {
            id: Set(ResponsibilityCenterId::new().into_inner()),
            code: Set(input.code),
            name: Set(input.name),
            description: Set(input.description),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model.insert(&self.db).await.map_err(db_err)
    }

    /// Lists centers ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, active_only: bool) -> AppResult<Vec<responsibility_centers::Model>> {
        let mut query = responsibility_centers::Entity::find();
        if active_only {
            query = query.filter(responsibility_centers::Column::IsActive.eq(true));
        }
        query
            .order_by_asc(responsibility_centers::Column::Code)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Gets a center by ID.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no center has this ID.
    pub async fn get(
        &self,
        id: ResponsibilityCenterId,
    ) -> AppResult<responsibility_centers::Model> {
        responsibility_centers::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| AppError::NotFound(format!("Responsibility center not found: {id}")))
    }
}
