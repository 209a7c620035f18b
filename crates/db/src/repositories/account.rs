//! Account repository for chart of accounts database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use vestry_core::account::{AccountError, AccountType};
use vestry_shared::types::AccountId;

use crate::entities::{accounts, journal_lines, sea_orm_active_enums};

fn db_err(e: DbErr) -> AccountError {
    AccountError::Database(e.to_string())
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Unique account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Account type.
    pub account_type: AccountType,
    /// Optional parent account.
    pub parent_id: Option<AccountId>,
}

/// Input for updating an account.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    /// New name, if changing.
    pub name: Option<String>,
    /// New description, if changing.
    pub description: Option<Option<String>>,
    /// New active flag, if changing.
    pub is_active: Option<bool>,
}

/// Account repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account.
    ///
    /// The hierarchy level is derived from the parent: root accounts
    /// are level 1, children one deeper. Children must share the
    /// parent's account type.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCode`, `ParentNotFound`, or
    /// `ParentTypeMismatch` on rule violations.
    pub async fn create(&self, input: CreateAccountInput) -> Result<accounts::Model, AccountError> {
        let existing = accounts::Entity::find()
            .filter(accounts::Column::Code.eq(&input.code))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_some() {
            return Err(AccountError::DuplicateCode(input.code));
        }

        let level = match input.parent_id {
            None => 1,
            Some(parent_id) => {
                let parent = accounts::Entity::find_by_id(parent_id.into_inner())
                    .one(&self.db)
                    .await
                    .map_err(db_err)?
                    .ok_or(AccountError::ParentNotFound(parent_id))?;
                let parent_type: AccountType = parent.account_type.into();
                if parent_type != input.account_type {
                    return Err(AccountError::ParentTypeMismatch(parent_id));
                }
                parent.level + 1
            }
        };

        let now = Utc::now().into();
        let model = accounts::ActiveModel {
            id: Set(AccountId::new().into_inner()),
            code: Set(input.code),
            name: Set(input.name),
            description: Set(input.description),
            account_type: Set(input.account_type.into()),
            parent_id: Set(input.parent_id.map(AccountId::into_inner)),
            level: Set(level),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model.insert(&self.db).await.map_err(db_err)
    }

    /// Lists all accounts ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        account_type: Option<AccountType>,
        active_only: bool,
    ) -> Result<Vec<accounts::Model>, AccountError> {
        let mut query = accounts::Entity::find();
        if let Some(account_type) = account_type {
            let db_type: sea_orm_active_enums::AccountType = account_type.into();
            query = query.filter(accounts::Column::AccountType.eq(db_type));
        }
        if active_only {
            query = query.filter(accounts::Column::IsActive.eq(true));
        }
        query
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Gets an account by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no account has this ID.
    pub async fn get(&self, id: AccountId) -> Result<accounts::Model, AccountError> {
        accounts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(AccountError::NotFound(id))
    }

    /// Updates an account's name, description, or active flag.
    ///
    /// Code and type are immutable once created; postings reference
    /// them through reports.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no account has this ID.
    pub async fn update(
        &self,
        id: AccountId,
        input: UpdateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let account = self.get(id).await?;
        let mut active: accounts::ActiveModel = account.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().into());

        active.update(&self.db).await.map_err(db_err)
    }

    /// Deletes an account.
    ///
    /// Accounts referenced by journal lines cannot be deleted; they
    /// are deactivated via [`Self::update`] instead so history stays
    /// intact.
    ///
    /// # Errors
    ///
    /// Returns `HasPostings` if any journal line references the
    /// account, or `NotFound` if it does not exist.
    pub async fn delete(&self, id: AccountId) -> Result<(), AccountError> {
        let account = self.get(id).await?;

        let postings = journal_lines::Entity::find()
            .filter(journal_lines::Column::AccountId.eq(id.into_inner()))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        if postings > 0 {
            return Err(AccountError::HasPostings(id));
        }

        let children = accounts::Entity::find()
            .filter(accounts::Column::ParentId.eq(id.into_inner()))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        if children > 0 {
            return Err(AccountError::HasChildren(id));
        }

        accounts::Entity::delete_by_id(account.id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    /// Finds an account by its code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<accounts::Model>, AccountError> {
        accounts::Entity::find()
            .filter(accounts::Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(db_err)
    }

}
