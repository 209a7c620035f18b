//! Fixed asset error types.

use rust_decimal::Decimal;
use thiserror::Error;
use vestry_shared::types::FixedAssetId;

/// Fixed-asset and depreciation errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Asset not found.
    #[error("Fixed asset not found: {0}")]
    NotFound(FixedAssetId),

    /// Asset code already in use.
    #[error("Asset code already exists: {0}")]
    DuplicateCode(String),

    /// Useful life must be at least one month.
    #[error("Useful life must be at least 1 month, got {0}")]
    InvalidUsefulLife(i32),

    /// Salvage value exceeds acquisition cost.
    #[error("Salvage value {salvage} exceeds acquisition cost {cost}")]
    SalvageExceedsCost {
        /// Salvage value.
        salvage: Decimal,
        /// Acquisition cost.
        cost: Decimal,
    },

    /// Cost or salvage value is negative.
    #[error("Asset amounts cannot be negative")]
    NegativeAmount,

    /// Depreciation already posted for this asset and month.
    #[error("Depreciation for asset {asset_id} already posted for {month}/{year}")]
    AlreadyPosted {
        /// Asset ID.
        asset_id: FixedAssetId,
        /// Month (1-12).
        month: u32,
        /// Year.
        year: i32,
    },

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),
}

impl AssetError {
    /// Returns the stable error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::DuplicateCode(_) => "DUPLICATE_ASSET_CODE",
            Self::AlreadyPosted { .. } => "CONFLICT",
            Self::InvalidUsefulLife(_) | Self::SalvageExceedsCost { .. } | Self::NegativeAmount => {
                "VALIDATION_ERROR"
            }
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::DuplicateCode(_) | Self::AlreadyPosted { .. } => 409,
            Self::InvalidUsefulLife(_) | Self::SalvageExceedsCost { .. } | Self::NegativeAmount => {
                422
            }
            Self::Database(_) => 500,
        }
    }
}
