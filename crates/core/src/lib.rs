//! Core accounting logic for Vestry.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations
//! live here; persistence injects the data these functions need.
//!
//! # Modules
//!
//! - `account` - Chart of accounts and normal balance rules
//! - `journal` - Double-entry journal validation and lifecycle
//! - `fiscal` - Fiscal period state machine and posting gate
//! - `budget` - Budget activation and variance analysis
//! - `asset` - Fixed assets and straight-line depreciation
//! - `closing` - Year-end closing computation

pub mod account;
pub mod asset;
pub mod budget;
pub mod closing;
pub mod fiscal;
pub mod journal;
