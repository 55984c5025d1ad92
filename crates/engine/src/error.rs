//! The module contains the errors the engine can throw.
//!
//! - [`Validation`] thrown when an expense (or a seed entry) breaks a record
//!   invariant: non-positive amount, unknown payer, unparsable date, overlong
//!   description.
//! - [`Seed`] thrown when the seed list itself cannot be read.
//! - [`Database`] wraps every storage failure.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`Seed`]: EngineError::Seed
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid expense: {0}")]
    Validation(String),
    #[error("Invalid seed data: {0}")]
    Seed(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::Seed(a), Self::Seed(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
