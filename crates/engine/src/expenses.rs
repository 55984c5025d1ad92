//! Expense records.
//!
//! An `Expense` is a single shared payment made by one of the two
//! participants. Records are created one at a time or replaced wholesale by a
//! reset; they are never edited in place.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{
    EngineError, ResultEngine,
    util::{model_payer, normalize_description, parse_date, validate_amount},
};

/// The closed set of participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Payer {
    Alice,
    Bob,
}

impl Payer {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alice => "Alice",
            Self::Bob => "Bob",
        }
    }
}

impl TryFrom<&str> for Payer {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Alice" => Ok(Self::Alice),
            "Bob" => Ok(Self::Bob),
            other => Err(EngineError::Validation(format!(
                "payer must be either \"Alice\" or \"Bob\", got \"{other}\""
            ))),
        }
    }
}

/// A persisted expense.
#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub description: String,
    pub payer: Payer,
    pub amount: f64,
}

/// Unvalidated input for [`Engine::create`](crate::Engine::create).
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseInput {
    pub payer: String,
    pub date: String,
    pub description: String,
    pub amount: f64,
}

impl ExpenseInput {
    /// Check every record invariant and return the typed record to insert.
    pub fn validate(&self) -> ResultEngine<NewExpense> {
        Ok(NewExpense {
            amount: validate_amount(self.amount)?,
            payer: Payer::try_from(self.payer.as_str())?,
            date: parse_date(&self.date)?,
            description: normalize_description(&self.description)?,
        })
    }
}

/// A validated expense that has not been assigned an id yet.
#[derive(Clone, Debug, PartialEq)]
pub struct NewExpense {
    pub date: DateTime<Utc>,
    pub description: String,
    pub payer: Payer,
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub date: DateTimeUtc,
    pub description: String,
    pub payer: String,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&NewExpense> for ActiveModel {
    fn from(expense: &NewExpense) -> Self {
        Self {
            id: ActiveValue::NotSet,
            date: ActiveValue::Set(expense.date),
            description: ActiveValue::Set(expense.description.clone()),
            payer: ActiveValue::Set(expense.payer.as_str().to_string()),
            amount: ActiveValue::Set(expense.amount),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            date: model.date,
            description: model.description,
            payer: model_payer(&model.payer)?,
            amount: model.amount,
        })
    }
}
