//! The fixed list of expenses a reset repopulates the store with.
//!
//! The default list is embedded from `seed/expenses.init.json`. Entries may
//! carry an `id`; it is ignored, every reseeded record gets a fresh one.

use serde::{Deserialize, Deserializer};

use crate::{EngineError, ExpenseInput, ResultEngine};

const DEFAULT_SEED: &str = include_str!("../seed/expenses.init.json");

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SeedExpense {
    pub payer: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "number_or_string")]
    pub amount: f64,
}

impl From<&SeedExpense> for ExpenseInput {
    fn from(seed: &SeedExpense) -> Self {
        Self {
            payer: seed.payer.clone(),
            date: seed.date.clone(),
            description: seed.description.clone(),
            amount: seed.amount,
        }
    }
}

/// Parse a seed list from its JSON representation.
pub fn parse_seed(json: &str) -> ResultEngine<Vec<SeedExpense>> {
    serde_json::from_str(json).map_err(|err| EngineError::Seed(err.to_string()))
}

/// The seed list shipped with the engine.
pub fn default_seed() -> ResultEngine<Vec<SeedExpense>> {
    parse_seed(DEFAULT_SEED)
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(value) => Ok(value),
        Amount::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
