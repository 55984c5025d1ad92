//! The record store behind the expense service.
//!
//! [`Engine`] owns every persisted [`Expense`]: it validates and inserts new
//! records, lists them in storage order and atomically replaces the whole set
//! with the seed list on [`Engine::reset`].

use sea_orm::{ConnectionTrait, DatabaseConnection, QueryOrder, TransactionTrait, prelude::*};

pub use error::EngineError;
pub use expenses::{Expense, ExpenseInput, NewExpense, Payer};
pub use seed::{SeedExpense, default_seed, parse_seed};

mod error;
mod expenses;
mod seed;
mod util;

type ResultEngine<T> = Result<T, EngineError>;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    seed: Vec<SeedExpense>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Every stored expense, in storage (id) order.
    pub async fn list_all(&self) -> ResultEngine<Vec<Expense>> {
        list_in(&self.database).await
    }

    /// Validate `input`, assign it a fresh id and persist it.
    ///
    /// Nothing is written when validation fails. The insert and the read-back
    /// of the stored row share one transaction.
    pub async fn create(&self, input: ExpenseInput) -> ResultEngine<Expense> {
        let expense = input.validate()?;

        with_tx!(self, |db_tx| {
            let model = expenses::ActiveModel::from(&expense)
                .insert(&db_tx)
                .await?;
            Expense::try_from(model)
        })
    }

    /// Delete every expense and insert the seed list, as one transaction.
    ///
    /// Seed entries are validated before the store is touched; a failure at
    /// any point leaves the previous records in place.
    pub async fn reset(&self) -> ResultEngine<Vec<Expense>> {
        let seed = self
            .seed
            .iter()
            .map(|entry| ExpenseInput::from(entry).validate())
            .collect::<ResultEngine<Vec<_>>>()?;

        with_tx!(self, |db_tx| {
            expenses::Entity::delete_many().exec(&db_tx).await?;
            for expense in &seed {
                expenses::ActiveModel::from(expense).insert(&db_tx).await?;
            }
            list_in(&db_tx).await
        })
    }

    /// Number of entries a reset inserts.
    pub fn seed_len(&self) -> usize {
        self.seed.len()
    }
}

async fn list_in<C: ConnectionTrait>(db: &C) -> ResultEngine<Vec<Expense>> {
    expenses::Entity::find()
        .order_by_asc(expenses::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Expense::try_from)
        .collect()
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    seed: Option<Vec<SeedExpense>>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Replace the embedded seed list.
    pub fn seed(mut self, seed: Vec<SeedExpense>) -> EngineBuilder {
        self.seed = Some(seed);
        self
    }

    /// Construct `Engine`
    ///
    /// Fails when any seed entry would be rejected by `create`.
    pub async fn build(self) -> ResultEngine<Engine> {
        let seed = match self.seed {
            Some(seed) => seed,
            None => default_seed()?,
        };
        for (index, entry) in seed.iter().enumerate() {
            ExpenseInput::from(entry)
                .validate()
                .map_err(|err| EngineError::Seed(format!("entry {index}: {err}")))?;
        }

        Ok(Engine {
            database: self.database,
            seed,
        })
    }
}
