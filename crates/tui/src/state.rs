//! Client-side mirror of the expense list.
//!
//! The server owns the records; [`ExpenseState`] keeps the last list it was
//! given plus optimistic entries for creates that have not been confirmed
//! yet. Each optimistic entry carries a random correlation token and is
//! replaced by token once the server answers, so reordering the view or a
//! second create in flight cannot mix entries up.

use std::future::Future;

use api_types::{
    Payer,
    expense::{Expense, ExpenseNew},
};
use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::{
    client::ClientError,
    sort::{SortKey, SortMode},
};

/// The calls the client state needs from the expense service.
pub trait ExpenseApi {
    fn list(&self) -> impl Future<Output = Result<Vec<Expense>, ClientError>>;
    fn create(&self, payload: &ExpenseNew) -> impl Future<Output = Result<Expense, ClientError>>;
    fn reset(&self) -> impl Future<Output = Result<Vec<Expense>, ClientError>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryId {
    /// Optimistic entry waiting for the server; holds its correlation token.
    Pending(Uuid),
    Confirmed(i64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub id: EntryId,
    pub date: DateTime<Utc>,
    pub description: String,
    pub payer: Payer,
    pub amount: f64,
}

impl Entry {
    pub fn is_pending(&self) -> bool {
        matches!(self.id, EntryId::Pending(_))
    }
}

impl From<Expense> for Entry {
    fn from(expense: Expense) -> Self {
        Self {
            id: EntryId::Confirmed(expense.id),
            date: expense.date,
            description: expense.description,
            payer: expense.payer,
            amount: expense.amount,
        }
    }
}

impl SortKey for Entry {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }

    fn amount(&self) -> f64 {
        self.amount
    }
}

/// A new expense as entered by the user.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseDraft {
    pub payer: Payer,
    pub date: DateTime<Utc>,
    pub description: String,
    pub amount: f64,
}

impl ExpenseDraft {
    pub fn to_request(&self) -> ExpenseNew {
        ExpenseNew {
            payer: self.payer.as_str().to_string(),
            date: self.date.to_rfc3339_opts(SecondsFormat::Millis, true),
            description: Some(self.description.clone()),
            amount: self.amount,
        }
    }
}

#[derive(Debug, Default)]
pub struct ExpenseState {
    entries: Vec<Entry>,
    last_error: Option<String>,
}

impl ExpenseState {
    /// Entries in list order: newest optimistic entries first, then the
    /// order the server returned.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent error worth showing to the user.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// A sorted view over the entries; the entries themselves are untouched.
    pub fn sorted(&self, mode: SortMode) -> Vec<&Entry> {
        let mut view = self.entries.iter().collect::<Vec<_>>();
        mode.sort(&mut view);
        view
    }

    pub fn replace_all(&mut self, expenses: Vec<Expense>) {
        self.entries = expenses.into_iter().map(Entry::from).collect();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Prepend an optimistic entry for `draft` and return its token.
    pub fn begin_create(&mut self, draft: &ExpenseDraft) -> Uuid {
        let token = Uuid::new_v4();
        self.entries.insert(
            0,
            Entry {
                id: EntryId::Pending(token),
                date: draft.date,
                description: draft.description.clone(),
                payer: draft.payer,
                amount: draft.amount,
            },
        );
        token
    }

    /// Swap the entry holding `token` for the server's record.
    ///
    /// Returns `false` when the entry is gone (the list was replaced in the
    /// meantime); the record is dropped and shows up on the next fetch.
    pub fn confirm_create(&mut self, token: Uuid, expense: Expense) -> bool {
        match self.position(token) {
            Some(index) => {
                self.entries[index] = Entry::from(expense);
                true
            }
            None => false,
        }
    }

    /// Remove the optimistic entry holding `token`.
    pub fn abandon_create(&mut self, token: Uuid) -> bool {
        match self.position(token) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Apply the outcome of the create request started by `begin_create`.
    pub fn settle_create(
        &mut self,
        token: Uuid,
        result: Result<Expense, ClientError>,
    ) -> Result<(), ClientError> {
        match result {
            Ok(expense) => {
                if !self.confirm_create(token, expense) {
                    tracing::debug!("dropping confirmation for {token}: entry no longer listed");
                }
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                self.abandon_create(token);
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Replace the local list with the server's. On failure the previous
    /// list is kept.
    pub async fn fetch_all<A: ExpenseApi>(&mut self, api: &A) -> Result<(), ClientError> {
        match api.list().await {
            Ok(expenses) => {
                self.replace_all(expenses);
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Show `draft` immediately, then reconcile with the server's answer.
    pub async fn add_optimistic<A: ExpenseApi>(
        &mut self,
        api: &A,
        draft: &ExpenseDraft,
    ) -> Result<(), ClientError> {
        let token = self.begin_create(draft);
        let result = api.create(&draft.to_request()).await;
        self.settle_create(token, result)
    }

    /// Clear the list, reset the server and show the reseeded list.
    ///
    /// If the reset call fails the list is re-fetched so the view matches
    /// whatever the server ended up with; the reset error is returned.
    pub async fn reset_all<A: ExpenseApi>(&mut self, api: &A) -> Result<(), ClientError> {
        self.clear();
        match api.reset().await {
            Ok(expenses) => {
                self.replace_all(expenses);
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                if let Err(fetch_err) = self.fetch_all(api).await {
                    tracing::debug!("recovery fetch after failed reset failed: {fetch_err}");
                }
                self.last_error = Some(format!("Failed to reset expenses: {err}"));
                Err(err)
            }
        }
    }

    fn position(&self, token: Uuid) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.id == EntryId::Pending(token))
    }
}
