//! Expenses API endpoints

use api_types::expense::{Expense, ExpenseNew, ExpensesReset};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use engine::ExpenseInput;

use crate::{ServerError, server::ServerState};

fn map_payer(payer: engine::Payer) -> api_types::Payer {
    match payer {
        engine::Payer::Alice => api_types::Payer::Alice,
        engine::Payer::Bob => api_types::Payer::Bob,
    }
}

fn map_expense(expense: engine::Expense) -> Expense {
    Expense {
        id: expense.id,
        date: expense.date,
        description: expense.description,
        payer: map_payer(expense.payer),
        amount: expense.amount,
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Expense>>, ServerError> {
    let expenses = state.engine.list_all().await?;

    Ok(Json(expenses.into_iter().map(map_expense).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Result<(StatusCode, Json<Expense>), ServerError> {
    let Json(payload) =
        payload.map_err(|rejection| ServerError::InvalidBody(rejection.body_text()))?;

    let expense = state
        .engine
        .create(ExpenseInput {
            payer: payload.payer,
            date: payload.date,
            description: payload.description.unwrap_or_default(),
            amount: payload.amount,
        })
        .await?;
    tracing::info!(
        "created expense {} ({} paid {})",
        expense.id,
        expense.payer.as_str(),
        expense.amount
    );

    Ok((StatusCode::CREATED, Json(map_expense(expense))))
}

pub async fn reset(State(state): State<ServerState>) -> Result<Json<ExpensesReset>, ServerError> {
    let expenses = state.engine.reset().await?;
    tracing::info!("expenses reset to {} seed entries", expenses.len());

    Ok(Json(ExpensesReset {
        message: "Expenses reset to initial data".to_string(),
        data: expenses.into_iter().map(map_expense).collect(),
    }))
}
