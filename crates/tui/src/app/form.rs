use api_types::Payer;
use chrono::{DateTime, Utc};

use crate::state::ExpenseDraft;

const MAX_DESCRIPTION_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Description,
    Payer,
    Amount,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            Self::Description => Self::Payer,
            Self::Payer => Self::Amount,
            Self::Amount => Self::Description,
        }
    }
}

/// The "add expense" form.
#[derive(Debug)]
pub struct AddForm {
    pub description: String,
    pub payer: Payer,
    pub amount: String,
    pub focus: FormField,
    pub message: Option<String>,
}

impl Default for AddForm {
    fn default() -> Self {
        Self {
            description: String::new(),
            payer: Payer::Alice,
            amount: String::new(),
            focus: FormField::Description,
            message: None,
        }
    }
}

impl AddForm {
    pub fn advance_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn toggle_payer(&mut self) {
        self.payer = match self.payer {
            Payer::Alice => Payer::Bob,
            Payer::Bob => Payer::Alice,
        };
    }

    pub fn input(&mut self, ch: char) {
        match self.focus {
            FormField::Description => {
                if self.description.chars().count() < MAX_DESCRIPTION_CHARS {
                    self.description.push(ch);
                }
            }
            FormField::Payer => match ch {
                'a' | 'A' => self.payer = Payer::Alice,
                'b' | 'B' => self.payer = Payer::Bob,
                ' ' => self.toggle_payer(),
                _ => {}
            },
            FormField::Amount => {
                if ch.is_ascii_digit() || ch == '.' {
                    self.amount.push(ch);
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            FormField::Description => {
                self.description.pop();
            }
            FormField::Amount => {
                self.amount.pop();
            }
            FormField::Payer => {}
        }
    }

    /// Validate the form and build a draft dated `now`.
    pub fn to_draft(&self, now: DateTime<Utc>) -> Result<ExpenseDraft, String> {
        let amount = parse_amount(&self.amount)?;
        Ok(ExpenseDraft {
            payer: self.payer,
            date: now,
            description: self.description.trim().to_string(),
            amount,
        })
    }
}

/// Accepts digits with at most two decimals (`12`, `12.5`, `12.50`) and a
/// value above zero.
pub fn parse_amount(input: &str) -> Result<f64, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Amount is required".to_string());
    }

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (trimmed, None),
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    let fraction_ok = fraction.is_none_or(|f| digits(f) && f.len() <= 2);
    if !digits(whole) || !fraction_ok {
        return Err("Please enter a valid amount".to_string());
    }

    let amount = trimmed
        .parse::<f64>()
        .map_err(|_| "Please enter a valid amount".to_string())?;
    if amount <= 0.0 {
        return Err("Amount must be a positive number".to_string());
    }
    Ok(amount)
}
