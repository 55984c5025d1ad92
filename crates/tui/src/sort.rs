//! Display orderings for the expense list.
//!
//! A [`SortMode`] picks one of four comparators. Sorting only ever reorders a
//! view; the list it was derived from keeps its own order.

use std::{cmp::Ordering, fmt, str::FromStr};

use api_types::expense::Expense;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Anything that can be ordered by date or by amount.
pub trait SortKey {
    fn date(&self) -> DateTime<Utc>;
    fn amount(&self) -> f64;
}

impl SortKey for Expense {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }

    fn amount(&self) -> f64 {
        self.amount
    }
}

impl<T: SortKey> SortKey for &T {
    fn date(&self) -> DateTime<Utc> {
        (**self).date()
    }

    fn amount(&self) -> f64 {
        (**self).amount()
    }
}

pub type Comparator<T> = fn(&T, &T) -> Ordering;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    #[default]
    DateNewest,
    DateOldest,
    AmountHighest,
    AmountLowest,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        SortMode::DateNewest,
        SortMode::DateOldest,
        SortMode::AmountHighest,
        SortMode::AmountLowest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DateNewest => "date-newest",
            Self::DateOldest => "date-oldest",
            Self::AmountHighest => "amount-highest",
            Self::AmountLowest => "amount-lowest",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::DateNewest => "Date (Newest First)",
            Self::DateOldest => "Date (Oldest First)",
            Self::AmountHighest => "Amount (Highest First)",
            Self::AmountLowest => "Amount (Lowest First)",
        }
    }

    /// The mode after this one, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::DateNewest => Self::DateOldest,
            Self::DateOldest => Self::AmountHighest,
            Self::AmountHighest => Self::AmountLowest,
            Self::AmountLowest => Self::DateNewest,
        }
    }

    pub fn comparator<T: SortKey>(self) -> Comparator<T> {
        match self {
            Self::DateNewest => date_newest::<T>,
            Self::DateOldest => date_oldest::<T>,
            Self::AmountHighest => amount_highest::<T>,
            Self::AmountLowest => amount_lowest::<T>,
        }
    }

    /// Stable in-place sort of `items`.
    pub fn sort<T: SortKey>(self, items: &mut [T]) {
        items.sort_by(self.comparator::<T>());
    }
}

fn date_newest<T: SortKey>(a: &T, b: &T) -> Ordering {
    b.date().cmp(&a.date())
}

fn date_oldest<T: SortKey>(a: &T, b: &T) -> Ordering {
    a.date().cmp(&b.date())
}

fn amount_highest<T: SortKey>(a: &T, b: &T) -> Ordering {
    b.amount().total_cmp(&a.amount())
}

fn amount_lowest<T: SortKey>(a: &T, b: &T) -> Ordering {
    a.amount().total_cmp(&b.amount())
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == value)
            .ok_or_else(|| format!("unknown sort mode: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_types::Payer;
    use chrono::TimeZone;

    fn expense(id: i64, day: u32, amount: f64) -> Expense {
        Expense {
            id,
            date: Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap(),
            description: String::new(),
            payer: Payer::Alice,
            amount,
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(1, 10, 5.0),
            expense(2, 3, 42.0),
            expense(3, 21, 0.5),
            expense(4, 7, 13.25),
        ]
    }

    fn ids(items: &[Expense]) -> Vec<i64> {
        items.iter().map(|e| e.id).collect()
    }

    #[test]
    fn each_mode_orders_as_named() {
        let mut items = sample();
        SortMode::DateNewest.sort(&mut items);
        assert_eq!(ids(&items), vec![3, 1, 4, 2]);
        SortMode::DateOldest.sort(&mut items);
        assert_eq!(ids(&items), vec![2, 4, 1, 3]);
        SortMode::AmountHighest.sort(&mut items);
        assert_eq!(ids(&items), vec![2, 4, 1, 3]);
        SortMode::AmountLowest.sort(&mut items);
        assert_eq!(ids(&items), vec![3, 1, 4, 2]);
    }

    #[test]
    fn sorting_is_idempotent() {
        for mode in SortMode::ALL {
            let mut once = sample();
            mode.sort(&mut once);
            let mut twice = once.clone();
            mode.sort(&mut twice);
            assert_eq!(once, twice, "{mode}");
        }
    }

    #[test]
    fn amount_orders_are_reverses() {
        let mut highest = sample();
        SortMode::AmountHighest.sort(&mut highest);
        let mut lowest = sample();
        SortMode::AmountLowest.sort(&mut lowest);
        lowest.reverse();
        assert_eq!(highest, lowest);
    }

    #[test]
    fn modes_round_trip_through_names() {
        for mode in SortMode::ALL {
            assert_eq!(mode.as_str().parse::<SortMode>(), Ok(mode));
        }
        assert!("newest".parse::<SortMode>().is_err());
    }

    #[test]
    fn next_cycles_through_every_mode() {
        let mut mode = SortMode::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(mode);
            mode = mode.next();
        }
        assert_eq!(seen, SortMode::ALL);
        assert_eq!(mode, SortMode::DateNewest);
    }
}
