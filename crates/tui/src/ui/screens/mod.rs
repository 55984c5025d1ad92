pub mod add;
pub mod expenses;
