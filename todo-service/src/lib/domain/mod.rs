pub mod account;
pub mod todo;
