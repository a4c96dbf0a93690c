pub mod balance;
pub mod form;
pub mod list;
