pub mod filters;
pub mod form;
pub mod table;
