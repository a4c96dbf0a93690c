pub mod decision_dialog;
pub mod filters;
pub mod table;
