pub mod form;
pub mod payslip;
pub mod table;
