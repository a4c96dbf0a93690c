pub mod edit_form;
pub mod sections;
