pub mod bulk_summary;
pub mod cards;
pub mod common;
pub mod confirm_dialog;
pub mod empty_state;
pub mod error;
pub mod guard;
pub mod layout;
pub mod leave_labels;
pub mod modal;
pub mod pager;
