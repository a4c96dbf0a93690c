pub mod auth;
pub mod breakpoint;
pub mod message;
