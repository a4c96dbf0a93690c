pub mod download;
pub mod form;
pub mod navigation;
pub mod time;
pub mod timing;
