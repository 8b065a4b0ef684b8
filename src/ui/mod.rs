pub mod admin;
pub mod dashboard;
pub mod footer;
pub mod help;
pub mod popup;
pub mod theme;
