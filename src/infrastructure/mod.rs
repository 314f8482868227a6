pub mod accounts;
pub mod api;
