mod config_accounts;

pub use config_accounts::*;
