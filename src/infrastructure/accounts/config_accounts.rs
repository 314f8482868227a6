#[cfg(test)]
#[path = "config_accounts_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use dashmap::DashMap;
use tokio::fs;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Account;
use crate::domain::models::AccountCredentials;
use crate::domain::models::AccountDirectory;

fn optional_str(table: &toml_edit::Table, key: &str) -> Option<String> {
    return table
        .get(key)
        .and_then(|e| return e.as_str())
        .filter(|e| return !e.is_empty())
        .map(|e| return e.to_string());
}

/// LinkedIn accounts declared as `[[accounts]]` tables in the config file.
/// Refreshed tokens live in memory for the rest of the session.
#[derive(Default)]
pub struct ConfigAccounts {
    accounts: Vec<Account>,
    credentials: DashMap<String, AccountCredentials>,
}

impl ConfigAccounts {
    pub fn from_toml(toml_str: &str) -> Result<ConfigAccounts> {
        let doc = toml_str.parse::<toml_edit::Document>()?;
        let mut res = ConfigAccounts::default();

        let tables = match doc.get("accounts") {
            Some(item) => match item.as_array_of_tables() {
                Some(tables) => tables,
                None => bail!("config.toml key 'accounts' must be an array of tables"),
            },
            None => return Ok(res),
        };

        for (idx, table) in tables.iter().enumerate() {
            let id = match table.get("id") {
                Some(val) if val.is_str() => val.as_str().unwrap_or_default().to_string(),
                Some(val) if val.is_integer() => val.as_integer().unwrap_or_default().to_string(),
                _ => bail!(format!("config.toml account #{} is missing an id", idx + 1)),
            };
            if res.accounts.iter().any(|e| return e.id == id) {
                bail!(format!("config.toml declares account '{id}' more than once"));
            }

            let name = optional_str(table, "name").unwrap_or_else(|| return id.to_string());
            if let Some(access_token) = optional_str(table, "access-token") {
                res.credentials.insert(
                    id.to_string(),
                    AccountCredentials {
                        access_token,
                        refresh_token: optional_str(table, "refresh-token"),
                        token_expires_at: optional_str(table, "token-expires-at"),
                    },
                );
            }

            res.accounts.push(Account { id, name });
        }

        return Ok(res);
    }

    pub async fn load(config_file: &str) -> Result<ConfigAccounts> {
        let config_path = path::PathBuf::from(config_file);
        if !config_path.exists() {
            return Ok(ConfigAccounts::default());
        }

        let toml_str = fs::read_to_string(config_path).await?;
        let res = ConfigAccounts::from_toml(&toml_str)?;
        tracing::debug!(accounts = res.accounts.len(), "loaded accounts");

        return Ok(res);
    }

    pub async fn from_config() -> Result<ConfigAccounts> {
        return ConfigAccounts::load(&Config::get(ConfigKey::ConfigFile)).await;
    }
}

impl AccountDirectory for ConfigAccounts {
    fn list(&self) -> Vec<Account> {
        return self.accounts.clone();
    }

    fn credentials(&self, account_id: &str) -> Option<AccountCredentials> {
        return self
            .credentials
            .get(account_id)
            .map(|e| return e.value().clone());
    }

    fn update_credentials(&self, account_id: &str, credentials: AccountCredentials) {
        self.credentials.insert(account_id.to_string(), credentials);
    }
}
