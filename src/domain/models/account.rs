use serde_derive::Deserialize;
use serde_derive::Serialize;

/// A LinkedIn account as shown in the account selectors. The id is opaque
/// and only meaningful to the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCredentials {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_expires_at: Option<String>,
}

/// Source of LinkedIn accounts and the OAuth tokens required to publish on
/// their behalf.
pub trait AccountDirectory {
    /// Accounts available for publishing and scheduling, in display order.
    fn list(&self) -> Vec<Account>;

    /// Tokens for the given account, if any are known.
    fn credentials(&self, account_id: &str) -> Option<AccountCredentials>;

    /// Replaces stored tokens after the server reports a refresh.
    fn update_credentials(&self, account_id: &str, credentials: AccountCredentials);
}

pub type AccountDirectoryBox = Box<dyn AccountDirectory + Send + Sync>;
