//! Accounts that own messaging numbers.
//!
//! The account records belong to the embedding application. The client only
//! needs to find an account by its messaging number and to record a newly
//! purchased number, which is what [`AccountDirectory`] exposes.

use crate::phone::{digits, strip_internationalize};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// An account (organization or user) that can own a messaging number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub messaging_number: Option<String>,
}

impl Account {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            messaging_number: None,
        }
    }

    pub fn with_messaging_number(mut self, number: impl Into<String>) -> Self {
        self.messaging_number = Some(number.into());
        self
    }
}

/// Lookup and update of account messaging numbers.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Find the account whose messaging number matches `number`.
    async fn find_by_messaging_number(&self, number: &str) -> Option<Account>;

    /// Record `number` as the messaging number of account `account_id`.
    ///
    /// Returns false if the account is unknown.
    async fn set_messaging_number(&self, account_id: &str, number: &str) -> bool;
}

/// In-memory account directory.
///
/// Numbers are matched on their digits after removing the `+1` marker, so
/// `"+15551234567"`, `"5551234567"` and `"(555) 123-4567"` all find the same
/// account.
#[derive(Clone, Default)]
pub struct InMemoryAccountDirectory {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl InMemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from existing account records.
    pub fn from_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|a| (a.id.clone(), a))
            .collect::<HashMap<_, _>>();
        Self {
            accounts: Arc::new(RwLock::new(accounts)),
        }
    }

    /// Build a directory from a JSON array of account records.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let accounts: Vec<Account> = serde_json::from_str(json)?;
        Ok(Self::from_accounts(accounts))
    }

    pub async fn insert(&self, account: Account) {
        self.accounts.write().await.insert(account.id.clone(), account);
    }

    pub async fn get(&self, account_id: &str) -> Option<Account> {
        self.accounts.read().await.get(account_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

fn national_digits(number: &str) -> String {
    digits(&strip_internationalize(number.trim()))
}

#[async_trait]
impl AccountDirectory for InMemoryAccountDirectory {
    #[instrument(skip(self))]
    async fn find_by_messaging_number(&self, number: &str) -> Option<Account> {
        let wanted = national_digits(number);
        if wanted.is_empty() {
            return None;
        }

        let accounts = self.accounts.read().await;
        let found = accounts
            .values()
            .find(|a| {
                a.messaging_number
                    .as_deref()
                    .map(|n| national_digits(n) == wanted)
                    .unwrap_or(false)
            })
            .cloned();

        debug!(found = found.is_some(), "Account lookup by messaging number");
        found
    }

    #[instrument(skip(self))]
    async fn set_messaging_number(&self, account_id: &str, number: &str) -> bool {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(account_id) {
            Some(account) => {
                account.messaging_number = Some(number.to_string());
                true
            }
            None => false,
        }
    }
}
