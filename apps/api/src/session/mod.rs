//! Current role (HR or candidate) persisted in client storage, plus the
//! route guard that reads it.

pub mod guard;
pub mod storage;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use storage::{ClientStorage, StorageResult};

/// Storage key holding the role flag.
pub const ROLE_KEY: &str = "userRole";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Hr,
    Candidate,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Hr => "hr",
            Role::Candidate => "candidate",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "hr" => Some(Role::Hr),
            "candidate" => Some(Role::Candidate),
            _ => None,
        }
    }
}

pub struct Session {
    role: Option<Role>,
    storage: Arc<dyn ClientStorage>,
}

impl Session {
    /// Reads the persisted role. Unknown values are treated as logged out.
    pub async fn restore(storage: Arc<dyn ClientStorage>) -> StorageResult<Self> {
        let role = match storage.get(ROLE_KEY).await? {
            Some(raw) => {
                let role = Role::parse(&raw);
                if role.is_none() {
                    warn!("Ignoring unknown stored role {raw:?}");
                }
                role
            }
            None => None,
        };
        Ok(Session { role, storage })
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_hr(&self) -> bool {
        self.role == Some(Role::Hr)
    }

    pub fn is_candidate(&self) -> bool {
        self.role == Some(Role::Candidate)
    }

    /// `None` removes the stored flag.
    pub async fn set_role(&mut self, role: Option<Role>) -> StorageResult<()> {
        match role {
            Some(r) => self.storage.set(ROLE_KEY, r.as_str()).await?,
            None => self.storage.remove(ROLE_KEY).await?,
        }
        self.role = role;
        info!("Role set to {}", role.map_or("none", Role::as_str));
        Ok(())
    }

    /// Clears the role and everything else in client storage.
    pub async fn logout(&mut self) -> StorageResult<()> {
        self.storage.clear().await?;
        self.role = None;
        info!("Logged out");
        Ok(())
    }
}
