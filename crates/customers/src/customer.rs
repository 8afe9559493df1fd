use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crm_core::{CustomerId, DomainError, DomainResult, UserId};

/// Contact information for a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// A customer record.
///
/// `user_id` links the record to a login account when the customer
/// self-registered; staff-created customers have no account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    user_id: Option<UserId>,
    name: String,
    contact: ContactInfo,
    created_at: DateTime<Utc>,
}

impl Customer {
    pub fn register(
        id: CustomerId,
        user_id: Option<UserId>,
        name: impl Into<String>,
        contact: Option<ContactInfo>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        Ok(Self {
            id,
            user_id,
            name,
            contact: contact.unwrap_or_default(),
            created_at,
        })
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Update name and/or contact info; `None` keeps the existing value.
    pub fn update_details(
        &mut self,
        name: Option<String>,
        contact: Option<ContactInfo>,
    ) -> DomainResult<()> {
        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name cannot be empty"));
            }
            self.name = name;
        }
        if let Some(contact) = contact {
            self.contact = contact;
        }
        Ok(())
    }
}
