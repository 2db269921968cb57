//! Project stakeholders

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SeretoError;

/// Role of a person in the project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonType {
    /// Client contact who requested the assessment
    Requester,
    /// Owner of the assessed asset
    AssetOwner,
    /// Client security officer
    SecurityOfficer,
    /// Technical point of contact
    TechnicalContact,
    /// Report author (tester)
    Author,
    /// Report reviewer
    Reviewer,
}

impl PersonType {
    /// All person types in display order
    pub const ALL: [Self; 6] = [
        Self::Requester,
        Self::AssetOwner,
        Self::SecurityOfficer,
        Self::TechnicalContact,
        Self::Author,
        Self::Reviewer,
    ];
}

impl fmt::Display for PersonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requester => write!(f, "requester"),
            Self::AssetOwner => write!(f, "asset_owner"),
            Self::SecurityOfficer => write!(f, "security_officer"),
            Self::TechnicalContact => write!(f, "technical_contact"),
            Self::Author => write!(f, "author"),
            Self::Reviewer => write!(f, "reviewer"),
        }
    }
}

impl FromStr for PersonType {
    type Err = SeretoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "requester" => Ok(Self::Requester),
            "asset_owner" | "owner" => Ok(Self::AssetOwner),
            "security_officer" => Ok(Self::SecurityOfficer),
            "technical_contact" | "contact" => Ok(Self::TechnicalContact),
            "author" => Ok(Self::Author),
            "reviewer" => Ok(Self::Reviewer),
            _ => Err(SeretoError::parse(
                "person type",
                format!(
                    "{s}. Use: requester, asset_owner, security_officer, technical_contact, \
                     author, reviewer"
                ),
            )),
        }
    }
}

/// A stakeholder; every descriptive field is optional
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Person {
    /// Role in the project
    #[serde(rename = "type")]
    pub kind: PersonType,

    /// Full name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Business unit or department
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_unit: Option<String>,

    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Job title or project role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Person {
    /// Create a person with only a type set
    #[must_use]
    pub const fn new(kind: PersonType) -> Self {
        Self {
            kind,
            name: None,
            business_unit: None,
            email: None,
            role: None,
        }
    }

    /// Set the name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the business unit
    #[must_use]
    pub fn with_business_unit(mut self, business_unit: impl Into<String>) -> Self {
        self.business_unit = Some(business_unit.into());
        self
    }

    /// Set the email
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the role
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}
