use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CompanyName, EmailAddress, LeadId, LeadScore, LeadValue, PersonName, PhoneNumber, PlaceName,
    TypeConstraintError,
};

/// Lead record as returned by the remote store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    #[serde(rename = "_id")]
    pub id: LeadId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub city: String,
    pub state: String,
    pub source: LeadSource,
    pub status: LeadStatus,
    pub score: u8,
    pub lead_value: f64,
    pub is_qualified: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Lead {
    /// Display name combining first and last name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Validated lead body sent on create and update.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct LeadPayload {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub company: CompanyName,
    pub city: PlaceName,
    pub state: PlaceName,
    pub source: LeadSource,
    pub status: LeadStatus,
    pub score: LeadScore,
    pub lead_value: LeadValue,
    pub is_qualified: bool,
}

macro_rules! lead_vocabulary {
    ($name:ident, $doc:expr, { $($variant:ident => ($wire:literal, $label:literal)),+ $(,)? }) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant in presentation order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Value used on the wire.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            /// Human-readable label.
            pub const fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($wire => Ok($name::$variant),)+
                    other => Err(TypeConstraintError::InvalidValue(other.to_string())),
                }
            }
        }
    };
}

lead_vocabulary!(LeadSource, "Channel through which the lead arrived.", {
    Website => ("website", "Website"),
    FacebookAds => ("facebook_ads", "Facebook Ads"),
    GoogleAds => ("google_ads", "Google Ads"),
    Referral => ("referral", "Referral"),
    Events => ("events", "Events"),
    Other => ("other", "Other"),
});

lead_vocabulary!(LeadStatus, "Sales pipeline stage of the lead.", {
    New => ("new", "New"),
    Contacted => ("contacted", "Contacted"),
    Qualified => ("qualified", "Qualified"),
    Lost => ("lost", "Lost"),
    Won => ("won", "Won"),
});

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn lead_decodes_server_record() {
        let value = json!({
            "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "first_name": "Jane",
            "last_name": "Doe",
            "email": "jane@example.com",
            "phone": "555-0100",
            "company": "Acme",
            "city": "Austin",
            "state": "TX",
            "source": "google_ads",
            "status": "contacted",
            "score": 72,
            "lead_value": 1500.5,
            "is_qualified": true,
            "created_at": "2024-03-01T10:00:00Z"
        });

        let lead: Lead = serde_json::from_value(value).unwrap();

        assert_eq!(lead.id.as_str(), "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(lead.source, LeadSource::GoogleAds);
        assert_eq!(lead.status, LeadStatus::Contacted);
        assert_eq!(lead.full_name(), "Jane Doe");
        assert!(lead.updated_at.is_none());
    }

    #[test]
    fn vocabulary_parses_wire_values() {
        assert_eq!("facebook_ads".parse::<LeadSource>(), Ok(LeadSource::FacebookAds));
        assert_eq!(" won ".parse::<LeadStatus>(), Ok(LeadStatus::Won));
        assert!("cold".parse::<LeadStatus>().is_err());
        assert_eq!(LeadSource::Events.label(), "Events");
        assert_eq!(LeadStatus::ALL.len(), 5);
        assert_eq!(LeadSource::ALL.len(), 6);
    }
}
