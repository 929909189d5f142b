use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::lead::{Lead, LeadPayload, LeadSource, LeadStatus};
use crate::domain::types::{
    CompanyName, EmailAddress, LeadScore, LeadValue, MAX_LEAD_SCORE, PersonName, PhoneNumber,
    PlaceName,
};
use crate::forms::{FormError, email_address, invalid, not_blank};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
/// Create/edit dialog contents as entered by the user.
pub struct LeadForm {
    #[validate(custom(function = "not_blank", message = "First name is required"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank", message = "Last name is required"))]
    pub last_name: String,
    #[validate(custom(function = "email_address"))]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "Phone is required"))]
    pub phone: String,
    #[validate(custom(function = "not_blank", message = "Company is required"))]
    pub company: String,
    #[validate(custom(function = "not_blank", message = "City is required"))]
    pub city: String,
    #[validate(custom(function = "not_blank", message = "State is required"))]
    pub state: String,
    #[validate(custom(function = "lead_source"))]
    pub source: String,
    #[validate(custom(function = "lead_status"))]
    pub status: String,
    /// Score input, expected to hold a whole number in `0..=100`.
    #[validate(custom(function = "lead_score"))]
    pub score: String,
    /// Monetary value input, expected to hold a non-negative amount.
    #[validate(custom(function = "lead_value"))]
    pub lead_value: String,
    #[serde(default)]
    pub is_qualified: bool,
}

impl LeadForm {
    /// Pre-fills the edit dialog with an existing lead.
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            first_name: lead.first_name.clone(),
            last_name: lead.last_name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            company: lead.company.clone(),
            city: lead.city.clone(),
            state: lead.state.clone(),
            source: lead.source.as_str().to_string(),
            status: lead.status.as_str().to_string(),
            score: lead.score.to_string(),
            lead_value: lead.lead_value.to_string(),
            is_qualified: lead.is_qualified,
        }
    }
}

fn parse_score(raw: &str) -> Result<i64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(invalid("required", "Score is required"));
    }
    let score = raw
        .parse::<i64>()
        .map_err(|_| invalid("number", "Score must be a whole number"))?;
    if score < 0 {
        return Err(invalid("range", "Score must be at least 0"));
    }
    if score > MAX_LEAD_SCORE {
        return Err(invalid("range", "Score cannot exceed 100"));
    }
    Ok(score)
}

fn parse_lead_value(raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(invalid("required", "Lead value is required"));
    }
    let value = raw
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| invalid("number", "Lead value must be a number"))?;
    if value < 0.0 {
        return Err(invalid("range", "Lead value must be positive"));
    }
    Ok(value)
}

fn parse_source(raw: &str) -> Result<LeadSource, ValidationError> {
    if raw.trim().is_empty() {
        return Err(invalid("required", "Source is required"));
    }
    raw.parse()
        .map_err(|_| invalid("choice", "Unknown lead source"))
}

fn parse_status(raw: &str) -> Result<LeadStatus, ValidationError> {
    if raw.trim().is_empty() {
        return Err(invalid("required", "Status is required"));
    }
    raw.parse()
        .map_err(|_| invalid("choice", "Unknown lead status"))
}

fn lead_score(raw: &str) -> Result<(), ValidationError> {
    parse_score(raw).map(|_| ())
}

fn lead_value(raw: &str) -> Result<(), ValidationError> {
    parse_lead_value(raw).map(|_| ())
}

fn lead_source(raw: &str) -> Result<(), ValidationError> {
    parse_source(raw).map(|_| ())
}

fn lead_status(raw: &str) -> Result<(), ValidationError> {
    parse_status(raw).map(|_| ())
}

impl TryFrom<&LeadForm> for LeadPayload {
    type Error = FormError;

    /// Validate the [`LeadForm`] and convert it into a payload for the store.
    fn try_from(form: &LeadForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let field_error = |field: &'static str, err: ValidationError| {
            let mut errors = validator::ValidationErrors::new();
            errors.add(field, err);
            FormError::Validation(errors)
        };

        Ok(LeadPayload {
            first_name: PersonName::new(form.first_name.as_str())?,
            last_name: PersonName::new(form.last_name.as_str())?,
            email: EmailAddress::new(form.email.as_str())?,
            phone: PhoneNumber::new(form.phone.as_str())?,
            company: CompanyName::new(form.company.as_str())?,
            city: PlaceName::new(form.city.as_str())?,
            state: PlaceName::new(form.state.as_str())?,
            source: parse_source(&form.source).map_err(|err| field_error("source", err))?,
            status: parse_status(&form.status).map_err(|err| field_error("status", err))?,
            score: LeadScore::new(parse_score(&form.score).map_err(|err| field_error("score", err))?)?,
            lead_value: LeadValue::new(
                parse_lead_value(&form.lead_value).map_err(|err| field_error("lead_value", err))?,
            )?,
            is_qualified: form.is_qualified,
        })
    }
}
