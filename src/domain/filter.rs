//! Typed filter predicates attached to every lead list query.
//!
//! A predicate is a tagged union over the field classes of the leads grid.
//! Each variant carries the payload its operators need, so a [`Filters`] value
//! can only hold predicates that make sense for their field.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use thiserror::Error;

use crate::domain::lead::{LeadSource, LeadStatus};

/// Date format accepted and produced by date predicates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors raised while building or storing a predicate.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FilterError {
    #[error("operator `{operator}` is not supported for field `{field}`")]
    UnsupportedOperator {
        field: FilterField,
        operator: Operator,
    },
    #[error("operator `{operator}` expects {expected}")]
    UnexpectedInput {
        operator: Operator,
        expected: &'static str,
    },
    #[error("invalid value `{value}` for field `{field}`")]
    InvalidValue { field: FilterField, value: String },
    #[error("predicate does not match field `{0}`")]
    MismatchedPredicate(FilterField),
    #[error("unknown filter field `{0}`")]
    UnknownField(String),
}

/// Shape of the values a field holds, which decides its legal operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldClass {
    String,
    Number,
    Enum,
    Date,
    Boolean,
}

impl FieldClass {
    /// Operators legal for this class, in the order the filter panel lists them.
    pub const fn operators(self) -> &'static [Operator] {
        match self {
            FieldClass::String => &[Operator::Equals, Operator::Contains],
            FieldClass::Number => &[
                Operator::Equals,
                Operator::GreaterThan,
                Operator::LessThan,
                Operator::Between,
            ],
            FieldClass::Enum => &[Operator::Equals, Operator::In],
            FieldClass::Date => &[
                Operator::On,
                Operator::Before,
                Operator::After,
                Operator::Between,
            ],
            FieldClass::Boolean => &[Operator::Equals],
        }
    }

    pub fn supports(self, operator: Operator) -> bool {
        self.operators().contains(&operator)
    }
}

/// Lead attributes that can be filtered on.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    FirstName,
    LastName,
    Email,
    Phone,
    Company,
    City,
    State,
    Source,
    Status,
    Score,
    LeadValue,
    IsQualified,
    CreatedAt,
}

impl FilterField {
    pub const ALL: &'static [FilterField] = &[
        FilterField::FirstName,
        FilterField::LastName,
        FilterField::Email,
        FilterField::Phone,
        FilterField::Company,
        FilterField::City,
        FilterField::State,
        FilterField::Source,
        FilterField::Status,
        FilterField::Score,
        FilterField::LeadValue,
        FilterField::IsQualified,
        FilterField::CreatedAt,
    ];

    pub const fn class(self) -> FieldClass {
        match self {
            FilterField::FirstName
            | FilterField::LastName
            | FilterField::Email
            | FilterField::Phone
            | FilterField::Company
            | FilterField::City
            | FilterField::State => FieldClass::String,
            FilterField::Score | FilterField::LeadValue => FieldClass::Number,
            FilterField::Source | FilterField::Status => FieldClass::Enum,
            FilterField::CreatedAt => FieldClass::Date,
            FilterField::IsQualified => FieldClass::Boolean,
        }
    }

    /// Wire name of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            FilterField::FirstName => "first_name",
            FilterField::LastName => "last_name",
            FilterField::Email => "email",
            FilterField::Phone => "phone",
            FilterField::Company => "company",
            FilterField::City => "city",
            FilterField::State => "state",
            FilterField::Source => "source",
            FilterField::Status => "status",
            FilterField::Score => "score",
            FilterField::LeadValue => "lead_value",
            FilterField::IsQualified => "is_qualified",
            FilterField::CreatedAt => "created_at",
        }
    }
}

impl Display for FilterField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s.trim())
            .ok_or_else(|| FilterError::UnknownField(s.to_string()))
    }
}

/// Comparison applied by a predicate.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Operator {
    #[serde(rename = "equals")]
    Equals,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "gt")]
    GreaterThan,
    #[serde(rename = "lt")]
    LessThan,
    #[serde(rename = "between")]
    Between,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "on")]
    On,
    #[serde(rename = "before")]
    Before,
    #[serde(rename = "after")]
    After,
}

impl Operator {
    pub const fn as_str(self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::Contains => "contains",
            Operator::GreaterThan => "gt",
            Operator::LessThan => "lt",
            Operator::Between => "between",
            Operator::In => "in",
            Operator::On => "on",
            Operator::Before => "before",
            Operator::After => "after",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Operator::Equals => "Equals",
            Operator::Contains => "Contains",
            Operator::GreaterThan => "Greater than",
            Operator::LessThan => "Less than",
            Operator::Between => "Between",
            Operator::In => "In",
            Operator::On => "On",
            Operator::Before => "Before",
            Operator::After => "After",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Untyped filter input as typed into the filter panel.
///
/// Blank strings stand for absent values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawValue {
    Single(String),
    Range { min: String, max: String },
    Many(Vec<String>),
}

impl RawValue {
    pub fn single(value: impl Into<String>) -> Self {
        RawValue::Single(value.into())
    }

    pub fn range(min: impl Into<String>, max: impl Into<String>) -> Self {
        RawValue::Range {
            min: min.into(),
            max: max.into(),
        }
    }

    pub fn many<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RawValue::Many(values.into_iter().map(Into::into).collect())
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "operator", content = "value", rename_all = "snake_case")]
pub enum TextPredicate {
    Equals(String),
    Contains(String),
}

/// Inclusive numeric range; a missing `max` leaves the range open-ended.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NumberRange {
    pub min: Number,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Number>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "operator", content = "value")]
pub enum NumberPredicate {
    #[serde(rename = "equals")]
    Equals(Number),
    #[serde(rename = "gt")]
    GreaterThan(Number),
    #[serde(rename = "lt")]
    LessThan(Number),
    #[serde(rename = "between")]
    Between(NumberRange),
}

/// Vocabulary value of an enum field.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum EnumValue {
    Source(LeadSource),
    Status(LeadStatus),
}

impl EnumValue {
    /// Parses `raw` against the vocabulary of `field`.
    pub fn parse(field: FilterField, raw: &str) -> Result<Self, FilterError> {
        let invalid = || FilterError::InvalidValue {
            field,
            value: raw.to_string(),
        };
        match field {
            FilterField::Source => raw.parse().map(EnumValue::Source).map_err(|_| invalid()),
            FilterField::Status => raw.parse().map(EnumValue::Status).map_err(|_| invalid()),
            _ => Err(FilterError::MismatchedPredicate(field)),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            EnumValue::Source(source) => source.as_str(),
            EnumValue::Status(status) => status.as_str(),
        }
    }

    fn belongs_to(self, field: FilterField) -> bool {
        matches!(
            (self, field),
            (EnumValue::Source(_), FilterField::Source) | (EnumValue::Status(_), FilterField::Status)
        )
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "operator", content = "value", rename_all = "snake_case")]
pub enum EnumPredicate {
    Equals(EnumValue),
    In(Vec<EnumValue>),
}

/// Date range with at least one bound present.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DateRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "operator", content = "value", rename_all = "snake_case")]
pub enum DatePredicate {
    On(NaiveDate),
    Before(NaiveDate),
    After(NaiveDate),
    Between(DateRange),
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "operator", content = "value", rename_all = "snake_case")]
pub enum BooleanPredicate {
    Equals(bool),
}

/// Normalized filter constraint, serialized as `{"operator": .., "value": ..}`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Predicate {
    Text(TextPredicate),
    Number(NumberPredicate),
    Enum(EnumPredicate),
    Date(DatePredicate),
    Boolean(BooleanPredicate),
}

impl Predicate {
    pub const fn class(&self) -> FieldClass {
        match self {
            Predicate::Text(_) => FieldClass::String,
            Predicate::Number(_) => FieldClass::Number,
            Predicate::Enum(_) => FieldClass::Enum,
            Predicate::Date(_) => FieldClass::Date,
            Predicate::Boolean(_) => FieldClass::Boolean,
        }
    }

    pub const fn operator(&self) -> Operator {
        match self {
            Predicate::Text(TextPredicate::Equals(_)) => Operator::Equals,
            Predicate::Text(TextPredicate::Contains(_)) => Operator::Contains,
            Predicate::Number(NumberPredicate::Equals(_)) => Operator::Equals,
            Predicate::Number(NumberPredicate::GreaterThan(_)) => Operator::GreaterThan,
            Predicate::Number(NumberPredicate::LessThan(_)) => Operator::LessThan,
            Predicate::Number(NumberPredicate::Between(_)) => Operator::Between,
            Predicate::Enum(EnumPredicate::Equals(_)) => Operator::Equals,
            Predicate::Enum(EnumPredicate::In(_)) => Operator::In,
            Predicate::Date(DatePredicate::On(_)) => Operator::On,
            Predicate::Date(DatePredicate::Before(_)) => Operator::Before,
            Predicate::Date(DatePredicate::After(_)) => Operator::After,
            Predicate::Date(DatePredicate::Between(_)) => Operator::Between,
            Predicate::Boolean(BooleanPredicate::Equals(_)) => Operator::Equals,
        }
    }

    /// Raw input that rebuilds into this exact predicate.
    pub fn to_raw(&self) -> RawValue {
        let date = |d: &NaiveDate| d.format(DATE_FORMAT).to_string();
        let optional_date = |d: &Option<NaiveDate>| d.as_ref().map(date).unwrap_or_default();
        match self {
            Predicate::Text(TextPredicate::Equals(s) | TextPredicate::Contains(s)) => {
                RawValue::single(s.clone())
            }
            Predicate::Number(
                NumberPredicate::Equals(n)
                | NumberPredicate::GreaterThan(n)
                | NumberPredicate::LessThan(n),
            ) => RawValue::single(n.to_string()),
            Predicate::Number(NumberPredicate::Between(range)) => RawValue::range(
                range.min.to_string(),
                range.max.as_ref().map(Number::to_string).unwrap_or_default(),
            ),
            Predicate::Enum(EnumPredicate::Equals(value)) => RawValue::single(value.as_str()),
            Predicate::Enum(EnumPredicate::In(values)) => {
                RawValue::many(values.iter().map(|value| value.as_str()))
            }
            Predicate::Date(
                DatePredicate::On(d) | DatePredicate::Before(d) | DatePredicate::After(d),
            ) => RawValue::single(date(d)),
            Predicate::Date(DatePredicate::Between(range)) => {
                RawValue::range(optional_date(&range.from), optional_date(&range.to))
            }
            Predicate::Boolean(BooleanPredicate::Equals(b)) => RawValue::single(b.to_string()),
        }
    }

    /// Whether this predicate may be stored under `field`.
    pub fn fits(&self, field: FilterField) -> bool {
        if self.class() != field.class() {
            return false;
        }
        match self {
            Predicate::Enum(EnumPredicate::Equals(value)) => value.belongs_to(field),
            Predicate::Enum(EnumPredicate::In(values)) => {
                values.iter().all(|value| value.belongs_to(field))
            }
            _ => true,
        }
    }
}

/// Active filters keyed by field; at most one predicate per field.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Filters(BTreeMap<FilterField, Predicate>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `predicate` for `field`, replacing any previous one.
    pub fn insert(
        &mut self,
        field: FilterField,
        predicate: Predicate,
    ) -> Result<Option<Predicate>, FilterError> {
        if !predicate.fits(field) {
            return Err(FilterError::MismatchedPredicate(field));
        }
        Ok(self.0.insert(field, predicate))
    }

    pub fn remove(&mut self, field: FilterField) -> Option<Predicate> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: FilterField) -> Option<&Predicate> {
        self.0.get(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterField, &Predicate)> {
        self.0.iter().map(|(field, predicate)| (*field, predicate))
    }
}
