//! Builds typed predicates out of raw filter panel input.

use chrono::NaiveDate;
use serde_json::Number;

use crate::domain::filter::{
    BooleanPredicate, DATE_FORMAT, DatePredicate, DateRange, EnumPredicate, EnumValue, FieldClass,
    FilterError, FilterField, Filters, NumberPredicate, NumberRange, Operator, Predicate,
    RawValue, TextPredicate,
};
use crate::domain::types::MAX_LEAD_SCORE;

/// Normalizes `raw` into a predicate for `field`.
///
/// `Ok(None)` means the field should be unfiltered: the input was blank, or a
/// number that did not parse.
pub fn build_predicate(
    field: FilterField,
    operator: Operator,
    raw: &RawValue,
) -> Result<Option<Predicate>, FilterError> {
    let class = field.class();
    if !class.supports(operator) {
        return Err(FilterError::UnsupportedOperator { field, operator });
    }

    match class {
        FieldClass::String => build_text(operator, raw),
        FieldClass::Number => build_number(field, operator, raw),
        FieldClass::Enum => build_enum(field, operator, raw),
        FieldClass::Date => build_date(field, operator, raw),
        FieldClass::Boolean => build_boolean(field, operator, raw),
    }
}

fn single(operator: Operator, raw: &RawValue) -> Result<&str, FilterError> {
    match raw {
        RawValue::Single(value) => Ok(value.trim()),
        _ => Err(FilterError::UnexpectedInput {
            operator,
            expected: "a single value",
        }),
    }
}

fn range(operator: Operator, raw: &RawValue) -> Result<(&str, &str), FilterError> {
    match raw {
        RawValue::Range { min, max } => Ok((min.trim(), max.trim())),
        _ => Err(FilterError::UnexpectedInput {
            operator,
            expected: "a min/max range",
        }),
    }
}

fn build_text(operator: Operator, raw: &RawValue) -> Result<Option<Predicate>, FilterError> {
    let value = single(operator, raw)?;
    if value.is_empty() {
        return Ok(None);
    }
    let value = value.to_string();
    let predicate = match operator {
        Operator::Contains => TextPredicate::Contains(value),
        _ => TextPredicate::Equals(value),
    };
    Ok(Some(Predicate::Text(predicate)))
}

/// Parses a numeric bound; anything that is not a number counts as absent.
///
/// Scores keep only their leading integer, so `"10.5"` filters on `10`.
fn parse_number(field: FilterField, raw: &str) -> Option<Number> {
    if raw.is_empty() {
        return None;
    }
    if field == FilterField::Score {
        return leading_integer(raw).map(Number::from);
    }
    if let Ok(integer) = raw.parse::<i64>() {
        return Some(Number::from(integer));
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}

fn leading_integer(raw: &str) -> Option<i64> {
    let end = raw
        .char_indices()
        .find(|&(idx, ch)| !(ch.is_ascii_digit() || (idx == 0 && matches!(ch, '-' | '+'))))
        .map_or(raw.len(), |(idx, _)| idx);
    raw[..end].parse().ok()
}

/// Bounds substituted for a missing side of a `between` range.
fn range_defaults(field: FilterField) -> (Number, Option<Number>) {
    match field {
        FilterField::Score => (Number::from(0), Some(Number::from(MAX_LEAD_SCORE))),
        _ => (Number::from(0), None),
    }
}

fn build_number(
    field: FilterField,
    operator: Operator,
    raw: &RawValue,
) -> Result<Option<Predicate>, FilterError> {
    if operator == Operator::Between {
        let (min, max) = range(operator, raw)?;
        let (min, max) = (parse_number(field, min), parse_number(field, max));
        if min.is_none() && max.is_none() {
            return Ok(None);
        }
        let (default_min, default_max) = range_defaults(field);
        return Ok(Some(Predicate::Number(NumberPredicate::Between(
            NumberRange {
                min: min.unwrap_or(default_min),
                max: max.or(default_max),
            },
        ))));
    }

    let Some(value) = parse_number(field, single(operator, raw)?) else {
        return Ok(None);
    };
    let predicate = match operator {
        Operator::GreaterThan => NumberPredicate::GreaterThan(value),
        Operator::LessThan => NumberPredicate::LessThan(value),
        _ => NumberPredicate::Equals(value),
    };
    Ok(Some(Predicate::Number(predicate)))
}

fn build_enum(
    field: FilterField,
    operator: Operator,
    raw: &RawValue,
) -> Result<Option<Predicate>, FilterError> {
    if operator == Operator::In {
        let values: Vec<&str> = match raw {
            RawValue::Many(values) => values.iter().map(|value| value.trim()).collect(),
            RawValue::Single(value) => vec![value.trim()],
            RawValue::Range { .. } => {
                return Err(FilterError::UnexpectedInput {
                    operator,
                    expected: "a list of values",
                });
            }
        };
        let values = values
            .into_iter()
            .filter(|value| !value.is_empty())
            .map(|value| EnumValue::parse(field, value))
            .collect::<Result<Vec<_>, _>>()?;
        if values.is_empty() {
            return Ok(None);
        }
        return Ok(Some(Predicate::Enum(EnumPredicate::In(values))));
    }

    let value = single(operator, raw)?;
    if value.is_empty() {
        return Ok(None);
    }
    let value = EnumValue::parse(field, value)?;
    Ok(Some(Predicate::Enum(EnumPredicate::Equals(value))))
}

fn parse_date(field: FilterField, raw: &str) -> Result<Option<NaiveDate>, FilterError> {
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| FilterError::InvalidValue {
            field,
            value: raw.to_string(),
        })
}

fn build_date(
    field: FilterField,
    operator: Operator,
    raw: &RawValue,
) -> Result<Option<Predicate>, FilterError> {
    if operator == Operator::Between {
        let (from, to) = range(operator, raw)?;
        let (from, to) = (parse_date(field, from)?, parse_date(field, to)?);
        if from.is_none() && to.is_none() {
            return Ok(None);
        }
        return Ok(Some(Predicate::Date(DatePredicate::Between(DateRange {
            from,
            to,
        }))));
    }

    let Some(date) = parse_date(field, single(operator, raw)?)? else {
        return Ok(None);
    };
    let predicate = match operator {
        Operator::Before => DatePredicate::Before(date),
        Operator::After => DatePredicate::After(date),
        _ => DatePredicate::On(date),
    };
    Ok(Some(Predicate::Date(predicate)))
}

fn build_boolean(
    field: FilterField,
    operator: Operator,
    raw: &RawValue,
) -> Result<Option<Predicate>, FilterError> {
    let value = single(operator, raw)?;
    if value.is_empty() {
        return Ok(None);
    }
    let flag = match value.to_ascii_lowercase().as_str() {
        "true" => true,
        "false" => false,
        _ => {
            return Err(FilterError::InvalidValue {
                field,
                value: value.to_string(),
            });
        }
    };
    Ok(Some(Predicate::Boolean(BooleanPredicate::Equals(flag))))
}

/// Filter edits staged in the panel until they are applied to the list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterForm {
    active: Filters,
    score_input: ScoreInput,
}

/// Score bounds as typed, before defaults fill in a missing side.
#[derive(Debug, Clone, Default, PartialEq)]
struct ScoreInput {
    min: String,
    max: String,
}

impl ScoreInput {
    /// Recovers typed bounds from an applied predicate; a bound equal to its
    /// default reads back as blank.
    fn from_filters(filters: &Filters) -> Self {
        let Some(RawValue::Range { min, max }) =
            filters.get(FilterField::Score).map(Predicate::to_raw)
        else {
            return Self::default();
        };
        let (default_min, default_max) = range_defaults(FilterField::Score);
        let typed = |bound: String, default: Option<Number>| {
            if default.is_some_and(|default| default.to_string() == bound) {
                String::new()
            } else {
                bound
            }
        };
        Self {
            min: typed(min, Some(default_min)),
            max: typed(max, default_max),
        }
    }
}

impl FilterForm {
    /// Opens the panel with the filters currently applied to the list.
    pub fn from_filters(filters: &Filters) -> Self {
        Self {
            active: filters.clone(),
            score_input: ScoreInput::from_filters(filters),
        }
    }

    /// Builds a predicate for `field`, replacing or removing the current one.
    pub fn set(
        &mut self,
        field: FilterField,
        operator: Operator,
        raw: &RawValue,
    ) -> Result<(), FilterError> {
        match build_predicate(field, operator, raw)? {
            Some(predicate) => {
                self.active.insert(field, predicate)?;
            }
            None => {
                self.active.remove(field);
            }
        }
        if field == FilterField::Score {
            self.score_input = match raw {
                RawValue::Range { min, max } if self.active.get(field).is_some() => ScoreInput {
                    min: min.trim().to_string(),
                    max: max.trim().to_string(),
                },
                _ => ScoreInput::default(),
            };
        }
        Ok(())
    }

    pub fn remove(&mut self, field: FilterField) {
        self.active.remove(field);
        if field == FilterField::Score {
            self.score_input = ScoreInput::default();
        }
    }

    pub fn clear(&mut self) {
        self.active = Filters::default();
        self.score_input = ScoreInput::default();
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn filters(&self) -> &Filters {
        &self.active
    }

    pub fn into_filters(self) -> Filters {
        self.active
    }

    /// Status dropdown; an empty selection means all statuses.
    pub fn set_status(&mut self, raw: &str) -> Result<(), FilterError> {
        self.set(FilterField::Status, Operator::Equals, &RawValue::single(raw))
    }

    /// Source dropdown; an empty selection means all sources.
    pub fn set_source(&mut self, raw: &str) -> Result<(), FilterError> {
        self.set(FilterField::Source, Operator::Equals, &RawValue::single(raw))
    }

    pub fn set_company(&mut self, raw: &str) -> Result<(), FilterError> {
        self.set(FilterField::Company, Operator::Contains, &RawValue::single(raw))
    }

    pub fn set_score_range(&mut self, min: &str, max: &str) -> Result<(), FilterError> {
        self.set(
            FilterField::Score,
            Operator::Between,
            &RawValue::range(min, max),
        )
    }

    /// Edits the lower score bound, keeping the upper bound as typed.
    pub fn set_score_min(&mut self, min: &str) -> Result<(), FilterError> {
        let max = self.score_input.max.clone();
        self.set_score_range(min, &max)
    }

    /// Edits the upper score bound, keeping the lower bound as typed.
    pub fn set_score_max(&mut self, max: &str) -> Result<(), FilterError> {
        let min = self.score_input.min.clone();
        self.set_score_range(&min, max)
    }
}
