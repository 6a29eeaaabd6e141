//! Species form schema: raw input, normalization, and validation.
//!
//! Every field goes through the same ordered steps: trim, coerce empty to
//! "no value", then type/format check, then range/membership check. The
//! result is either a fully normalized [`SpeciesFields`] or a
//! [`SchemaErrors`] listing one violation per failing field.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::ValidateUrl;

use super::kingdom::Kingdom;
use super::SpeciesRecord;

// ---------------------------------------------------------------------------
// Rule names
// ---------------------------------------------------------------------------

pub const RULE_REQUIRED: &str = "required";
pub const RULE_TYPE: &str = "type";
pub const RULE_INTEGER: &str = "integer";
pub const RULE_MIN: &str = "min";
pub const RULE_MAX: &str = "max";
pub const RULE_URL: &str = "url";
pub const RULE_ENUM: &str = "enum";

/// Smallest accepted `total_population`.
pub const MIN_POPULATION: i64 = 1;

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// The editable fields of a species record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeciesField {
    ScientificName,
    CommonName,
    Kingdom,
    Description,
    TotalPopulation,
    Image,
}

impl SpeciesField {
    pub const ALL: [SpeciesField; 6] = [
        SpeciesField::ScientificName,
        SpeciesField::CommonName,
        SpeciesField::Kingdom,
        SpeciesField::Description,
        SpeciesField::TotalPopulation,
        SpeciesField::Image,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SpeciesField::ScientificName => "scientific_name",
            SpeciesField::CommonName => "common_name",
            SpeciesField::Kingdom => "kingdom",
            SpeciesField::Description => "description",
            SpeciesField::TotalPopulation => "total_population",
            SpeciesField::Image => "image",
        }
    }
}

impl fmt::Display for SpeciesField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Raw and normalized shapes
// ---------------------------------------------------------------------------

/// Loosely typed form entry, exactly as the user left it.
///
/// `total_population` accepts a JSON number or a string so that both typed
/// API clients and text inputs can submit it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDraft {
    pub scientific_name: Option<String>,
    pub common_name: Option<String>,
    pub kingdom: Option<String>,
    pub description: Option<String>,
    pub total_population: Option<Value>,
    pub image: Option<String>,
}

impl SpeciesDraft {
    /// A blank form with the kingdom selector preset to the default.
    pub fn with_defaults() -> Self {
        Self {
            kingdom: Some(Kingdom::default().to_string()),
            ..Self::default()
        }
    }

    /// Replace a single field with raw text entry. `None` clears it.
    pub fn set(&mut self, field: SpeciesField, value: Option<String>) {
        match field {
            SpeciesField::ScientificName => self.scientific_name = value,
            SpeciesField::CommonName => self.common_name = value,
            SpeciesField::Kingdom => self.kingdom = value,
            SpeciesField::Description => self.description = value,
            SpeciesField::TotalPopulation => self.total_population = value.map(Value::String),
            SpeciesField::Image => self.image = value,
        }
    }
}

impl From<&SpeciesRecord> for SpeciesDraft {
    fn from(record: &SpeciesRecord) -> Self {
        Self {
            scientific_name: Some(record.scientific_name.clone()),
            common_name: record.common_name.clone(),
            kingdom: Some(record.kingdom.to_string()),
            description: record.description.clone(),
            total_population: record.total_population.map(Value::from),
            image: record.image.clone(),
        }
    }
}

impl From<&SpeciesFields> for SpeciesDraft {
    fn from(fields: &SpeciesFields) -> Self {
        Self {
            scientific_name: Some(fields.scientific_name.clone()),
            common_name: fields.common_name.clone(),
            kingdom: Some(fields.kingdom.to_string()),
            description: fields.description.clone(),
            total_population: fields.total_population.map(Value::from),
            image: fields.image.clone(),
        }
    }
}

/// Normalized, typed species fields ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesFields {
    pub scientific_name: String,
    pub common_name: Option<String>,
    pub kingdom: Kingdom,
    pub description: Option<String>,
    pub total_population: Option<i64>,
    pub image: Option<String>,
}

// ---------------------------------------------------------------------------
// Violations
// ---------------------------------------------------------------------------

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: SpeciesField,
    pub rule: &'static str,
    pub message: String,
}

impl FieldViolation {
    fn new(field: SpeciesField, rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            rule,
            message: message.into(),
        }
    }
}

/// Every violation found in one draft, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("Invalid species fields: {}", field_list(.violations))]
pub struct SchemaErrors {
    pub violations: Vec<FieldViolation>,
}

impl SchemaErrors {
    pub fn for_field(&self, field: SpeciesField) -> Option<&FieldViolation> {
        self.violations.iter().find(|v| v.field == field)
    }
}

fn field_list(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Normalize and validate a whole draft.
pub fn validate_species(draft: &SpeciesDraft) -> Result<SpeciesFields, SchemaErrors> {
    let mut violations = Vec::new();

    let scientific_name = scientific_name(draft.scientific_name.as_deref())
        .map_err(|v| violations.push(v))
        .ok();
    let kingdom = kingdom(draft.kingdom.as_deref())
        .map_err(|v| violations.push(v))
        .ok();
    let total_population = total_population(draft.total_population.as_ref())
        .map_err(|v| violations.push(v))
        .ok();
    let image = image(draft.image.as_deref())
        .map_err(|v| violations.push(v))
        .ok();

    match (scientific_name, kingdom, total_population, image) {
        (Some(scientific_name), Some(kingdom), Some(total_population), Some(image)) => {
            Ok(SpeciesFields {
                scientific_name,
                common_name: optional_text(draft.common_name.as_deref()),
                kingdom,
                description: optional_text(draft.description.as_deref()),
                total_population,
                image,
            })
        }
        _ => Err(SchemaErrors { violations }),
    }
}

/// Validate one field in isolation, for live feedback while typing.
pub fn validate_field(draft: &SpeciesDraft, field: SpeciesField) -> Option<FieldViolation> {
    match field {
        SpeciesField::ScientificName => scientific_name(draft.scientific_name.as_deref()).err(),
        SpeciesField::CommonName | SpeciesField::Description => None,
        SpeciesField::Kingdom => kingdom(draft.kingdom.as_deref()).err(),
        SpeciesField::TotalPopulation => total_population(draft.total_population.as_ref()).err(),
        SpeciesField::Image => image(draft.image.as_deref()).err(),
    }
}

/// Trim, then collapse empty input to `None`.
fn trimmed(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn optional_text(raw: Option<&str>) -> Option<String> {
    trimmed(raw).map(str::to_string)
}

fn scientific_name(raw: Option<&str>) -> Result<String, FieldViolation> {
    trimmed(raw).map(str::to_string).ok_or_else(|| {
        FieldViolation::new(
            SpeciesField::ScientificName,
            RULE_REQUIRED,
            "Scientific name is required",
        )
    })
}

fn kingdom(raw: Option<&str>) -> Result<Kingdom, FieldViolation> {
    match trimmed(raw) {
        None => Ok(Kingdom::default()),
        Some(name) => name.parse().map_err(|_| {
            FieldViolation::new(
                SpeciesField::Kingdom,
                RULE_ENUM,
                format!("Kingdom must be one of: {}", Kingdom::names()),
            )
        }),
    }
}

fn total_population(raw: Option<&Value>) -> Result<Option<i64>, FieldViolation> {
    let value = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i,
            (None, Some(f)) => whole_number(f)?,
            (None, None) => return Err(population_not_a_number()),
        },
        Some(Value::String(s)) => {
            let Some(s) = trimmed(Some(s.as_str())) else {
                return Ok(None);
            };
            match s.parse::<i64>() {
                Ok(i) => i,
                Err(_) => whole_number(s.parse::<f64>().map_err(|_| population_not_a_number())?)?,
            }
        }
        Some(_) => return Err(population_not_a_number()),
    };

    if value < MIN_POPULATION {
        return Err(population_too_small());
    }
    Ok(Some(value))
}

fn population_not_a_number() -> FieldViolation {
    FieldViolation::new(
        SpeciesField::TotalPopulation,
        RULE_TYPE,
        "Total population must be a number",
    )
}

fn population_too_small() -> FieldViolation {
    FieldViolation::new(
        SpeciesField::TotalPopulation,
        RULE_MIN,
        format!("Total population must be at least {MIN_POPULATION}"),
    )
}

/// Convert a float that did not fit `i64` parsing into a population.
///
/// Fractions fail `integer`; whole values outside `i64` fail `min` or `max`
/// depending on their sign.
fn whole_number(f: f64) -> Result<i64, FieldViolation> {
    let field = SpeciesField::TotalPopulation;
    if !f.is_finite() {
        return Err(population_not_a_number());
    }
    if f.fract() != 0.0 {
        return Err(FieldViolation::new(
            field,
            RULE_INTEGER,
            "Total population must be a whole number",
        ));
    }
    if f < MIN_POPULATION as f64 {
        return Err(population_too_small());
    }
    if f >= i64::MAX as f64 {
        return Err(FieldViolation::new(
            field,
            RULE_MAX,
            format!("Total population must be at most {}", i64::MAX),
        ));
    }
    Ok(f as i64)
}

fn image(raw: Option<&str>) -> Result<Option<String>, FieldViolation> {
    let Some(url) = trimmed(raw).map(str::to_string) else {
        return Ok(None);
    };
    if url.validate_url() {
        Ok(Some(url))
    } else {
        Err(FieldViolation::new(
            SpeciesField::Image,
            RULE_URL,
            "Image must be a valid URL",
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
