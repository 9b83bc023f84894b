//! Attribute Schema

use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::io::Read;
use tracing::debug;

/// Semantic kind of a raw column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Identifying column (hospital name, patient id)
    Identifier,
    /// Calendar date stored as `YYYY-MM-DD`
    Date,
    /// Column restricted to a closed set of values
    Categorical { allowed_values: Vec<String> },
}

/// One declared column of the data model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSpec {
    /// Column key in the raw table
    pub column: String,
    /// Human-readable name used by the dashboard
    pub display_name: String,
    /// Semantic kind
    pub kind: AttributeKind,
}

impl AttributeSpec {
    pub fn identifier(column: &str, display_name: &str) -> Self {
        Self {
            column: column.to_string(),
            display_name: display_name.to_string(),
            kind: AttributeKind::Identifier,
        }
    }

    pub fn date(column: &str, display_name: &str) -> Self {
        Self {
            column: column.to_string(),
            display_name: display_name.to_string(),
            kind: AttributeKind::Date,
        }
    }

    pub fn categorical(column: &str, display_name: &str, allowed_values: &[&str]) -> Self {
        Self {
            column: column.to_string(),
            display_name: display_name.to_string(),
            kind: AttributeKind::Categorical {
                allowed_values: allowed_values.iter().map(|v| v.to_string()).collect(),
            },
        }
    }

    /// Allowed values when the column is categorical
    pub fn allowed_values(&self) -> Option<&[String]> {
        match &self.kind {
            AttributeKind::Categorical { allowed_values } => Some(allowed_values),
            _ => None,
        }
    }

    pub fn is_categorical(&self) -> bool {
        matches!(self.kind, AttributeKind::Categorical { .. })
    }
}

/// Numeric fields computed from pairs of raw dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DerivedField {
    /// date_of_diagnosis - date_of_birth
    AgeAtDiagnosis,
    /// date_of_death - date_of_birth
    AgeAtDeath,
    /// date_of_death - date_of_diagnosis
    SurvivalTime,
}

impl DerivedField {
    /// All derived fields, in display order
    pub const ALL: [DerivedField; 3] = [
        DerivedField::AgeAtDiagnosis,
        DerivedField::AgeAtDeath,
        DerivedField::SurvivalTime,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            DerivedField::AgeAtDiagnosis => "Age at diagnosis in years",
            DerivedField::AgeAtDeath => "Age at death in years",
            DerivedField::SurvivalTime => "Survival time in years",
        }
    }

    /// Get column key
    pub fn column(&self) -> &'static str {
        match self {
            DerivedField::AgeAtDiagnosis => "age_at_diagnosis",
            DerivedField::AgeAtDeath => "age_at_death",
            DerivedField::SurvivalTime => "survival_time",
        }
    }

    /// Look up a derived field by display name or column key
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.display_name() == name || f.column() == name)
    }
}

/// An attribute resolved against the data model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute<'a> {
    /// Declared categorical column
    Categorical(&'a AttributeSpec),
    /// Derived numeric field
    Continuous(DerivedField),
    /// Declared column that is neither categorical nor derived (identifiers, raw dates)
    Other(&'a AttributeSpec),
}

impl Attribute<'_> {
    pub fn display_name(&self) -> &str {
        match self {
            Attribute::Categorical(spec) | Attribute::Other(spec) => &spec.display_name,
            Attribute::Continuous(field) => field.display_name(),
        }
    }
}

/// Raw JSON shape of one data model entry
#[derive(Debug, Deserialize)]
#[serde(tag = "__type__")]
enum SeriesDocument {
    #[serde(rename = "SeriesDataModelUnique")]
    Unique { series_name: String },
    #[serde(rename = "SeriesDataModelDate")]
    Date { series_name: String },
    #[serde(rename = "SeriesDataModelCategorical")]
    Categorical {
        series_name: String,
        list_value: Vec<String>,
    },
}

/// Ordered set of attribute declarations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataModel {
    attributes: Vec<AttributeSpec>,
}

impl DataModel {
    /// Create a data model from declarations, keeping their order
    pub fn new(attributes: Vec<AttributeSpec>) -> Self {
        Self { attributes }
    }

    /// The data model shipped with the dashboard
    pub fn pag_default() -> Self {
        Self::new(vec![
            AttributeSpec::identifier("hospital_name", "Hospital name"),
            AttributeSpec::date("date_of_birth", "Date of birth"),
            AttributeSpec::date("date_of_diagnosis", "Date of diagnosis"),
            AttributeSpec::categorical("sex", "Sex", &["male", "female"]),
            AttributeSpec::categorical(
                "race",
                "Race",
                &[
                    "White",
                    "Black or African American",
                    "Asian",
                    "Hispanic or Latino",
                    "American Indian or Alaska Native",
                    "Native Hawaiian or Other Pacific Islander",
                ],
            ),
            AttributeSpec::categorical(
                "ethnicity",
                "Ethnicity",
                &["Not Hispanic or Latino", "Hispanic or Latino"],
            ),
            AttributeSpec::categorical(
                "socioeconomic",
                "Socioeconomic",
                &[
                    "Middle class",
                    "Lower middle class",
                    "Upper middle class",
                    "Lower class",
                    "Upper class",
                ],
            ),
            AttributeSpec::categorical(
                "rurality",
                "Rurality",
                &["Metropolitan", "Micropolitan", "Small town", "Rural"],
            ),
            AttributeSpec::date("date_of_death", "Date of death"),
        ])
    }

    /// Parse a data model document
    ///
    /// The document is a JSON object keyed by column. Key order is the
    /// declaration order.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let document: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)
            .map_err(|e| ModelError::InvalidDataModel(e.to_string()))?;
        Self::from_document(document)
    }

    /// Parse a data model document from a reader
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, ModelError> {
        let document: serde_json::Map<String, serde_json::Value> = serde_json::from_reader(reader)
            .map_err(|e| ModelError::InvalidDataModel(e.to_string()))?;
        Self::from_document(document)
    }

    fn from_document(document: serde_json::Map<String, serde_json::Value>) -> Result<Self, ModelError> {
        let mut attributes = Vec::with_capacity(document.len());

        for (column, value) in document {
            let entry: SeriesDocument = serde_json::from_value(value)
                .map_err(|e| ModelError::InvalidDataModel(format!("{column}: {e}")))?;

            let (display_name, kind) = match entry {
                SeriesDocument::Unique { series_name } => (series_name, AttributeKind::Identifier),
                SeriesDocument::Date { series_name } => (series_name, AttributeKind::Date),
                SeriesDocument::Categorical {
                    series_name,
                    list_value,
                } => (
                    series_name,
                    AttributeKind::Categorical {
                        allowed_values: list_value,
                    },
                ),
            };

            attributes.push(AttributeSpec {
                column,
                display_name,
                kind,
            });
        }

        debug!("Parsed data model with {} attributes", attributes.len());
        Ok(Self::new(attributes))
    }

    /// Declarations in order
    pub fn attributes(&self) -> &[AttributeSpec] {
        &self.attributes
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Find a declaration by column key
    pub fn spec(&self, column: &str) -> Option<&AttributeSpec> {
        self.attributes.iter().find(|a| a.column == column)
    }

    /// Categorical declarations in order
    pub fn categorical(&self) -> impl Iterator<Item = &AttributeSpec> {
        self.attributes.iter().filter(|a| a.is_categorical())
    }

    /// Resolve a requested attribute name
    ///
    /// Display names win over column keys; derived fields are matched last.
    pub fn resolve(&self, name: &str) -> Option<Attribute<'_>> {
        let spec = self
            .attributes
            .iter()
            .find(|a| a.display_name == name)
            .or_else(|| self.attributes.iter().find(|a| a.column == name));

        match spec {
            Some(spec) if spec.is_categorical() => Some(Attribute::Categorical(spec)),
            Some(spec) => Some(Attribute::Other(spec)),
            None => DerivedField::from_name(name).map(Attribute::Continuous),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "hospital_name": {"__type__": "SeriesDataModelUnique", "series_name": "Hospital name"},
        "sex": {"__type__": "SeriesDataModelCategorical", "series_name": "Sex", "list_value": ["male", "female"]},
        "date_of_birth": {"__type__": "SeriesDataModelDate", "series_name": "Date of birth"},
        "rurality": {"__type__": "SeriesDataModelCategorical", "series_name": "Rurality", "list_value": ["Rural"]}
    }"#;

    #[test]
    fn test_parse_keeps_declaration_order() {
        let model = DataModel::from_json_str(DOCUMENT).unwrap();
        let columns: Vec<_> = model.attributes().iter().map(|a| a.column.as_str()).collect();
        assert_eq!(columns, vec!["hospital_name", "sex", "date_of_birth", "rurality"]);
        assert_eq!(
            model.spec("sex").unwrap().allowed_values().unwrap(),
            &["male".to_string(), "female".to_string()]
        );
    }

    #[test]
    fn test_unknown_series_type_rejected() {
        let err = DataModel::from_json_str(
            r#"{"x": {"__type__": "SeriesDataModelFloat", "series_name": "X"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::InvalidDataModel(msg) if msg.starts_with("x:")));
    }

    #[test]
    fn test_resolve_by_display_name_and_column() {
        let model = DataModel::pag_default();
        assert!(matches!(model.resolve("Sex"), Some(Attribute::Categorical(s)) if s.column == "sex"));
        assert!(matches!(model.resolve("rurality"), Some(Attribute::Categorical(s)) if s.display_name == "Rurality"));
        assert!(matches!(model.resolve("Hospital name"), Some(Attribute::Other(_))));
        assert_eq!(
            model.resolve("Survival time in years"),
            Some(Attribute::Continuous(DerivedField::SurvivalTime))
        );
        assert_eq!(model.resolve("Blood type"), None);
    }

    #[test]
    fn test_default_model_matches_shipped_document() {
        let model = DataModel::pag_default();
        let names: Vec<_> = model.categorical().map(|a| a.display_name.as_str()).collect();
        assert_eq!(names, vec!["Sex", "Race", "Ethnicity", "Socioeconomic", "Rurality"]);
        assert_eq!(model.attributes().len(), 9);
    }
}
