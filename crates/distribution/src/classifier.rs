//! Attribute Classifier

use cohort_model::{DataModel, DerivedField};
use serde::Serialize;

/// Attribute display names split by chart kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttributeClasses {
    /// Categorical attributes in declaration order
    pub categorical: Vec<String>,
    /// Derived continuous attributes
    pub continuous: Vec<String>,
}

impl AttributeClasses {
    pub fn is_categorical(&self, name: &str) -> bool {
        self.categorical.iter().any(|n| n == name)
    }

    pub fn is_continuous(&self, name: &str) -> bool {
        self.continuous.iter().any(|n| n == name)
    }
}

/// Split the data model into categorical and continuous attributes
///
/// Continuous attributes are the derived fields, which the data model does
/// not declare. An empty model yields no attributes at all.
pub fn classify(model: &DataModel) -> AttributeClasses {
    if model.is_empty() {
        return AttributeClasses::default();
    }

    AttributeClasses {
        categorical: model.categorical().map(|a| a.display_name.clone()).collect(),
        continuous: DerivedField::ALL
            .iter()
            .map(|f| f.display_name().to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cohort_model::AttributeSpec;

    #[test]
    fn test_classify_default_model() {
        let classes = classify(&DataModel::pag_default());
        assert_eq!(
            classes.categorical,
            vec!["Sex", "Race", "Ethnicity", "Socioeconomic", "Rurality"]
        );
        assert_eq!(
            classes.continuous,
            vec![
                "Age at diagnosis in years",
                "Age at death in years",
                "Survival time in years"
            ]
        );
        assert!(classes.is_categorical("Sex"));
        assert!(!classes.is_categorical("Hospital name"));
        assert!(classes.is_continuous("Survival time in years"));
    }

    #[test]
    fn test_classify_follows_declaration_order() {
        let model = DataModel::new(vec![
            AttributeSpec::categorical("b", "Second", &["x"]),
            AttributeSpec::identifier("id", "Id"),
            AttributeSpec::categorical("a", "First", &["y"]),
        ]);
        assert_eq!(classify(&model).categorical, vec!["Second", "First"]);
    }

    #[test]
    fn test_classify_empty_model() {
        let classes = classify(&DataModel::default());
        assert!(classes.categorical.is_empty());
        assert!(classes.continuous.is_empty());
    }
}
