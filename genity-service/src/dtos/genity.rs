use crate::models::Genity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Rejects an empty name. The raw value is checked, so `" "` passes.
fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("cannot be blank".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateGenityRequest {
    #[serde(default)]
    #[validate(
        custom(function = "validate_required"),
        length(max = 128, message = "the length must be no more than 128")
    )]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct UpdateGenityRequest {
    #[serde(default)]
    #[validate(
        custom(function = "validate_required"),
        length(max = 128, message = "the length must be no more than 128")
    )]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenityResponse {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Genity> for GenityResponse {
    fn from(genity: Genity) -> Self {
        Self {
            id: genity.id,
            name: genity.name,
            created_at: genity.created_at,
            updated_at: genity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(errors: &validator::ValidationErrors) -> Vec<String> {
        let mut codes: Vec<String> = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter().map(|e| e.code.to_string()))
            .collect();
        codes.sort();
        codes
    }

    #[test]
    fn create_request_validation() {
        let cases = [
            ("success", "test".to_string(), None),
            ("required", String::new(), Some("required")),
            ("whitespace is not blank", " ".to_string(), None),
            ("max length", "a".repeat(128), None),
            ("too long", "1234567890".repeat(13), Some("length")),
            ("multibyte counted by chars", "é".repeat(128), None),
        ];

        for (name, value, want) in cases {
            let result = CreateGenityRequest { name: value }.validate();
            match want {
                None => assert!(result.is_ok(), "{name}: {result:?}"),
                Some(code) => {
                    let errors = result.expect_err(name);
                    assert!(errors.field_errors().contains_key("name"), "{name}");
                    assert_eq!(codes(&errors), vec![code.to_string()], "{name}");
                }
            }
        }
    }

    #[test]
    fn update_request_validation() {
        assert!(UpdateGenityRequest { name: "test".into() }.validate().is_ok());
        assert!(UpdateGenityRequest { name: String::new() }.validate().is_err());
        assert!(UpdateGenityRequest { name: "x".repeat(129) }.validate().is_err());
    }

    #[test]
    fn missing_name_deserializes_to_empty_and_fails_validation() {
        let request: CreateGenityRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.name, "");
        assert!(request.validate().is_err());
    }
}
