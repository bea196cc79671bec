//! Validation of candidate payloads against the configured jump contract.

use crate::contract::violations::ContractViolation;
use crate::core::Payload;
use serde_json::Value;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Reference payload shape that direct transitions are expected to honor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JumpContract {
    template: Payload,
}

impl JumpContract {
    pub fn new(template: Payload) -> Self {
        Self { template }
    }

    /// The payload `jumpIn` hooks are seeded from.
    pub fn template(&self) -> &Payload {
        &self.template
    }

    /// Check a candidate, accumulating ALL violations.
    ///
    /// Every contract key must be present in the candidate. When the contract
    /// value is not `null`, the candidate value must have the same JSON type.
    pub fn check(&self, candidate: &Payload) -> Validation<(), NonEmptyVec<ContractViolation>> {
        let checks: Vec<Validation<(), NonEmptyVec<ContractViolation>>> = self
            .template
            .iter()
            .map(|(field, expected)| check_field(field, expected, candidate.get(field)))
            .collect();

        Validation::all_vec(checks).map(|_| ())
    }

    /// Collected violations, empty when the candidate conforms.
    pub fn violations(&self, candidate: &Payload) -> Vec<ContractViolation> {
        match self.check(candidate) {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }
}

fn check_field(
    field: &str,
    expected: &Value,
    found: Option<&Value>,
) -> Validation<(), NonEmptyVec<ContractViolation>> {
    match found {
        None => Validation::fail(ContractViolation::MissingField {
            field: field.to_string(),
        }),
        Some(value) if !expected.is_null() && type_name(expected) != type_name(value) => {
            Validation::fail(ContractViolation::TypeMismatch {
                field: field.to_string(),
                expected: type_name(expected),
                found: type_name(value),
            })
        }
        Some(_) => Validation::success(()),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn contract() -> JumpContract {
        JumpContract::new(
            Payload::try_from(json!({ "user": "", "step": 0, "extra": null })).unwrap(),
        )
    }

    #[test]
    fn conforming_payload_passes() {
        let candidate =
            Payload::try_from(json!({ "user": "ada", "step": 3, "extra": [1], "more": true }))
                .unwrap();

        assert!(contract().check(&candidate).is_success());
        assert!(contract().violations(&candidate).is_empty());
    }

    #[test]
    fn check_accumulates_all_violations() {
        let candidate = Payload::try_from(json!({ "step": "three" })).unwrap();

        let violations = contract().violations(&candidate);
        assert_eq!(violations.len(), 3);
        assert!(violations.contains(&ContractViolation::MissingField {
            field: "user".to_string()
        }));
        assert!(violations.contains(&ContractViolation::MissingField {
            field: "extra".to_string()
        }));
        assert!(violations.contains(&ContractViolation::TypeMismatch {
            field: "step".to_string(),
            expected: "a number",
            found: "a string",
        }));
    }

    #[test]
    fn null_contract_values_accept_any_type() {
        let contract = JumpContract::new(Payload::new().with("anything", json!(null)));
        let candidate = Payload::new().with("anything", json!({ "deep": true }));

        assert!(contract.check(&candidate).is_success());
    }

    #[test]
    fn empty_contract_accepts_everything() {
        let contract = JumpContract::default();
        assert!(contract.check(&Payload::new()).is_success());
    }
}
