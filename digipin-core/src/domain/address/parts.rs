// digipin-core/src/domain/address/parts.rs

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Structured postal address as entered by the user. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressParts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
}

fn filled(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl AddressParts {
    /// Canonical comparable form: house number, street, area, district and
    /// pincode, trimmed, blanks skipped, joined by ", ". Case is preserved;
    /// the landmark is not part of the canonical form.
    pub fn normalize(&self) -> String {
        [
            &self.house_no,
            &self.street,
            &self.area,
            &self.district,
            &self.pincode,
        ]
        .into_iter()
        .filter_map(filled)
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// Number of non-blank fields, landmark included.
    pub fn filled_count(&self) -> usize {
        [
            &self.house_no,
            &self.street,
            &self.area,
            &self.district,
            &self.pincode,
            &self.landmark,
        ]
        .into_iter()
        .filter_map(filled)
        .count()
    }

    pub fn has_minimum_address(&self) -> bool {
        [&self.street, &self.area, &self.district]
            .into_iter()
            .any(|field| filled(field).is_some())
    }

    /// Submit gate applied by callers before a validation request is sent.
    pub fn ensure_submittable(&self) -> Result<(), DomainError> {
        if self.has_minimum_address() {
            Ok(())
        } else {
            Err(DomainError::IncompleteAddress(
                "street, area and district are all empty".to_string(),
            ))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(street: &str, area: &str, district: &str) -> AddressParts {
        AddressParts {
            street: Some(street.to_string()),
            area: Some(area.to_string()),
            district: Some(district.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_orders_trims_and_skips_blanks() {
        let address = AddressParts {
            house_no: Some("  Block A ".into()),
            street: Some("".into()),
            area: Some("Connaught Place".into()),
            district: Some("   ".into()),
            pincode: Some("110001".into()),
            landmark: Some("Near the metro".into()),
        };
        insta::assert_snapshot!(address.normalize(), @"Block A, Connaught Place, 110001");
    }

    #[test]
    fn test_normalize_preserves_case() {
        let address = parts("main STREET", "Sector 15", "New Delhi");
        assert_eq!(address.normalize(), "main STREET, Sector 15, New Delhi");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let normalized = parts("Main Street", "Sector 15", "New Delhi").normalize();
        let reparsed = AddressParts {
            street: Some(normalized.clone()),
            ..Default::default()
        };
        assert_eq!(reparsed.normalize(), normalized);
    }

    #[test]
    fn test_empty_address_normalizes_to_empty_string() {
        assert_eq!(AddressParts::default().normalize(), "");
        assert!(AddressParts::default().is_empty());
    }

    #[test]
    fn test_filled_count_includes_landmark() {
        let address = AddressParts {
            house_no: Some("12".into()),
            landmark: Some("Opposite the park".into()),
            pincode: Some(" ".into()),
            ..Default::default()
        };
        assert_eq!(address.filled_count(), 2);
    }

    #[test]
    fn test_minimum_address_requires_street_area_or_district() {
        assert!(parts("Main Street", "", "").has_minimum_address());
        assert!(parts("", "", "Mumbai").has_minimum_address());

        let house_only = AddressParts {
            house_no: Some("42".into()),
            pincode: Some("400001".into()),
            ..Default::default()
        };
        assert!(!house_only.has_minimum_address());
        assert!(matches!(
            house_only.ensure_submittable(),
            Err(DomainError::IncompleteAddress(_))
        ));
    }

    #[test]
    fn test_wire_shape_is_camel_case_without_nulls() {
        let address = AddressParts {
            house_no: Some("7".into()),
            district: Some("Mumbai".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&address).unwrap_or_default();
        assert_eq!(
            json,
            serde_json::json!({ "houseNo": "7", "district": "Mumbai" })
        );
    }
}
