//! Data models.

use std::fmt;

use serde::Serialize;

use crate::errors::VehicleInfoError;

/// Shortest accepted RC number, in characters
pub const MIN_RC_LEN: usize = 6;
/// Longest accepted RC number, in characters
pub const MAX_RC_LEN: usize = 12;

/// Note attached to a successful lookup
pub const LOOKUP_NOTE: &str = "Vehicle details fetched from upstream registry";
/// Note attached to a debug preview
pub const DEBUG_NOTE: &str = "Debug mode: raw HTML preview";

/// Vehicle registration certificate (RC) number
///
/// Always trimmed and uppercase. The raw input must be between
/// [`MIN_RC_LEN`] and [`MAX_RC_LEN`] characters long.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistrationNumber(String);

impl TryFrom<&str> for RegistrationNumber {
    type Error = VehicleInfoError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // Bounds apply to the value as received, before trimming
        let len = value.chars().count();
        if !(MIN_RC_LEN..=MAX_RC_LEN).contains(&len) {
            return Err(VehicleInfoError::InvalidRegistration(format!(
                "expected {} to {} characters, got {}",
                MIN_RC_LEN, MAX_RC_LEN, len
            )));
        }
        Ok(Self(normalize(value)))
    }
}

impl RegistrationNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegistrationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trim and uppercase a raw RC number
pub fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Fields scraped from the registry page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    OwnerName,
    FatherName,
    OwnerSerialNo,
    ModelName,
    MakerModel,
    VehicleClass,
    FuelType,
    FuelNorms,
    RegDate,
    InsuranceCompany,
    InsuranceNo,
    InsuranceExpiry,
    InsuranceUpto,
    FitnessUpto,
    TaxUpto,
    PucNo,
    PucUpto,
    FinancierName,
    Rto,
    Address,
    City,
    Phone,
}

impl Field {
    /// Every field, in record order
    pub const ALL: [Field; 22] = [
        Field::OwnerName,
        Field::FatherName,
        Field::OwnerSerialNo,
        Field::ModelName,
        Field::MakerModel,
        Field::VehicleClass,
        Field::FuelType,
        Field::FuelNorms,
        Field::RegDate,
        Field::InsuranceCompany,
        Field::InsuranceNo,
        Field::InsuranceExpiry,
        Field::InsuranceUpto,
        Field::FitnessUpto,
        Field::TaxUpto,
        Field::PucNo,
        Field::PucUpto,
        Field::FinancierName,
        Field::Rto,
        Field::Address,
        Field::City,
        Field::Phone,
    ];

    /// Label text shown next to the value on the registry page
    ///
    /// Matched as a substring of the marker element's text.
    pub fn label(self) -> &'static str {
        match self {
            Field::OwnerName => "Owner Name",
            Field::FatherName => "Father's Name",
            Field::OwnerSerialNo => "Owner Serial No",
            Field::ModelName => "Model Name",
            Field::MakerModel => "Maker Model",
            Field::VehicleClass => "Vehicle Class",
            Field::FuelType => "Fuel Type",
            Field::FuelNorms => "Fuel Norms",
            Field::RegDate => "Registration Date",
            Field::InsuranceCompany => "Insurance Company",
            Field::InsuranceNo => "Insurance No",
            Field::InsuranceExpiry => "Insurance Expiry",
            Field::InsuranceUpto => "Insurance Upto",
            Field::FitnessUpto => "Fitness Upto",
            Field::TaxUpto => "Tax Upto",
            Field::PucNo => "PUC No",
            Field::PucUpto => "PUC Upto",
            Field::FinancierName => "Financier Name",
            Field::Rto => "Registered RTO",
            Field::Address => "Address",
            Field::City => "City Name",
            Field::Phone => "Phone",
        }
    }
}

/// Vehicle details, None where the page carried no value
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct VehicleDetails {
    pub owner_name: Option<String>,
    pub father_name: Option<String>,
    pub owner_serial_no: Option<String>,
    pub model_name: Option<String>,
    pub maker_model: Option<String>,
    pub vehicle_class: Option<String>,
    pub fuel_type: Option<String>,
    pub fuel_norms: Option<String>,
    pub reg_date: Option<String>,
    pub insurance_company: Option<String>,
    pub insurance_no: Option<String>,
    pub insurance_expiry: Option<String>,
    pub insurance_upto: Option<String>,
    pub fitness_upto: Option<String>,
    pub tax_upto: Option<String>,
    pub puc_no: Option<String>,
    pub puc_upto: Option<String>,
    pub financier_name: Option<String>,
    pub rto: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
}

impl VehicleDetails {
    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::OwnerName => &self.owner_name,
            Field::FatherName => &self.father_name,
            Field::OwnerSerialNo => &self.owner_serial_no,
            Field::ModelName => &self.model_name,
            Field::MakerModel => &self.maker_model,
            Field::VehicleClass => &self.vehicle_class,
            Field::FuelType => &self.fuel_type,
            Field::FuelNorms => &self.fuel_norms,
            Field::RegDate => &self.reg_date,
            Field::InsuranceCompany => &self.insurance_company,
            Field::InsuranceNo => &self.insurance_no,
            Field::InsuranceExpiry => &self.insurance_expiry,
            Field::InsuranceUpto => &self.insurance_upto,
            Field::FitnessUpto => &self.fitness_upto,
            Field::TaxUpto => &self.tax_upto,
            Field::PucNo => &self.puc_no,
            Field::PucUpto => &self.puc_upto,
            Field::FinancierName => &self.financier_name,
            Field::Rto => &self.rto,
            Field::Address => &self.address,
            Field::City => &self.city,
            Field::Phone => &self.phone,
        };
        value.as_deref()
    }

    pub fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::OwnerName => &mut self.owner_name,
            Field::FatherName => &mut self.father_name,
            Field::OwnerSerialNo => &mut self.owner_serial_no,
            Field::ModelName => &mut self.model_name,
            Field::MakerModel => &mut self.maker_model,
            Field::VehicleClass => &mut self.vehicle_class,
            Field::FuelType => &mut self.fuel_type,
            Field::FuelNorms => &mut self.fuel_norms,
            Field::RegDate => &mut self.reg_date,
            Field::InsuranceCompany => &mut self.insurance_company,
            Field::InsuranceNo => &mut self.insurance_no,
            Field::InsuranceExpiry => &mut self.insurance_expiry,
            Field::InsuranceUpto => &mut self.insurance_upto,
            Field::FitnessUpto => &mut self.fitness_upto,
            Field::TaxUpto => &mut self.tax_upto,
            Field::PucNo => &mut self.puc_no,
            Field::PucUpto => &mut self.puc_upto,
            Field::FinancierName => &mut self.financier_name,
            Field::Rto => &mut self.rto,
            Field::Address => &mut self.address,
            Field::City => &mut self.city,
            Field::Phone => &mut self.phone,
        }
    }

    /// True when no field carries a value
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|&field| self.get(field).is_none())
    }
}

/// Lookup result returned by the `/vehicle` endpoint
///
/// Every key is serialized, absent values as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleRecord {
    pub ok: bool,
    /// Normalized RC number the lookup was made for
    pub rc: String,
    #[serde(flatten)]
    pub details: VehicleDetails,
    /// Visible page text, debug lookups only
    pub html_preview: Option<String>,
    pub note: Option<String>,
    pub error: Option<String>,
}

impl VehicleRecord {
    /// Record for a page that yielded at least one value
    pub fn found(rc: &RegistrationNumber, details: VehicleDetails) -> Self {
        Self {
            ok: true,
            rc: rc.to_string(),
            details,
            html_preview: None,
            note: Some(LOOKUP_NOTE.to_string()),
            error: None,
        }
    }

    pub fn preview(rc: &RegistrationNumber, preview: String) -> Self {
        Self {
            ok: true,
            rc: rc.to_string(),
            details: VehicleDetails::default(),
            html_preview: Some(preview),
            note: Some(DEBUG_NOTE.to_string()),
            error: None,
        }
    }

    /// Failed lookup; `rc` is echoed as given, normalized
    pub fn failure(rc: &str, error: &VehicleInfoError) -> Self {
        Self {
            ok: false,
            rc: normalize(rc),
            details: VehicleDetails::default(),
            html_preview: None,
            note: None,
            error: Some(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_is_normalized() {
        let rc = RegistrationNumber::try_from("  mh12ab1234 ").unwrap();
        assert_eq!(rc.as_str(), "MH12AB1234");
        assert_eq!(rc.to_string(), "MH12AB1234");
    }

    #[test]
    fn test_registration_length_bounds() {
        assert!(RegistrationNumber::try_from("AB123").is_err());
        assert!(RegistrationNumber::try_from("AB1234").is_ok());
        assert!(RegistrationNumber::try_from("AB1234567890").is_ok());
        assert!(RegistrationNumber::try_from("AB12345678901").is_err());
    }

    #[test]
    fn test_registration_length_counts_surrounding_whitespace() {
        let rc = RegistrationNumber::try_from("  ab12  ").unwrap();
        assert_eq!(rc.as_str(), "AB12");

        let err = RegistrationNumber::try_from("   MH12AB123456   ").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid RC number: expected 6 to 12 characters, got 18"
        );
    }

    #[test]
    fn test_registration_error_message() {
        let err = RegistrationNumber::try_from("AB1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid RC number: expected 6 to 12 characters, got 3"
        );
    }

    #[test]
    fn test_labels_are_unique() {
        for (i, a) in Field::ALL.iter().enumerate() {
            for b in &Field::ALL[i + 1..] {
                assert_ne!(a.label(), b.label());
            }
        }
    }

    #[test]
    fn test_slot_mut_and_get_agree() {
        let mut details = VehicleDetails::default();
        assert!(details.is_empty());

        for field in Field::ALL {
            *details.slot_mut(field) = Some(field.label().to_string());
        }
        for field in Field::ALL {
            assert_eq!(details.get(field), Some(field.label()));
        }
        assert!(!details.is_empty());
    }

    #[test]
    fn test_record_serializes_flat_with_nulls() {
        let rc = RegistrationNumber::try_from("dl01ab1234").unwrap();
        let details = VehicleDetails {
            owner_name: Some("JOHN DOE".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(VehicleRecord::found(&rc, details)).unwrap();

        assert_eq!(value["ok"], true);
        assert_eq!(value["rc"], "DL01AB1234");
        assert_eq!(value["owner_name"], "JOHN DOE");
        assert!(value["phone"].is_null());
        assert!(value["error"].is_null());
        assert_eq!(value["note"], LOOKUP_NOTE);

        // 2 header keys, 22 fields, preview, note, error
        assert_eq!(value.as_object().unwrap().len(), 27);
    }

    #[test]
    fn test_failure_record() {
        let record = VehicleRecord::failure(" ka05x9999 ", &VehicleInfoError::NoRecordsFound);
        assert!(!record.ok);
        assert_eq!(record.rc, "KA05X9999");
        assert_eq!(
            record.error.as_deref(),
            Some("No records found for this RC number")
        );
        assert!(record.details.is_empty());
    }
}
