//! Veterinary clinic choices and the service-code set.

use serde::Serialize;

use crate::enums::string_enum;
use crate::error::CoreError;

/// Top-rated clinics shown on the home page.
pub const HOME_TOP_VETERINARIANS: i64 = 3;

/// Reviews shown on a clinic detail page.
pub const VETERINARIAN_DETAIL_REVIEWS: i64 = 10;

string_enum! {
    pub enum ClinicType ("clinic_type") {
        Clinic => ("clinic", "Veterinary clinic"),
        Hospital => ("hospital", "Veterinary hospital"),
        Mobile => ("mobile", "Mobile vet"),
        Specialized => ("specialized", "Specialized clinic"),
    }
}

string_enum! {
    /// A service a clinic offers.
    pub enum ServiceCode ("services") {
        General => ("general", "General check-up"),
        Surgery => ("surgery", "Surgery"),
        Dental => ("dental", "Dentistry"),
        Dermatology => ("dermatology", "Dermatology"),
        Ophthalmology => ("ophthalmology", "Ophthalmology"),
        Emergency => ("emergency", "Emergency care"),
        Vaccination => ("vaccination", "Vaccination"),
        Grooming => ("grooming", "Grooming"),
        Radiology => ("radiology", "X-ray"),
        Laboratory => ("laboratory", "Laboratory"),
        Boarding => ("boarding", "Boarding"),
        Training => ("training", "Training"),
    }
}

/// The services a clinic offers, deduplicated, in declaration order.
///
/// Stored as a `TEXT[]` of codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ServiceSet(Vec<ServiceCode>);

impl ServiceSet {
    pub fn new(codes: impl IntoIterator<Item = ServiceCode>) -> Self {
        let mut set: Vec<ServiceCode> = Vec::new();
        for code in codes {
            if !set.contains(&code) {
                set.push(code);
            }
        }
        set.sort_by_key(|c| ServiceCode::ALL.iter().position(|x| x == c));
        Self(set)
    }

    /// Parse raw codes, failing on the first unknown one.
    pub fn parse<S: AsRef<str>>(raw: &[S]) -> Result<Self, CoreError> {
        let codes = raw
            .iter()
            .map(|s| s.as_ref().trim().parse::<ServiceCode>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(codes))
    }

    pub fn contains(&self, code: ServiceCode) -> bool {
        self.0.contains(&code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceCode> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Text codes for binding to a `TEXT[]` column.
    pub fn codes(&self) -> Vec<String> {
        self.0.iter().map(|c| c.as_str().to_string()).collect()
    }

    /// Display labels, in order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.0.iter().map(|c| c.label()).collect()
    }
}

impl TryFrom<Vec<String>> for ServiceSet {
    type Error = CoreError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl<'de> serde::Deserialize<'de> for ServiceSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let codes = Vec::<ServiceCode>::deserialize(deserializer)?;
        Ok(Self::new(codes))
    }
}
