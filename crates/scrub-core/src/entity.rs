//! PII entity types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Entity types the service detects. Nothing outside this set is ever redacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    // Personal
    Person,
    EmailAddress,
    PhoneNumber,
    Age,
    Nrp,
    // Financial
    CreditCard,
    BankAccount,
    IbanCode,
    UsBankNumber,
    UsSsn,
    UsItin,
    Crypto,
    // Location
    Location,
    UsDriverLicense,
    UsPassport,
    // Medical
    MedicalLicense,
    UsDeaNumber,
    // Network
    IpAddress,
    // National IDs
    UkNhs,
    SgNricFin,
    AuAbn,
    AuAcn,
    AuTfn,
    AuMedicare,
    InPan,
    InAadhaar,
    InPassport,
    InVoter,
}

impl EntityType {
    pub const ALL: [EntityType; 28] = [
        EntityType::Person,
        EntityType::EmailAddress,
        EntityType::PhoneNumber,
        EntityType::Age,
        EntityType::Nrp,
        EntityType::CreditCard,
        EntityType::BankAccount,
        EntityType::IbanCode,
        EntityType::UsBankNumber,
        EntityType::UsSsn,
        EntityType::UsItin,
        EntityType::Crypto,
        EntityType::Location,
        EntityType::UsDriverLicense,
        EntityType::UsPassport,
        EntityType::MedicalLicense,
        EntityType::UsDeaNumber,
        EntityType::IpAddress,
        EntityType::UkNhs,
        EntityType::SgNricFin,
        EntityType::AuAbn,
        EntityType::AuAcn,
        EntityType::AuTfn,
        EntityType::AuMedicare,
        EntityType::InPan,
        EntityType::InAadhaar,
        EntityType::InPassport,
        EntityType::InVoter,
    ];

    /// Wire name, e.g. `EMAIL_ADDRESS`.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Person => "PERSON",
            EntityType::EmailAddress => "EMAIL_ADDRESS",
            EntityType::PhoneNumber => "PHONE_NUMBER",
            EntityType::Age => "AGE",
            EntityType::Nrp => "NRP",
            EntityType::CreditCard => "CREDIT_CARD",
            EntityType::BankAccount => "BANK_ACCOUNT",
            EntityType::IbanCode => "IBAN_CODE",
            EntityType::UsBankNumber => "US_BANK_NUMBER",
            EntityType::UsSsn => "US_SSN",
            EntityType::UsItin => "US_ITIN",
            EntityType::Crypto => "CRYPTO",
            EntityType::Location => "LOCATION",
            EntityType::UsDriverLicense => "US_DRIVER_LICENSE",
            EntityType::UsPassport => "US_PASSPORT",
            EntityType::MedicalLicense => "MEDICAL_LICENSE",
            EntityType::UsDeaNumber => "US_DEA_NUMBER",
            EntityType::IpAddress => "IP_ADDRESS",
            EntityType::UkNhs => "UK_NHS",
            EntityType::SgNricFin => "SG_NRIC_FIN",
            EntityType::AuAbn => "AU_ABN",
            EntityType::AuAcn => "AU_ACN",
            EntityType::AuTfn => "AU_TFN",
            EntityType::AuMedicare => "AU_MEDICARE",
            EntityType::InPan => "IN_PAN",
            EntityType::InAadhaar => "IN_AADHAAR",
            EntityType::InPassport => "IN_PASSPORT",
            EntityType::InVoter => "IN_VOTER",
        }
    }

    /// Default `replace` placeholder for this type.
    pub fn placeholder(&self) -> String {
        format!("<{}>", self.as_str())
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown entity type: {0}")]
pub struct UnknownEntityType(pub String);

impl FromStr for EntityType {
    type Err = UnknownEntityType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityType::ALL
            .iter()
            .copied()
            .find(|entity| entity.as_str() == s)
            .ok_or_else(|| UnknownEntityType(s.to_string()))
    }
}
