//! Built-in recognizer table
//!
//! One entry per detection pattern. Several entity types have more than one
//! entry (a strong and a weak shape, or a cue-based and a gazetteer-based
//! pattern).

use scrub_core::EntityType;

use crate::gazetteer;
use crate::validators;

/// Post-match check on the matched slice.
#[derive(Clone, Copy)]
pub enum Validator {
    None,
    /// Passing raises the score to 1.0, failing drops the match.
    Checksum(fn(&str) -> bool),
    /// Passing keeps the base score, failing drops the match.
    Sanity(fn(&str) -> bool),
}

/// Uncompiled description of a recognizer.
#[derive(Clone)]
pub struct RecognizerSpec {
    pub entity: EntityType,
    pub name: &'static str,
    pub pattern: String,
    pub score: f64,
    /// Capture group whose span becomes the finding; 0 is the whole match.
    pub group: usize,
    pub validator: Validator,
    pub context: &'static [&'static str],
}

impl RecognizerSpec {
    fn new(entity: EntityType, name: &'static str, pattern: impl Into<String>, score: f64) -> Self {
        Self {
            entity,
            name,
            pattern: pattern.into(),
            score,
            group: 0,
            validator: Validator::None,
            context: &[],
        }
    }

    fn group(mut self, group: usize) -> Self {
        self.group = group;
        self
    }

    fn checksum(mut self, check: fn(&str) -> bool) -> Self {
        self.validator = Validator::Checksum(check);
        self
    }

    fn sanity(mut self, check: fn(&str) -> bool) -> Self {
        self.validator = Validator::Sanity(check);
        self
    }

    fn context(mut self, words: &'static [&'static str]) -> Self {
        self.context = words;
        self
    }
}

/// A capitalised name token. Must end lower-case so `<PERSON>` style
/// placeholders never match.
const NAME: &str = r"[A-Z][A-Za-z'’\-]*[a-z]";

const PHONE_CONTEXT: &[&str] = &[
    "phone", "telephone", "tel", "cell", "mobile", "call", "fax", "contact", "number",
];
const CARD_CONTEXT: &[&str] = &[
    "credit", "card", "visa", "mastercard", "amex", "discover", "cc", "debit",
];
const BANK_CONTEXT: &[&str] = &[
    "bank", "account", "acct", "routing", "checking", "savings", "deposit",
];
const SSN_CONTEXT: &[&str] = &["ssn", "ssns", "social", "security"];
const ITIN_CONTEXT: &[&str] = &["itin", "taxpayer", "tax"];
const CRYPTO_CONTEXT: &[&str] = &["wallet", "btc", "bitcoin", "crypto"];
const LICENSE_CONTEXT: &[&str] = &["driver", "drivers", "license", "licence", "dl", "dmv"];
const PASSPORT_CONTEXT: &[&str] = &["passport", "travel"];
const DEA_CONTEXT: &[&str] = &["dea"];
const IP_CONTEXT: &[&str] = &["ip", "ipv4", "ipv6", "address", "host", "server"];
const NHS_CONTEXT: &[&str] = &["nhs", "health", "patient"];
const NRIC_CONTEXT: &[&str] = &["nric", "fin", "identity"];
const ABN_CONTEXT: &[&str] = &["abn", "business"];
const ACN_CONTEXT: &[&str] = &["acn", "company"];
const TFN_CONTEXT: &[&str] = &["tfn", "tax"];
const MEDICARE_CONTEXT: &[&str] = &["medicare"];
const PAN_CONTEXT: &[&str] = &["pan", "permanent", "income"];
const AADHAAR_CONTEXT: &[&str] = &["aadhaar", "aadhar", "uidai"];
const VOTER_CONTEXT: &[&str] = &["voter", "epic", "election"];

/// Every recognizer the built-in analyzer runs.
pub fn builtin_recognizers() -> Vec<RecognizerSpec> {
    use EntityType::*;

    vec![
        // Personal
        RecognizerSpec::new(
            Person,
            "person_honorific",
            format!(
                r"\b(?:Mr|Mrs|Ms|Miss|Mx|Dr|Prof|Sir|Dame)\.?[ \t]+({name}(?:[ \t]+{name}){{0,2}})",
                name = NAME
            ),
            0.85,
        )
        .group(1),
        RecognizerSpec::new(
            Person,
            "person_cue",
            format!(
                r"(?i:\b(?:my name is|name\s*:|dear|regards,|sincerely,|signed,))\s+({name}(?:[ \t]+{name}){{0,2}})",
                name = NAME
            ),
            0.85,
        )
        .group(1),
        RecognizerSpec::new(
            EmailAddress,
            "email",
            r"\b[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(?:\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}\b",
            1.0,
        ),
        RecognizerSpec::new(
            PhoneNumber,
            "phone_nanp",
            r"(?:\+\d{1,3}[\s.\-]?)?(?:\(\d{3}\)|\b\d{3})[\s.\-]?\d{3}[\s.\-]?\d{4}\b",
            0.4,
        )
        .context(PHONE_CONTEXT),
        RecognizerSpec::new(
            PhoneNumber,
            "phone_international",
            r"\+\d{1,3}(?:[\s.\-]?\d{2,4}){2,4}\b",
            0.4,
        )
        .context(PHONE_CONTEXT),
        RecognizerSpec::new(
            Age,
            "age_years_old",
            r"(?i)\b(\d{1,3})\s*(?:years?|yrs?)[\s\-]*old\b",
            0.6,
        )
        .group(1),
        RecognizerSpec::new(Age, "age_cue", r"(?i)\b(?:age|aged)\s*:?\s*(\d{1,3})\b", 0.6)
            .group(1),
        RecognizerSpec::new(
            Nrp,
            "nrp_gazetteer",
            gazetteer::alternation(gazetteer::NRP_TERMS, true),
            0.85,
        ),
        // Financial
        RecognizerSpec::new(
            CreditCard,
            "credit_card",
            r"\b(?:4\d{3}|5[0-5]\d{2}|6\d{3}|1\d{3}|3\d{3})[\- ]?\d{3,4}[\- ]?\d{3,4}[\- ]?\d{3,5}\b",
            0.3,
        )
        .checksum(validators::luhn)
        .context(CARD_CONTEXT),
        RecognizerSpec::new(
            BankAccount,
            "bank_account_cue",
            r"(?i)\b(?:account|acct|a/c)(?:\s*(?:number|no\.?|num|#))?\s*[:#]?\s*(\d[\d\-]{4,22}\d)\b",
            0.6,
        )
        .group(1),
        RecognizerSpec::new(
            IbanCode,
            "iban",
            r"\b[A-Z]{2}\d{2}(?: ?[A-Z0-9]{4}){2,7}(?: ?[A-Z0-9]{1,3})?\b",
            0.5,
        )
        .checksum(validators::iban),
        RecognizerSpec::new(UsBankNumber, "us_bank_number", r"\b\d{8,17}\b", 0.05)
            .context(BANK_CONTEXT),
        RecognizerSpec::new(
            UsSsn,
            "us_ssn_delimited",
            r"\b\d{3}[\- .]\d{2}[\- .]\d{4}\b",
            0.5,
        )
        .sanity(validators::us_ssn)
        .context(SSN_CONTEXT),
        RecognizerSpec::new(UsSsn, "us_ssn_compact", r"\b\d{9}\b", 0.05)
            .sanity(validators::us_ssn)
            .context(SSN_CONTEXT),
        RecognizerSpec::new(
            UsItin,
            "us_itin",
            r"\b9\d{2}[\- ]?(?:5\d|6[0-5]|7\d|8[0-8]|9[0-2]|9[4-9])[\- ]?\d{4}\b",
            0.5,
        )
        .context(ITIN_CONTEXT),
        RecognizerSpec::new(
            Crypto,
            "bitcoin",
            r"\b(?:bc1[a-z0-9]{25,59}|[13][a-km-zA-HJ-NP-Z1-9]{25,34})\b",
            0.5,
        )
        .context(CRYPTO_CONTEXT),
        // Location
        RecognizerSpec::new(
            Location,
            "location_gazetteer",
            gazetteer::alternation(gazetteer::LOCATION_TERMS, false),
            0.85,
        ),
        RecognizerSpec::new(
            Location,
            "street_address",
            gazetteer::street_address_pattern(),
            0.7,
        ),
        RecognizerSpec::new(
            UsDriverLicense,
            "us_driver_license",
            r"\b[A-Z]\d{6,12}\b",
            0.1,
        )
        .context(LICENSE_CONTEXT),
        RecognizerSpec::new(UsPassport, "us_passport_numeric", r"\b\d{9}\b", 0.05)
            .context(PASSPORT_CONTEXT),
        RecognizerSpec::new(UsPassport, "us_passport_next_gen", r"\b[A-Z]\d{8}\b", 0.1)
            .context(PASSPORT_CONTEXT),
        // Medical
        RecognizerSpec::new(
            MedicalLicense,
            "medical_license_cue",
            r"(?i)\b(?:medical\s+licen[cs]e(?:\s*(?:no\.?|number|#))?|licen[cs]e\s+no\.?)\s*[:#]?\s*([A-Z0-9][A-Z0-9\-]{3,14})\b",
            0.6,
        )
        .group(1)
        .sanity(validators::has_digit),
        RecognizerSpec::new(
            UsDeaNumber,
            "us_dea",
            r"\b[ABCDEFGHJKLMPRSTUX][A-Z9]\d{7}\b",
            0.4,
        )
        .checksum(validators::us_dea)
        .context(DEA_CONTEXT),
        // Network
        RecognizerSpec::new(
            IpAddress,
            "ipv4",
            r"\b(?:(?:25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)\.){3}(?:25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)\b",
            0.6,
        )
        .sanity(validators::ip_address)
        .context(IP_CONTEXT),
        RecognizerSpec::new(
            IpAddress,
            "ipv6",
            // Starts at a hex group or "::" and ends on a hex group, so a
            // label colon ("IP:") or trailing colon stays outside the match.
            r"(?:^|[^0-9A-Fa-f])([0-9A-Fa-f]{1,4}(?::[0-9A-Fa-f]{0,4}){1,6}:[0-9A-Fa-f]{1,4}|::[0-9A-Fa-f]{1,4}(?::[0-9A-Fa-f]{1,4}){0,6})",
            0.6,
        )
        .group(1)
        .sanity(validators::ipv6_address)
        .context(IP_CONTEXT),
        // National IDs
        RecognizerSpec::new(UkNhs, "uk_nhs", r"\b\d{3}[\- ]?\d{3}[\- ]?\d{4}\b", 0.5)
            .checksum(validators::uk_nhs)
            .context(NHS_CONTEXT),
        RecognizerSpec::new(SgNricFin, "sg_nric_fin", r"(?i)\b[STFGM]\d{7}[A-Z]\b", 0.5)
            .context(NRIC_CONTEXT),
        RecognizerSpec::new(
            AuAbn,
            "au_abn",
            r"\b\d{2} ?\d{3} ?\d{3} ?\d{3}\b",
            0.1,
        )
        .checksum(validators::au_abn)
        .context(ABN_CONTEXT),
        RecognizerSpec::new(AuAcn, "au_acn", r"\b\d{3} ?\d{3} ?\d{3}\b", 0.1)
            .checksum(validators::au_acn)
            .context(ACN_CONTEXT),
        RecognizerSpec::new(AuTfn, "au_tfn", r"\b\d{3} ?\d{3} ?\d{3}\b", 0.1)
            .checksum(validators::au_tfn)
            .context(TFN_CONTEXT),
        RecognizerSpec::new(
            AuMedicare,
            "au_medicare",
            r"\b[2-6]\d{3} ?\d{5} ?\d\b",
            0.1,
        )
        .checksum(validators::au_medicare)
        .context(MEDICARE_CONTEXT),
        RecognizerSpec::new(
            InPan,
            "in_pan",
            r"\b[A-Z]{3}[ABCFGHLJPT][A-Z]\d{4}[A-Z]\b",
            0.6,
        )
        .context(PAN_CONTEXT),
        RecognizerSpec::new(
            InAadhaar,
            "in_aadhaar",
            r"\b[2-9]\d{3}[\- ]?\d{4}[\- ]?\d{4}\b",
            0.01,
        )
        .checksum(validators::in_aadhaar)
        .context(AADHAAR_CONTEXT),
        RecognizerSpec::new(InPassport, "in_passport", r"\b[A-Z]\d{7}\b", 0.1)
            .context(PASSPORT_CONTEXT),
        RecognizerSpec::new(InVoter, "in_voter", r"\b[A-Z]{3}\d{7}\b", 0.4)
            .context(VOTER_CONTEXT),
    ]
}
