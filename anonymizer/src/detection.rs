//! Name-based PII column detection.
//!
//! A column is flagged when its lowercased name contains any keyword of a
//! [`KeywordSet`] as a substring. Cell values are never inspected.
//!
//! Matching is deliberately loose: `"nickname"` matches `"name"`, and
//! `"statement"` matches `"state"`. Recall wins over precision here; callers
//! who need a tighter set can build their own [`KeywordSet`] and inject it
//! into a [`PiiDetector`].

use std::borrow::Cow;

use crate::dataset::Dataset;

/// Keywords flagged by the built-in [`KeywordSet`].
pub const DEFAULT_PII_KEYWORDS: &[&str] = &[
    // identity
    "name", "firstname", "lastname", "fullname", "surname", "middlename", "nickname",
    "initials", "alias",
    // birth
    "dob", "dateofbirth", "birthdate", "birthday", "age",
    // national identifiers
    "ssn", "socialsecuritynumber", "nin", "nationalid", "passport", "visa", "idnumber",
    "driverlicense", "licenseplate", "taxid", "itin", "pan", "aadhaar",
    // contact
    "email", "emailaddress", "phone", "phonenumber", "mobile", "cell", "fax", "contact",
    "telephone",
    // location
    "address", "homeaddress", "street", "city", "state", "province", "region", "country",
    "zip", "zipcode", "postalcode", "geolocation", "lat", "latitude", "longitude", "lng",
    // financial
    "creditcard", "ccnumber", "cardnumber", "cvc", "cvv", "accountnumber", "iban", "bic",
    "bankname", "bankaccount", "routingnumber", "sortcode",
    // authentication
    "username", "user", "userid", "user_id", "login", "password", "passcode", "pin",
    // biometrics
    "fingerprint", "retina", "iris", "voiceprint", "faceprint", "facial", "genetic", "dna",
    // online identifiers
    "ip", "ipaddress", "macaddress", "deviceid", "imei", "imsi", "browserfingerprint",
    "sessionid", "cookieid", "token",
    // employment and education
    "employer", "employerid", "jobtitle", "occupation", "salary", "school", "studentid",
    "education", "degree", "grades",
    // health
    "health", "diagnosis", "condition", "treatment", "medication", "insurance", "policy",
    "medicalrecord", "mrn", "npi",
    // demographics
    "ssnid", "socialinsurancenumber", "residency", "ethnicity", "maritalstatus", "religion",
    "gender", "race", "sexualorientation", "citizenship", "nationality", "militarystatus",
    // general privacy terms
    "pii", "sensitive", "confidential", "privateinfo",
];

/// An immutable, case-insensitive set of column-name keywords.
///
/// Keywords are lowercased on construction. Empty keywords are dropped since
/// they would match every column.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<String>", into = "Vec<String>"))]
pub struct KeywordSet {
    keywords: Vec<Cow<'static, str>>,
}

impl KeywordSet {
    /// Builds a keyword set from arbitrary strings.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set: Vec<Cow<'static, str>> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().to_lowercase();
            if keyword.is_empty() || set.iter().any(|existing| *existing == keyword) {
                continue;
            }
            set.push(Cow::Owned(keyword));
        }
        Self { keywords: set }
    }

    /// The built-in keyword list, [`DEFAULT_PII_KEYWORDS`].
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            keywords: DEFAULT_PII_KEYWORDS
                .iter()
                .map(|keyword| Cow::Borrowed(*keyword))
                .collect(),
        }
    }

    /// Returns the first keyword contained in `column`, ignoring case.
    pub fn matching(&self, column: &str) -> Option<&str> {
        let column = column.to_lowercase();
        self.keywords
            .iter()
            .map(AsRef::as_ref)
            .find(|keyword| column.contains(keyword))
    }

    /// Iterates the (lowercased) keywords.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.keywords.iter().map(AsRef::as_ref)
    }

    /// Number of keywords.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Returns `true` when no keyword is present.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl From<Vec<String>> for KeywordSet {
    fn from(keywords: Vec<String>) -> Self {
        Self::new(keywords)
    }
}

impl From<KeywordSet> for Vec<String> {
    fn from(set: KeywordSet) -> Self {
        set.keywords.into_iter().map(Cow::into_owned).collect()
    }
}

/// Flags column names that look like personally identifying information.
#[derive(Clone, Debug, Default)]
pub struct PiiDetector {
    keywords: KeywordSet,
}

impl PiiDetector {
    /// Creates a detector over the given keyword set.
    #[must_use]
    pub fn new(keywords: KeywordSet) -> Self {
        Self { keywords }
    }

    /// The keywords this detector matches against.
    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// Returns `true` if `column` contains any keyword.
    pub fn is_pii(&self, column: &str) -> bool {
        self.keywords.matching(column).is_some()
    }

    /// Returns the flagged names in input order, without duplicates.
    ///
    /// An empty result means no column matched; it is not an error.
    pub fn detect<I, S>(&self, columns: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flagged: Vec<String> = Vec::new();
        for column in columns {
            let column = column.as_ref();
            if self.is_pii(column) && !flagged.iter().any(|seen| seen == column) {
                flagged.push(column.to_owned());
            }
        }
        flagged
    }

    /// Runs [`PiiDetector::detect`] over a dataset's column names.
    pub fn detect_in(&self, dataset: &Dataset) -> Vec<String> {
        self.detect(dataset.column_names())
    }
}

/// Flags PII columns using the built-in keyword set.
pub fn detect_pii<I, S>(columns: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    PiiDetector::default().detect(columns)
}

#[cfg(test)]
mod tests {
    use super::{detect_pii, KeywordSet, PiiDetector, DEFAULT_PII_KEYWORDS};

    #[test]
    fn builtin_keywords_are_lowercase() {
        assert!(DEFAULT_PII_KEYWORDS
            .iter()
            .all(|keyword| keyword.to_lowercase() == *keyword));
        assert_eq!(KeywordSet::builtin().len(), DEFAULT_PII_KEYWORDS.len());
    }

    #[test]
    fn detection_ignores_case() {
        assert_eq!(detect_pii(["Email", "EMAIL_2", "notes"]), ["Email", "EMAIL_2"]);
    }

    #[test]
    fn substring_false_positives_are_kept() {
        let flagged = detect_pii(["statement", "nickname", "stage", "id"]);
        // "statement" contains "state", "nickname" contains "name", "stage" contains "age".
        assert_eq!(flagged, ["statement", "nickname", "stage"]);
    }

    #[test]
    fn custom_keywords_replace_builtin_set() {
        let detector = PiiDetector::new(KeywordSet::new(["Badge", "", "badge"]));
        assert_eq!(detector.keywords().len(), 1);
        assert_eq!(detector.detect(["BadgeNumber", "email"]), ["BadgeNumber"]);
    }

    #[test]
    fn duplicate_input_names_are_reported_once() {
        assert_eq!(detect_pii(["phone", "phone"]), ["phone"]);
    }

    #[test]
    fn matching_reports_first_keyword() {
        let set = KeywordSet::builtin();
        assert_eq!(set.matching("Home_Address"), Some("address"));
        assert_eq!(set.matching("notes"), None);
    }
}
