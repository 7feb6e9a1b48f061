//! # Verifiable Credential structure
//!
//! Defines the [`VerifiableCredential`] envelope following the W3C VC Data
//! Model. The envelope is parsed leniently: unknown members (`proof`,
//! `credentialStatus`, ...) are ignored because verification already happened
//! upstream and the trust core only reads types and subject attributes.
//!
//! ## Required members
//!
//! Only `type` and `credentialSubject` decide whether a JSON object is a
//! credential. `@context`, `id`, `issuer`, `issuanceDate` and
//! `expirationDate` are informational: a missing or unreadable value becomes
//! `None` (or the default context) instead of rejecting the credential, so one
//! loosely formed credential cannot invalidate the others presented with it.
//!
//! ## Type names
//!
//! Entries of `type` are compared as fully qualified names
//! (`<namespace><shortName>`). Subject attributes may be keyed either by the
//! qualified name or by the compact short name; [`CredentialSubject::attribute`]
//! accepts both, qualified first.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use fx_core::qualify;

/// A W3C Verifiable Credential as presented in a claims context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiableCredential {
    /// JSON-LD context URIs.
    #[serde(rename = "@context", default, deserialize_with = "lenient_or_default")]
    pub context: ContextValue,

    /// Credential identifier.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// Credential type(s), in presentation order.
    #[serde(rename = "type")]
    pub credential_type: CredentialTypeValue,

    /// The issuer, as a URI or an object with an `id`.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub issuer: Option<Issuer>,

    /// When the credential was issued (UTC).
    #[serde(
        rename = "issuanceDate",
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub issuance_date: Option<DateTime<Utc>>,

    /// Optional expiration date (UTC).
    #[serde(
        rename = "expirationDate",
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration_date: Option<DateTime<Utc>>,

    /// One or more credential subjects.
    #[serde(rename = "credentialSubject")]
    pub credential_subject: SubjectValue,
}

/// Read an informational member, yielding `None` if it has an unexpected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Read an `xsd:dateTime`. A value without offset is taken as UTC; anything
/// unparseable is `None`.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = lenient::<D, String>(deserializer)? else {
        return Ok(None);
    };
    Ok(parse_datetime(&raw))
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// JSON-LD `@context` value — either a single string or an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    /// Single context URI string.
    Single(String),
    /// Array of context URI strings or objects.
    Array(Vec<serde_json::Value>),
}

impl Default for ContextValue {
    fn default() -> Self {
        Self::Array(vec![serde_json::Value::String(
            "https://www.w3.org/2018/credentials/v1".to_string(),
        )])
    }
}

/// Credential `type` value — either a single string or an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CredentialTypeValue {
    /// Single type string.
    Single(String),
    /// Array of type strings.
    Array(Vec<String>),
}

impl CredentialTypeValue {
    /// The declared types as a slice, in presentation order.
    pub fn as_slice(&self) -> &[String] {
        match self {
            CredentialTypeValue::Single(s) => std::slice::from_ref(s),
            CredentialTypeValue::Array(arr) => arr,
        }
    }
}

/// Credential `issuer` value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Issuer {
    /// Issuer given as a bare URI.
    Uri(String),
    /// Issuer given as an object; only the `id` member is retained.
    Object {
        /// The issuer URI.
        id: String,
    },
}

impl Issuer {
    /// The issuer URI.
    pub fn id(&self) -> &str {
        match self {
            Issuer::Uri(id) | Issuer::Object { id } => id,
        }
    }
}

/// `credentialSubject` value — a single subject or an array of subjects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubjectValue {
    /// A single subject object.
    Single(Box<CredentialSubject>),
    /// An array of subject objects.
    Array(Vec<CredentialSubject>),
}

impl SubjectValue {
    /// The subjects as a slice, in presentation order.
    pub fn as_slice(&self) -> &[CredentialSubject] {
        match self {
            SubjectValue::Single(s) => std::slice::from_ref(s.as_ref()),
            SubjectValue::Array(arr) => arr,
        }
    }
}

/// A credential subject: an optional identifier plus flat attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialSubject {
    /// The subject identifier, usually the holder's DID. A non-string value
    /// reads as `None`.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// Every other subject member.
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl CredentialSubject {
    /// Create a subject with an optional identifier and no attributes.
    pub fn new(id: Option<String>) -> Self {
        Self {
            id,
            attributes: serde_json::Map::new(),
        }
    }

    /// Add an attribute, replacing any previous value under the same key.
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Look up an attribute by namespace and short name.
    ///
    /// The qualified key `<namespace><name>` wins over the compact key
    /// `<name>` when both are present.
    pub fn attribute(&self, namespace: &str, name: &str) -> Option<&serde_json::Value> {
        self.attributes
            .get(&qualify(namespace, name))
            .or_else(|| self.attributes.get(name))
    }

    /// Like [`attribute`](Self::attribute), but only for string values.
    pub fn string_attribute(&self, namespace: &str, name: &str) -> Option<&str> {
        self.attribute(namespace, name).and_then(|v| v.as_str())
    }
}

impl VerifiableCredential {
    /// Create a credential with the given types, issuer and single subject.
    ///
    /// No issuance date is set.
    pub fn new<I, S>(types: I, issuer: impl Into<String>, subject: CredentialSubject) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            context: ContextValue::default(),
            id: None,
            credential_type: CredentialTypeValue::Array(types.into_iter().map(Into::into).collect()),
            issuer: Some(Issuer::Uri(issuer.into())),
            issuance_date: None,
            expiration_date: None,
            credential_subject: SubjectValue::Single(Box::new(subject)),
        }
    }

    /// The issuer URI, if the credential names a readable issuer.
    pub fn issuer_id(&self) -> Option<&str> {
        self.issuer.as_ref().map(Issuer::id)
    }

    /// The declared types, in presentation order.
    pub fn types(&self) -> &[String] {
        self.credential_type.as_slice()
    }

    /// Whether the type list contains exactly `qualified_type`.
    pub fn has_type(&self, qualified_type: &str) -> bool {
        self.types().iter().any(|t| t == qualified_type)
    }

    /// The credential subjects, in presentation order.
    pub fn subjects(&self) -> &[CredentialSubject] {
        self.credential_subject.as_slice()
    }

    /// The first credential subject, if any.
    pub fn first_subject(&self) -> Option<&CredentialSubject> {
        self.subjects().first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fx_core::FX_CREDENTIAL_NS;
    use serde_json::json;

    #[test]
    fn deserializes_single_type_and_subject() {
        let vc: VerifiableCredential = serde_json::from_value(json!({
            "@context": "https://www.w3.org/2018/credentials/v1",
            "type": "VerifiableCredential",
            "issuer": "did:web:issuer",
            "credentialSubject": {"id": "did:web:holder", "holderIdentifier": "BPNL000000000001"}
        }))
        .unwrap();

        assert_eq!(vc.types(), ["VerifiableCredential".to_string()]);
        assert_eq!(vc.issuer_id(), Some("did:web:issuer"));
        let subject = vc.first_subject().unwrap();
        assert_eq!(subject.id.as_deref(), Some("did:web:holder"));
        assert_eq!(
            subject.string_attribute(FX_CREDENTIAL_NS, "holderIdentifier"),
            Some("BPNL000000000001")
        );
    }

    #[test]
    fn deserializes_arrays_and_issuer_object() {
        let vc: VerifiableCredential = serde_json::from_value(json!({
            "type": ["VerifiableCredential", "https://w3id.org/factoryx/credentials/FxMembershipCredential"],
            "issuer": {"id": "did:web:issuer", "name": "Issuer"},
            "issuanceDate": "2025-01-01T00:00:00Z",
            "credentialSubject": [{"id": "did:web:a"}, {"id": "did:web:b"}],
            "proof": {"type": "JsonWebSignature2020"}
        }))
        .unwrap();

        assert_eq!(vc.types().len(), 2);
        assert!(vc.has_type("https://w3id.org/factoryx/credentials/FxMembershipCredential"));
        assert_eq!(vc.issuer_id(), Some("did:web:issuer"));
        assert_eq!(vc.subjects().len(), 2);
        assert!(vc.issuance_date.is_some());
    }

    #[test]
    fn informational_members_are_lenient() {
        let vc: VerifiableCredential = serde_json::from_value(json!({
            "@context": {"@vocab": "https://w3id.org/factoryx/"},
            "id": 17,
            "type": ["VerifiableCredential"],
            "issuanceDate": "2025-03-01T00:00:00",
            "expirationDate": "next year",
            "credentialSubject": {"id": {"nested": true}, "certificationType": "ISO9001"}
        }))
        .unwrap();

        assert_eq!(vc.context, ContextValue::default());
        assert!(vc.id.is_none());
        assert!(vc.issuer_id().is_none());
        assert_eq!(
            vc.issuance_date.map(|d| d.to_rfc3339()),
            Some("2025-03-01T00:00:00+00:00".to_string())
        );
        assert!(vc.expiration_date.is_none());
        let subject = vc.first_subject().unwrap();
        assert!(subject.id.is_none());
        assert_eq!(subject.string_attribute(FX_CREDENTIAL_NS, "certificationType"), Some("ISO9001"));
    }

    #[test]
    fn offset_dates_are_normalized_to_utc() {
        assert_eq!(
            parse_datetime("2025-03-01T02:00:00+02:00").map(|d| d.to_rfc3339()),
            Some("2025-03-01T00:00:00+00:00".to_string())
        );
        assert!(parse_datetime("2025-03-01").is_none());
    }

    #[test]
    fn missing_type_is_rejected() {
        let result = serde_json::from_value::<VerifiableCredential>(json!({
            "issuer": "did:web:issuer",
            "credentialSubject": {"id": "did:web:holder"}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn constructor_is_deterministic() {
        let a = VerifiableCredential::new(["VerifiableCredential"], "did:web:issuer", CredentialSubject::default());
        let b = VerifiableCredential::new(["VerifiableCredential"], "did:web:issuer", CredentialSubject::default());
        assert!(a.issuance_date.is_none());
        assert_eq!(a, b);
    }

    #[test]
    fn missing_subject_is_rejected() {
        let result = serde_json::from_value::<VerifiableCredential>(json!({
            "type": ["VerifiableCredential"],
            "issuer": "did:web:issuer"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn qualified_attribute_wins_over_compact() {
        let subject = CredentialSubject::new(None)
            .with_attribute("certificationType", "compact")
            .with_attribute(qualify(FX_CREDENTIAL_NS, "certificationType"), "qualified");
        assert_eq!(
            subject.string_attribute(FX_CREDENTIAL_NS, "certificationType"),
            Some("qualified")
        );
    }

    #[test]
    fn non_string_attribute_is_not_a_string_attribute() {
        let subject = CredentialSubject::new(None).with_attribute("holderIdentifier", 42);
        assert!(subject.attribute(FX_CREDENTIAL_NS, "holderIdentifier").is_some());
        assert!(subject
            .string_attribute(FX_CREDENTIAL_NS, "holderIdentifier")
            .is_none());
    }

    #[test]
    fn has_type_is_exact() {
        let vc = VerifiableCredential::new(
            ["https://w3id.org/factoryx/credentials/MembershipCredential"],
            "did:web:issuer",
            CredentialSubject::default(),
        );
        assert!(vc.has_type("https://w3id.org/factoryx/credentials/MembershipCredential"));
        assert!(!vc.has_type("MembershipCredential"));
        assert!(!vc.has_type("https://w3id.org/factoryx/credentials/membershipcredential"));
    }
}
