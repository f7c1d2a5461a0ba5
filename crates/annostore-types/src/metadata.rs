use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{TypeError, TypeResult};

/// Kind-tagged annotation metadata.
///
/// The body is kept as JSON; only a [`MetadataFactory`](crate::MetadataFactory)
/// knows what a given kind should look like.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub kind: String,
    pub body: Value,
}

impl Metadata {
    /// Build metadata from a typed body without consulting a factory.
    pub fn from_body<T: Serialize>(kind: impl Into<String>, body: &T) -> TypeResult<Self> {
        let kind = kind.into();
        let body = serde_json::to_value(body).map_err(|e| TypeError::InvalidMetadata {
            kind: kind.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { kind, body })
    }

    pub fn assess(assessor: impl Into<String>, verdict: bool) -> Self {
        Self {
            kind: AssessMetadata::KIND.into(),
            body: serde_json::json!({ "assessor": assessor.into(), "verdict": verdict }),
        }
    }

    pub fn pki(signer: impl Into<String>, signature: impl Into<String>, verified: bool) -> Self {
        Self {
            kind: PkiMetadata::KIND.into(),
            body: serde_json::json!({
                "signer": signer.into(),
                "signature": signature.into(),
                "verified": verified,
            }),
        }
    }

    pub fn publish(publisher: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            kind: PublishMetadata::KIND.into(),
            body: serde_json::json!({
                "publisher": publisher.into(),
                "destination": destination.into(),
            }),
        }
    }
}

/// Result of assessing a piece of data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessMetadata {
    pub assessor: String,
    pub verdict: bool,
}

impl AssessMetadata {
    pub const KIND: &'static str = "assess";
}

/// Signature evidence over a piece of data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PkiMetadata {
    pub signer: String,
    pub signature: String,
    pub verified: bool,
}

impl PkiMetadata {
    pub const KIND: &'static str = "pki";
}

/// Record of where a piece of data was published.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishMetadata {
    pub publisher: String,
    pub destination: String,
}

impl PublishMetadata {
    pub const KIND: &'static str = "publish";
}
