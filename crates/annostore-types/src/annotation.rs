use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{TypeError, TypeResult};
use crate::factory::Factories;
use crate::identity::Identity;
use crate::metadata::Metadata;

/// A single ledger entry.
///
/// Serializes directly; deserializing needs [`Factories`] to rebuild the
/// identity and metadata, so use [`Annotation::from_json`] or
/// [`Annotation::from_value`] instead of `serde::Deserialize`.
#[derive(Clone, Debug)]
pub struct Annotation {
    pub unique: Uuid,
    pub identity: Arc<dyn Identity>,
    pub created: DateTime<Utc>,
    pub metadata: Metadata,
}

#[derive(Serialize)]
struct AnnotationRef<'a> {
    unique: &'a Uuid,
    identity: IdentityRef<'a>,
    created: &'a DateTime<Utc>,
    metadata: &'a Metadata,
}

#[derive(Serialize)]
struct IdentityRef<'a> {
    kind: &'a str,
    value: String,
}

#[derive(Deserialize)]
struct AnnotationWire {
    unique: Uuid,
    identity: IdentityWire,
    created: DateTime<Utc>,
    metadata: Metadata,
}

#[derive(Deserialize)]
struct IdentityWire {
    kind: String,
    value: String,
}

impl Annotation {
    /// New annotation stamped with a fresh UUIDv7 and the current time.
    pub fn new(identity: Arc<dyn Identity>, metadata: Metadata) -> Self {
        Self {
            unique: Uuid::now_v7(),
            identity,
            created: Utc::now(),
            metadata,
        }
    }

    pub fn to_json(&self) -> TypeResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    pub fn from_json(bytes: &[u8], factories: &Factories) -> TypeResult<Self> {
        let wire: AnnotationWire =
            serde_json::from_slice(bytes).map_err(|e| TypeError::Serialization(e.to_string()))?;
        Self::from_wire(wire, factories)
    }

    pub fn from_value(value: Value, factories: &Factories) -> TypeResult<Self> {
        let wire: AnnotationWire =
            serde_json::from_value(value).map_err(|e| TypeError::Serialization(e.to_string()))?;
        Self::from_wire(wire, factories)
    }

    fn from_wire(wire: AnnotationWire, factories: &Factories) -> TypeResult<Self> {
        let identity = factories
            .identity
            .reconstruct(&wire.identity.kind, &wire.identity.value)?;
        let metadata = factories
            .metadata
            .reconstruct(&wire.metadata.kind, wire.metadata.body)?;
        Ok(Self {
            unique: wire.unique,
            identity,
            created: wire.created,
            metadata,
        })
    }
}

impl Serialize for Annotation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        AnnotationRef {
            unique: &self.unique,
            identity: IdentityRef {
                kind: self.identity.kind(),
                value: self.identity.printable(),
            },
            created: &self.created,
            metadata: &self.metadata,
        }
        .serialize(serializer)
    }
}

impl PartialEq for Annotation {
    fn eq(&self, other: &Self) -> bool {
        self.unique == other.unique
            && self.identity.kind() == other.identity.kind()
            && self.identity.printable() == other.identity.printable()
            && self.created == other.created
            && self.metadata == other.metadata
    }
}
