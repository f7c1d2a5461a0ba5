//! Capabilities that rebuild annotation parts during deserialization.
//!
//! Both factories are chosen once at startup and passed, as [`Factories`],
//! to every component that parses annotations off the wire.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{TypeError, TypeResult};
use crate::identity::{HashIdentity, Identity, UrlIdentity};
use crate::metadata::{AssessMetadata, Metadata, PkiMetadata, PublishMetadata};

/// Rebuilds [`Metadata`] of a given kind from its JSON body.
pub trait MetadataFactory: Send + Sync {
    fn reconstruct(&self, kind: &str, body: Value) -> TypeResult<Metadata>;
}

/// Rebuilds an [`Identity`] of a given kind from its printable form.
pub trait IdentityFactory: Send + Sync {
    fn reconstruct(&self, kind: &str, printable: &str) -> TypeResult<Arc<dyn Identity>>;
}

/// Validation rules for a single metadata kind.
pub trait MetadataSchema: Send + Sync {
    fn kind(&self) -> &str;
    fn validate(&self, body: &Value) -> TypeResult<()>;
}

/// Schema that accepts any body deserializable into `T`.
pub struct TypedSchema<T> {
    kind: &'static str,
    _body: PhantomData<fn() -> T>,
}

impl<T> TypedSchema<T> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            _body: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> MetadataSchema for TypedSchema<T> {
    fn kind(&self) -> &str {
        self.kind
    }

    fn validate(&self, body: &Value) -> TypeResult<()> {
        T::deserialize(body)
            .map(|_| ())
            .map_err(|e| TypeError::InvalidMetadata {
                kind: self.kind.to_string(),
                reason: e.to_string(),
            })
    }
}

/// [`MetadataFactory`] that dispatches on kind to a list of schemas.
pub struct MetadataRegistry {
    schemas: Vec<Box<dyn MetadataSchema>>,
}

impl MetadataRegistry {
    pub fn new(schemas: Vec<Box<dyn MetadataSchema>>) -> Self {
        Self { schemas }
    }

    /// Registry for the `assess`, `pki` and `publish` kinds.
    pub fn with_defaults() -> Self {
        Self::new(vec![
            Box::new(TypedSchema::<AssessMetadata>::new(AssessMetadata::KIND)),
            Box::new(TypedSchema::<PkiMetadata>::new(PkiMetadata::KIND)),
            Box::new(TypedSchema::<PublishMetadata>::new(PublishMetadata::KIND)),
        ])
    }

    pub fn kinds(&self) -> Vec<&str> {
        self.schemas.iter().map(|s| s.kind()).collect()
    }
}

impl Default for MetadataRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl MetadataFactory for MetadataRegistry {
    fn reconstruct(&self, kind: &str, body: Value) -> TypeResult<Metadata> {
        let schema = self
            .schemas
            .iter()
            .find(|s| s.kind() == kind)
            .ok_or_else(|| TypeError::UnknownMetadataKind(kind.to_string()))?;
        schema.validate(&body)?;
        Ok(Metadata {
            kind: kind.to_string(),
            body,
        })
    }
}

/// [`IdentityFactory`] for the built-in `url` and `hash` kinds.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityRegistry;

impl IdentityFactory for IdentityRegistry {
    fn reconstruct(&self, kind: &str, printable: &str) -> TypeResult<Arc<dyn Identity>> {
        match kind {
            UrlIdentity::KIND => Ok(Arc::new(UrlIdentity::new(printable))),
            HashIdentity::KIND => Ok(Arc::new(HashIdentity::from_hex(printable)?)),
            other => Err(TypeError::UnknownIdentityKind(other.to_string())),
        }
    }
}

/// The pair of factories threaded through every deserialization call.
#[derive(Clone)]
pub struct Factories {
    pub metadata: Arc<dyn MetadataFactory>,
    pub identity: Arc<dyn IdentityFactory>,
}

impl Factories {
    pub fn new(metadata: Arc<dyn MetadataFactory>, identity: Arc<dyn IdentityFactory>) -> Self {
        Self { metadata, identity }
    }
}

impl Default for Factories {
    fn default() -> Self {
        Self::new(
            Arc::new(MetadataRegistry::with_defaults()),
            Arc::new(IdentityRegistry),
        )
    }
}

impl fmt::Debug for Factories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factories").finish_non_exhaustive()
    }
}
