//! Foundation types for the annotation ledger.
//!
//! Every other annostore crate depends on `annostore-types`.
//!
//! # Key Types
//!
//! - [`Identity`]: Printable ledger key, with [`UrlIdentity`] and [`HashIdentity`]
//! - [`Status`]: Closed outcome vocabulary shared by store, server and client
//! - [`Annotation`]: Opaque ledger entry, rebuilt on read through [`Factories`]
//! - [`Route`]: HTTP method and path for each ledger operation
//! - [`codec`]: Identity to path-segment escaping

pub mod annotation;
pub mod codec;
pub mod error;
pub mod factory;
pub mod identity;
pub mod metadata;
pub mod route;
pub mod status;

pub use annotation::Annotation;
pub use error::{TypeError, TypeResult};
pub use factory::{
    Factories, IdentityFactory, IdentityRegistry, MetadataFactory, MetadataRegistry,
    MetadataSchema, TypedSchema,
};
pub use identity::{HashIdentity, Identity, UrlIdentity};
pub use metadata::{AssessMetadata, Metadata, PkiMetadata, PublishMetadata};
pub use route::Route;
pub use status::Status;
