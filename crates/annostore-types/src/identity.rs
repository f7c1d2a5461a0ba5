use std::fmt;

use crate::error::TypeError;

/// A printable, binary-representable ledger key.
///
/// Two identities name the same ledger iff their [`printable`](Identity::printable)
/// forms are equal; `kind` only tells an [`IdentityFactory`](crate::IdentityFactory)
/// how to rebuild the value on the far side of the wire.
pub trait Identity: fmt::Debug + Send + Sync {
    /// Raw bytes of the identity.
    fn binary(&self) -> Vec<u8>;

    /// Printable form, used as the ledger key and in URLs.
    fn printable(&self) -> String;

    /// Name of the concrete implementation.
    fn kind(&self) -> &'static str;
}

/// Identity carried verbatim in a URL path segment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UrlIdentity {
    id: String,
}

impl UrlIdentity {
    pub const KIND: &'static str = "url";

    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl Identity for UrlIdentity {
    fn binary(&self) -> Vec<u8> {
        self.id.as_bytes().to_vec()
    }

    fn printable(&self) -> String {
        self.id.clone()
    }

    fn kind(&self) -> &'static str {
        Self::KIND
    }
}

impl fmt::Display for UrlIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Content-derived identity: the BLAKE3 digest of some bytes.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HashIdentity {
    hash: [u8; 32],
}

impl HashIdentity {
    pub const KIND: &'static str = "hash";

    /// Derive an identity from content. The same content always yields the
    /// same identity.
    pub fn derive(content: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"annostore-identity-v1:");
        hasher.update(content);
        Self {
            hash: *hasher.finalize().as_bytes(),
        }
    }

    /// Random identity for tests and demos.
    pub fn ephemeral() -> Self {
        let mut bytes = [0u8; 32];
        rand::Rng::fill(&mut rand::thread_rng(), &mut bytes);
        Self::derive(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.hash
    }

    /// Parse from 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        let hash: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            })?;
        Ok(Self { hash })
    }

    pub fn from_raw(hash: [u8; 32]) -> Self {
        Self { hash }
    }
}

impl Identity for HashIdentity {
    fn binary(&self) -> Vec<u8> {
        self.hash.to_vec()
    }

    fn printable(&self) -> String {
        hex::encode(self.hash)
    }

    fn kind(&self) -> &'static str {
        Self::KIND
    }
}

impl fmt::Debug for HashIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashIdentity({})", hex::encode(&self.hash[..4]))
    }
}

impl fmt::Display for HashIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.printable())
    }
}
