//! HTTP route table shared by the gateway and the remote client.

use http::Method;

use crate::codec;
use crate::identity::Identity;

/// Name of the path parameter carrying the escaped identity.
pub const IDENTITY_PARAM: &str = "identity";

/// One ledger operation exposed over HTTP.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    pub prefix: &'static str,
}

impl Route {
    /// Router template, e.g. `/create/:identity`.
    pub fn template(&self) -> String {
        format!("{}/:{IDENTITY_PARAM}", self.prefix)
    }

    /// Path for an already-escaped segment.
    pub fn path(&self, segment: &str) -> String {
        format!("{}/{segment}", self.prefix)
    }

    /// Path for an identity, escaping its printable form.
    pub fn escaped(&self, id: &dyn Identity) -> String {
        self.path(&codec::encode(&id.printable()))
    }
}

pub const CREATE: Route = Route {
    method: Method::PUT,
    prefix: "/create",
};

pub const APPEND: Route = Route {
    method: Method::PUT,
    prefix: "/append",
};

pub const FIND: Route = Route {
    method: Method::GET,
    prefix: "/findByIdentity",
};

pub const HEALTH: &str = "/health";
