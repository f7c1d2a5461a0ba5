use annostore_types::{Annotation, Identity, Status};

/// Identity-keyed, append-only annotation storage.
///
/// Ledgers are keyed by [`Identity::printable`]. A ledger exists iff
/// `create` has succeeded for its key; afterwards entries are only ever
/// appended. Implementations must make each call atomic per key: two
/// concurrent `create`s on one key cannot both succeed, and `find_by_identity`
/// never observes a half-applied `append`.
///
/// Stores report outcomes through [`Status`] and never return
/// [`Status::Unknown`].
pub trait AnnotationStore: Send + Sync {
    /// Start a ledger holding `[entry]`.
    ///
    /// Returns `Exists` without appending if the ledger is already present.
    fn create(&self, id: &dyn Identity, entry: Annotation) -> Status;

    /// Push `entry` onto an existing ledger.
    ///
    /// Returns `NotFound` without mutating anything if there is no ledger.
    fn append(&self, id: &dyn Identity, entry: Annotation) -> Status;

    /// Snapshot of the ledger in append order, or `(vec![], NotFound)`.
    fn find_by_identity(&self, id: &dyn Identity) -> (Vec<Annotation>, Status);
}
