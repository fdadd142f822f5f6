//! Generic per-type persistence port.
//!
//! Each record type gets its own store instance behind the same contract:
//! identifier assignment on insert, lookup, existence check, snapshot
//! listing, upsert, and idempotent deletion. Adapters may be in-memory,
//! file-backed, or relational; the domain does not care.

use async_trait::async_trait;

use super::define_port_error;

/// A persistable record with a store-assigned identifier.
pub trait Record: Clone + Send + Sync + 'static {
    /// Identifier newtype for this record type.
    type Id: Copy
        + Eq
        + Ord
        + std::hash::Hash
        + std::fmt::Display
        + From<i64>
        + Into<i64>
        + Send
        + Sync
        + 'static;

    /// Lower-case entity name used in logs and error details.
    const ENTITY_NAME: &'static str;

    /// Store-assigned identifier; `None` while the record is transient.
    fn id(&self) -> Option<Self::Id>;

    /// Install the store-assigned identifier.
    ///
    /// Called by store adapters during insert; identifiers are immutable
    /// once assigned and reassigning one is a programming error.
    fn assign_id(&mut self, id: Self::Id);
}

define_port_error! {
    /// Errors raised by record store adapters.
    pub enum RecordStoreError {
        /// Insert was handed a record that already carries an identifier.
        IdentifierAlreadyPresent { id: i64 } =>
            "record already carries identifier {id}",
        /// Save targeted an identifier with no stored record.
        NotFound { id: i64 } =>
            "no record stored under identifier {id}",
        /// The backing store failed.
        Backend { message: String } =>
            "store backend failed: {message}",
    }
}

/// Port for record persistence, one instance per record type.
#[async_trait]
pub trait RecordStore<T: Record>: Send + Sync {
    /// Persist a transient record.
    ///
    /// Assigns a fresh identifier and returns the stored copy. Fails with
    /// [`RecordStoreError::IdentifierAlreadyPresent`] when the record
    /// already carries one: creation never accepts caller-supplied
    /// identifiers.
    async fn insert(&self, record: T) -> Result<T, RecordStoreError>;

    /// Upsert by identifier.
    ///
    /// An identifier-less record behaves as [`Self::insert`]. Otherwise the
    /// stored record with that identifier is overwritten wholesale; fails
    /// with [`RecordStoreError::NotFound`] when none exists.
    async fn save(&self, record: T) -> Result<T, RecordStoreError>;

    /// Fetch a record by identifier.
    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, RecordStoreError>;

    /// Check whether a record exists under the identifier.
    async fn exists_by_id(&self, id: T::Id) -> Result<bool, RecordStoreError>;

    /// Snapshot of all stored records, in stable identifier order.
    async fn find_all(&self) -> Result<Vec<T>, RecordStoreError>;

    /// Remove a record; deleting an absent identifier is a no-op.
    async fn delete_by_id(&self, id: T::Id) -> Result<(), RecordStoreError>;
}
