//! Read access to contact and account records.
//!
//! The record store belongs to another system; geocoding only reads snapshots
//! from it, with the billing-country correction as the single write.

mod sqlite;

pub use sqlite::SqliteRecordStore;

#[cfg(test)]
pub(crate) use sqlite::tests as sqlite_tests;

use async_trait::async_trait;

use crate::Error;
use crate::model::{Account, Contact, CountryCount};

/// Bounded, filtered retrieval of location-bearing records.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Up to `limit` contacts.
    async fn find_contacts(&self, limit: usize) -> Result<Vec<Contact>, Error>;

    /// Up to `limit` accounts whose billing country is one of `countries`.
    async fn find_accounts(&self, countries: &[String], limit: usize) -> Result<Vec<Account>, Error>;

    /// Account counts grouped by upper-cased billing country, restricted to `codes`.
    async fn count_accounts_by_country(&self, codes: &[String]) -> Result<Vec<CountryCount>, Error>;

    /// Set the billing country of every account billed in `from` to `to`.
    ///
    /// Returns the number of rows changed.
    async fn update_billing_country(&self, from: &str, to: &str) -> Result<u64, Error>;
}
