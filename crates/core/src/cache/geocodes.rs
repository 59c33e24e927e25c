//! Geocode cache operations.
//!
//! Rows are written once per address key and never purged; the cache acts as a
//! permanent fact store rather than an LRU.

use super::connection::CacheDb;
use super::key::AddressKey;
use crate::Error;
use crate::model::Coordinate;
use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::{params, rusqlite};

/// A persisted forward geocode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CachedGeocode {
    pub address: String,
    pub lat: f64,
    pub lon: f64,
    pub created_at: String,
}

impl CachedGeocode {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

impl CacheDb {
    /// Get the cached coordinate for an address key.
    ///
    /// Returns None if the key has never been resolved.
    pub async fn get_geocode(&self, key: &AddressKey) -> Result<Option<Coordinate>, Error> {
        Ok(self.get_geocode_row(key).await?.map(|row| row.coordinate()))
    }

    /// Get the full cache row for an address key.
    pub async fn get_geocode_row(&self, key: &AddressKey) -> Result<Option<CachedGeocode>, Error> {
        let key = key.as_str().to_string();
        self.conn
            .call(move |conn| -> Result<Option<CachedGeocode>, Error> {
                let mut stmt = conn.prepare("SELECT address, lat, lon, created_at FROM geocodes WHERE address = ?1")?;

                let result = stmt.query_row(params![key], |row| {
                    Ok(CachedGeocode { address: row.get(0)?, lat: row.get(1)?, lon: row.get(2)?, created_at: row.get(3)? })
                });

                match result {
                    Ok(row) => Ok(Some(row)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Store a resolved coordinate.
    ///
    /// Concurrent writers for the same key resolve to the same value, so the
    /// upsert simply lets the last write win.
    pub async fn put_geocode(&self, key: &AddressKey, at: Coordinate) -> Result<(), Error> {
        if key.is_empty() {
            return Err(Error::InvalidInput("address key cannot be empty".into()));
        }
        let key = key.as_str().to_string();
        let created_at = Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO geocodes (address, lat, lon, created_at)
                    VALUES (?1, ?2, ?3, ?4)
                    ON CONFLICT(address) DO UPDATE SET
                        lat = excluded.lat,
                        lon = excluded.lon",
                    params![key, at.lat, at.lon, created_at],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Number of cached addresses.
    pub async fn geocode_count(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM geocodes", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_and_get_geocode() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let key = AddressKey::from_text("1 Main St,Springfield,IL");

        db.put_geocode(&key, Coordinate::new(39.8, -89.6)).await.unwrap();

        let hit = db.get_geocode(&key).await.unwrap();
        assert_eq!(hit, Some(Coordinate::new(39.8, -89.6)));

        let row = db.get_geocode_row(&key).await.unwrap().unwrap();
        assert_eq!(row.address, "1 main st,springfield,il");
    }

    #[tokio::test]
    async fn test_get_missing_geocode() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let result = db.get_geocode(&AddressKey::from_text("nowhere")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_put_empty_key_rejected() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let result = db.put_geocode(&AddressKey::from_text(" , "), Coordinate::new(0.0, 0.0)).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_concurrent_puts_same_key() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let key = AddressKey::from_text("NL");

        let mut handles = Vec::new();
        for _ in 0..8 {
            let db = db.clone();
            let key = key.clone();
            handles.push(tokio::spawn(async move { db.put_geocode(&key, Coordinate::new(52.1, 5.3)).await }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(db.geocode_count().await.unwrap(), 1);
        assert_eq!(db.get_geocode(&key).await.unwrap(), Some(Coordinate::new(52.1, 5.3)));
    }

    #[tokio::test]
    async fn test_cache_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("geocodes.sqlite");
        let key = AddressKey::from_text("DE");

        {
            let db = CacheDb::open(&path).await.unwrap();
            db.put_geocode(&key, Coordinate::new(51.1, 10.4)).await.unwrap();
        }

        let reopened = CacheDb::open(&path).await.unwrap();
        assert_eq!(reopened.get_geocode(&key).await.unwrap(), Some(Coordinate::new(51.1, 10.4)));
    }
}
