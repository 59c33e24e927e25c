//! Request-level map operations.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::aggregate::CountAggregator;
use super::batch::map_all;
use super::resolver::LocationResolver;
use crate::Error;
use crate::cache::CacheDb;
use crate::config::AppConfig;
use crate::geocode::{ForwardGeocoder, GeocodeClient, ReverseGeocodeClient, ReverseGeocoder};
use crate::model::{Coordinate, CountryCorrection, CountryPoint, NamedPoint, RawRecord, normalize_code};
use crate::store::RecordSource;

/// Limits and country lists for the map views.
#[derive(Debug, Clone)]
pub struct MapSettings {
    pub max_concurrency: usize,
    pub contact_limit: usize,
    pub account_limit: usize,
    pub account_countries: Vec<String>,
    pub map_countries: Vec<String>,
}

impl From<&AppConfig> for MapSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_concurrency: config.max_concurrency,
            contact_limit: config.contact_limit,
            account_limit: config.account_limit,
            account_countries: config.account_countries.iter().map(|c| normalize_code(c)).collect(),
            map_countries: config.map_countries.iter().map(|c| normalize_code(c)).collect(),
        }
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

/// Composes record retrieval, resolution and aggregation into the map views.
///
/// Each call threads its own results back to the caller; nothing is
/// accumulated between requests.
#[derive(Clone)]
pub struct MapService {
    store: Arc<dyn RecordSource>,
    resolver: LocationResolver,
    reverse: ReverseGeocodeClient,
    aggregator: CountAggregator,
    settings: MapSettings,
}

impl MapService {
    pub fn new(
        store: Arc<dyn RecordSource>, cache: CacheDb, forward: Arc<dyn ForwardGeocoder>,
        reverse: Arc<dyn ReverseGeocoder>, settings: MapSettings,
    ) -> Self {
        Self {
            resolver: LocationResolver::new(GeocodeClient::new(cache, forward)),
            reverse: ReverseGeocodeClient::new(reverse),
            aggregator: CountAggregator::new(store.clone()),
            store,
            settings,
        }
    }

    /// Geocoded contacts; contacts that cannot be placed are left out.
    ///
    /// # Errors
    ///
    /// Returns `Error::StoreQuery` if the contacts cannot be loaded.
    pub async fn contact_locations(&self, limit: Option<usize>) -> Result<Vec<NamedPoint>, Error> {
        let limit = positive_limit(limit, self.settings.contact_limit)?;
        let contacts = self.store.find_contacts(limit).await?;
        let total = contacts.len();

        let points = self.locate(contacts.into_iter().map(RawRecord::Contact).collect()).await;
        tracing::info!(contacts = total, located = points.len(), "contact map resolved");
        Ok(points)
    }

    /// Geocoded accounts billed in one of the configured account countries.
    ///
    /// # Errors
    ///
    /// Returns `Error::StoreQuery` if the accounts cannot be loaded.
    pub async fn account_locations(&self, limit: Option<usize>) -> Result<Vec<NamedPoint>, Error> {
        let limit = positive_limit(limit, self.settings.account_limit)?;
        let accounts = self.store.find_accounts(&self.settings.account_countries, limit).await?;
        let total = accounts.len();

        let points = self.locate(accounts.into_iter().map(RawRecord::Account).collect()).await;
        tracing::info!(accounts = total, located = points.len(), "account map resolved");
        Ok(points)
    }

    /// Configured countries keyed by code, each with its account count.
    ///
    /// # Errors
    ///
    /// Returns `Error::StoreQuery` if the count query fails.
    pub async fn country_map(&self) -> Result<BTreeMap<String, CountryPoint>, Error> {
        let resolver = self.resolver.clone();
        let slots = map_all(self.settings.map_countries.clone(), self.settings.max_concurrency, move |code: String| {
            let resolver = resolver.clone();
            async move { resolver.resolve_country(&code).await }
        })
        .await;

        let points: Vec<CountryPoint> = slots.into_iter().flatten().collect();
        let codes: Vec<String> = points.iter().map(|p| p.country.clone()).collect();

        let merged = self.aggregator.aggregate(&codes, points).await?;
        tracing::info!(countries = merged.len(), "country map resolved");
        Ok(merged)
    }

    /// Move every account billed in `current_country` to the country found at `at`.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidInput` for an empty country or out-of-range coordinate
    /// - `Error::LookupFailed` when no country is found at `at`
    /// - `Error::CorrectionFailed` when the bulk update fails
    pub async fn correct_country(&self, current_country: &str, at: Coordinate) -> Result<CountryCorrection, Error> {
        let current = normalize_code(current_country);
        if current.is_empty() {
            return Err(Error::InvalidInput("current country cannot be empty".into()));
        }
        if !at.is_valid() {
            return Err(Error::InvalidInput(format!("coordinate out of range: {}, {}", at.lat, at.lon)));
        }

        let found = self
            .reverse
            .country_at(at)
            .await
            .map_err(|e| Error::LookupFailed(format!("no country at {}, {}: {e}", at.lat, at.lon)))?;

        let updated = self.store.update_billing_country(&current, &found.short_code).await?;
        tracing::info!(from = %current, to = %found.short_code, updated, "billing country corrected");

        Ok(CountryCorrection { from: current, to: found.short_code, country_name: found.long_name, updated })
    }

    /// Resolve records with bounded fan-out, dropping the ones that cannot be placed.
    async fn locate(&self, records: Vec<RawRecord>) -> Vec<NamedPoint> {
        let resolver = self.resolver.clone();
        let slots = map_all(records, self.settings.max_concurrency, move |record: RawRecord| {
            let resolver = resolver.clone();
            async move { resolver.resolve(&record).await }
        })
        .await;

        slots.into_iter().flatten().collect()
    }
}

fn positive_limit(requested: Option<usize>, default: usize) -> Result<usize, Error> {
    match requested.unwrap_or(default) {
        0 => Err(Error::InvalidInput("limit must be at least 1".into())),
        limit => Ok(limit),
    }
}
