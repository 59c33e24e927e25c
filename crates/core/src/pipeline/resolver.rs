//! Per-record resolution rules.

use crate::geocode::GeocodeClient;
use crate::model::{Account, Contact, CountryPoint, NamedPoint, RawRecord};

/// Maps one record to a point on the map.
///
/// Insufficient address data and failed lookups both yield `None`; callers
/// cannot and should not tell them apart.
#[derive(Clone)]
pub struct LocationResolver {
    geocoder: GeocodeClient,
}

impl LocationResolver {
    pub fn new(geocoder: GeocodeClient) -> Self {
        Self { geocoder }
    }

    /// Contact rule: any of street, city or state is enough to try.
    pub async fn resolve_contact(&self, contact: &Contact) -> Option<NamedPoint> {
        let address = contact.address_text()?;
        let at = self.geocoder.resolve(&address).await?;
        Some(NamedPoint::new(contact.name.as_deref().unwrap_or_default(), at))
    }

    /// Account rule: geocode the billing country on its own.
    pub async fn resolve_account(&self, account: &Account) -> Option<NamedPoint> {
        let country = account.country()?;
        let at = self.geocoder.resolve(country).await?;
        Some(NamedPoint::new(country, at))
    }

    /// Country rule for the aggregated view; the count is filled in later.
    pub async fn resolve_country(&self, code: &str) -> Option<CountryPoint> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        let at = self.geocoder.resolve(code).await?;
        Some(CountryPoint::new(code, at))
    }

    pub async fn resolve(&self, record: &RawRecord) -> Option<NamedPoint> {
        match record {
            RawRecord::Contact(contact) => self.resolve_contact(contact).await,
            RawRecord::Account(account) => self.resolve_account(account).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cache::CacheDb;
    use crate::geocode::fake::FakeGeocoder;
    use crate::model::Coordinate;

    async fn resolver_with(fake: &Arc<FakeGeocoder>) -> LocationResolver {
        let cache = CacheDb::open_in_memory().await.unwrap();
        LocationResolver::new(GeocodeClient::new(cache, fake.clone()))
    }

    fn springfield() -> Contact {
        Contact {
            id: 1,
            name: Some("Homer Simpson".into()),
            mailing_street: Some("1 Main St".into()),
            mailing_city: Some("Springfield".into()),
            mailing_state: Some("IL".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_contact_rule_resolves_escaped_name() {
        let fake = Arc::new(FakeGeocoder::default().with_place("1 Main St,Springfield,IL", Coordinate::new(39.8, -89.6)));
        let resolver = resolver_with(&fake).await;

        let point = resolver.resolve_contact(&springfield()).await.unwrap();
        assert_eq!(point, NamedPoint { name: "Homer%20Simpson".into(), lat: 39.8, lon: -89.6 });
    }

    #[tokio::test]
    async fn test_contact_without_address_skips_geocoder() {
        let fake = Arc::new(FakeGeocoder::default());
        let resolver = resolver_with(&fake).await;
        let contact = Contact { name: Some("Nobody".into()), mailing_street: Some(String::new()), ..Default::default() };

        assert_eq!(resolver.resolve_contact(&contact).await, None);
        assert_eq!(fake.forward_calls(), 0);
    }

    #[tokio::test]
    async fn test_contact_lookup_failure_is_none() {
        let fake = Arc::new(FakeGeocoder::default());
        let resolver = resolver_with(&fake).await;

        assert_eq!(resolver.resolve_contact(&springfield()).await, None);
        assert_eq!(fake.forward_calls(), 1);
    }

    #[tokio::test]
    async fn test_account_rule_uses_billing_country() {
        let fake = Arc::new(FakeGeocoder::default().with_place("NL", Coordinate::new(52.1, 5.3)));
        let resolver = resolver_with(&fake).await;
        let account = Account { id: 7, billing_city: Some("Utrecht".into()), billing_country: Some("NL".into()) };

        let point = resolver.resolve(&RawRecord::Account(account)).await.unwrap();
        assert_eq!(point, NamedPoint { name: "NL".into(), lat: 52.1, lon: 5.3 });
    }

    #[tokio::test]
    async fn test_account_without_country_skips_geocoder() {
        let fake = Arc::new(FakeGeocoder::default());
        let resolver = resolver_with(&fake).await;
        let account = Account { id: 7, billing_city: Some("Utrecht".into()), billing_country: None };

        assert_eq!(resolver.resolve_account(&account).await, None);
        assert_eq!(fake.forward_calls(), 0);
    }

    #[tokio::test]
    async fn test_country_rule_starts_at_zero() {
        let fake = Arc::new(FakeGeocoder::default().with_place("FR", Coordinate::new(46.2, 2.2)));
        let resolver = resolver_with(&fake).await;

        let point = resolver.resolve_country("FR").await.unwrap();
        assert_eq!(point, CountryPoint { country: "FR".into(), lat: 46.2, lon: 2.2, count: 0 });

        assert_eq!(resolver.resolve_country("  ").await, None);
        assert_eq!(fake.forward_calls(), 1);
    }
}
