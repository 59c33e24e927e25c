//! Per-country account counts merged onto geocoded countries.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::Error;
use crate::model::{CountryCount, CountryPoint, normalize_code};
use crate::store::RecordSource;

/// Runs the grouped count query and folds it into the country points.
#[derive(Clone)]
pub struct CountAggregator {
    store: Arc<dyn RecordSource>,
}

impl CountAggregator {
    pub fn new(store: Arc<dyn RecordSource>) -> Self {
        Self { store }
    }

    /// Count accounts for `codes` and merge the counts into `points`.
    ///
    /// # Errors
    ///
    /// Returns `Error::StoreQuery` when the count query fails; no partial map is
    /// produced in that case.
    pub async fn aggregate(
        &self, codes: &[String], points: Vec<CountryPoint>,
    ) -> Result<BTreeMap<String, CountryPoint>, Error> {
        let counts = self.store.count_accounts_by_country(codes).await?;
        tracing::debug!(countries = codes.len(), rows = counts.len(), "account counts loaded");
        Ok(merge_counts(points, counts))
    }
}

/// Index `points` by normalized code and apply matching counts.
///
/// Points without a count stay at zero. Counts for codes with no point are
/// dropped since they have nowhere to be drawn.
pub fn merge_counts(points: Vec<CountryPoint>, counts: Vec<CountryCount>) -> BTreeMap<String, CountryPoint> {
    let mut by_code: BTreeMap<String, CountryPoint> =
        points.into_iter().map(|p| (normalize_code(&p.country), p)).collect();

    for CountryCount { country, count } in counts {
        match by_code.get_mut(&normalize_code(&country)) {
            Some(point) => point.count = count,
            None => tracing::debug!(%country, count, "dropping count for country without coordinates"),
        }
    }

    by_code
}
