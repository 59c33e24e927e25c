//! Bounded, order-preserving concurrent map.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Run `resolve` over every input with at most `max_concurrency` calls in flight.
///
/// `output[i]` always belongs to `inputs[i]`, whatever order the calls finish
/// in. A resolution that returns `None` or panics leaves its own slot empty and
/// never disturbs its siblings. Returns once every input has settled.
pub async fn map_all<T, R, F, Fut>(inputs: Vec<T>, max_concurrency: usize, resolve: F) -> Vec<Option<R>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Option<R>> + Send + 'static,
{
    let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| None).take(inputs.len()).collect();
    if inputs.is_empty() {
        return slots;
    }

    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let resolve = Arc::new(resolve);
    let mut join_set = JoinSet::new();

    for (index, input) in inputs.into_iter().enumerate() {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        let resolve = resolve.clone();

        join_set.spawn(async move {
            // Held until the resolution settles.
            let _permit = permit;
            (index, resolve(input).await)
        });
    }

    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, output)) => slots[index] = output,
            Err(e) => tracing::warn!(error = %e, "resolution task failed"),
        }
    }

    slots
}
