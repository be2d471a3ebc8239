use crate::{
    api::threads::ThreadsClient,
    error::{Error, Result},
    threads::insights::{Metric, MetricSet},
};

/// Fetch `metrics` for one post
pub async fn fetch_metrics(
    client: &ThreadsClient,
    media_id: &str,
    metrics: &[Metric],
) -> Result<MetricSet> {
    let metric = Metric::join(metrics);
    let response = client
        .get_insights(media_id, &metric)
        .await
        .map_err(|source| Error::MetricsFetch {
            media_id: media_id.to_string(),
            source,
        })?;

    Ok(response.into())
}
