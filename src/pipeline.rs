use std::path::Path;

use log::{debug, error, info, warn};

use crate::{
    api::threads::ThreadsClient,
    config::Config,
    error::Result,
    post::{insights::fetch_metrics, list_posts},
    report::{excel::export_excel, ReportRow},
    threads::{
        insights::{Metric, MetricSet},
        post::POST_FIELDS,
    },
    user::validate_token,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The account has no posts, nothing was written
    NoPosts,
    Exported(usize),
    /// Rows were collected but the file could not be written
    NotExported,
}

/// Fetch every post with its insights, in listing order.
///
/// Only a rejected token stops the run. Reposts are skipped and a post whose
/// insights cannot be fetched gets blank metrics. `None` when the account has
/// no posts at all.
pub async fn collect_rows(
    config: &Config,
    client: &ThreadsClient,
) -> Result<Option<Vec<ReportRow>>> {
    let user = validate_token(client).await?;

    info!("Fetching posts...");
    let posts = list_posts(client, &user, &POST_FIELDS, config.page_delay()).await;
    if posts.is_empty() {
        return Ok(None);
    }

    let total = posts.len();
    info!("{} posts found", total);

    let mut rows = Vec::with_capacity(total);
    for (index, post) in posts.into_iter().enumerate() {
        let index = index + 1;
        if post.is_repost() {
            info!("[{}/{}] Skipped: ID={} is a repost", index, total, post.id);
            continue;
        }
        if post.id.is_empty() {
            warn!("[{}/{}] Skipped: post without an id", index, total);
            continue;
        }

        let metrics = match fetch_metrics(client, &post.id, &Metric::ALL).await {
            Ok(metrics) => {
                if metrics.is_empty() {
                    debug!("No insights reported for {}", post.id);
                }
                metrics
            }
            Err(e) => {
                warn!("{}", e);
                MetricSet::default()
            }
        };

        info!(
            "[{}/{}] Processed: ID={} | likes={} replies={} views={}",
            index,
            total,
            post.id,
            metrics.display(Metric::Likes),
            metrics.display(Metric::Replies),
            metrics.display(Metric::Views),
        );
        rows.push(ReportRow::new(post, metrics, config.display_offset()));

        if index < total {
            tokio::time::sleep(config.item_delay()).await;
        }
    }

    Ok(Some(rows))
}

/// Collect the report and write it to `output`
pub async fn run(config: &Config, client: &ThreadsClient, output: &Path) -> Result<Outcome> {
    let Some(rows) = collect_rows(config, client).await? else {
        return Ok(Outcome::NoPosts);
    };

    match export_excel(&rows, output) {
        Ok(written) => Ok(Outcome::Exported(written)),
        Err(e) => {
            error!("{}", e);
            error!(
                "If {} is open in another program, close it and run again",
                output.display()
            );
            Ok(Outcome::NotExported)
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::{error::Error, report::Cell};

    fn config(server: &MockServer) -> Config {
        let uri = server.uri();
        Config::try_parse_from([
            "threads-insights",
            "--base-url",
            uri.as_str(),
            "--page-delay",
            "0",
            "--item-delay",
            "0",
        ])
        .unwrap()
    }

    fn client(config: &Config) -> ThreadsClient {
        ThreadsClient::new(config, "token".to_string()).unwrap()
    }

    async fn mount_me(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "42", "username": "someone", "name": "Some One"
            })))
            .mount(server)
            .await;
    }

    async fn mount_three_posts(server: &MockServer) {
        mount_me(server).await;
        Mock::given(method("GET"))
            .and(path("/42/threads"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {
                        "id": "1",
                        "text": "first\r\npost ",
                        "media_type": "TEXT_POST",
                        "timestamp": "2025-11-06T10:23:05+0000",
                        "permalink": "https://www.threads.net/@someone/post/1"
                    },
                    {
                        "id": "2",
                        "media_type": "REPOST_FACADE",
                        "timestamp": "2025-11-05T10:00:00+0000",
                        "permalink": "https://www.threads.net/@other/post/2"
                    },
                    {
                        "id": "3",
                        "text": "third",
                        "media_type": "IMAGE",
                        "media_url": "https://cdn.example.test/3.jpg",
                        "timestamp": "2025-11-04T01:00:00+0000",
                        "permalink": "https://www.threads.net/@someone/post/3"
                    }
                ],
                "paging": { "cursors": { "before": "b", "after": "a" } }
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/1/insights"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "name": "views", "values": [{ "value": 320 }] },
                    { "name": "likes", "values": [{ "value": 25 }] },
                    { "name": "replies", "values": [{ "value": 2 }] },
                    { "name": "reposts", "values": [{ "value": 1 }] },
                    { "name": "quotes", "values": [{ "value": 0 }] },
                    { "name": "shares", "values": [{ "value": 3 }] }
                ]
            })))
            .expect(1)
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/2/insights"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .expect(0)
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/3/insights"))
            .respond_with(ResponseTemplate::new(500).set_body_string("unavailable"))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn skips_reposts_and_tolerates_failed_insights() {
        let server = MockServer::start().await;
        mount_three_posts(&server).await;
        let config = config(&server);

        let rows = collect_rows(&config, &client(&config))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rows.len(), 2);

        let first = rows[0].cells();
        assert_eq!(first[0], Cell::Text("1".to_string()));
        assert_eq!(first[1], Cell::Text("2025-11-06 18:23:05".to_string()));
        assert_eq!(first[2], Cell::Text("first\npost".to_string()));
        assert_eq!(
            &first[3..9],
            &[
                Cell::Number(320),
                Cell::Number(25),
                Cell::Number(2),
                Cell::Number(1),
                Cell::Number(0),
                Cell::Number(3),
            ]
        );

        let third = rows[1].cells();
        assert_eq!(third[0], Cell::Text("3".to_string()));
        assert!(third[3..9].iter().all(|cell| *cell == Cell::Blank));
        assert_eq!(
            third[9],
            Cell::Text("https://www.threads.net/@someone/post/3".to_string())
        );
    }

    #[tokio::test]
    async fn writes_report() {
        let server = MockServer::start().await;
        mount_three_posts(&server).await;
        let config = config(&server);
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("threads_posts_20251106.xlsx");

        let outcome = run(&config, &client(&config), &output).await.unwrap();
        assert_eq!(outcome, Outcome::Exported(2));
        assert!(output.exists());
    }

    #[tokio::test]
    async fn export_failure_is_not_an_error() {
        let server = MockServer::start().await;
        mount_three_posts(&server).await;
        let config = config(&server);
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("missing").join("report.xlsx");

        let outcome = run(&config, &client(&config), &output).await.unwrap();
        assert_eq!(outcome, Outcome::NotExported);
    }

    #[tokio::test]
    async fn no_posts_exits_early() {
        let server = MockServer::start().await;
        mount_me(&server).await;
        Mock::given(method("GET"))
            .and(path("/42/threads"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&server)
            .await;
        let config = config(&server);
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("report.xlsx");

        let outcome = run(&config, &client(&config), &output).await.unwrap();
        assert_eq!(outcome, Outcome::NoPosts);
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn post_without_id_is_skipped() {
        let server = MockServer::start().await;
        mount_me(&server).await;
        Mock::given(method("GET"))
            .and(path("/42/threads"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "text": "no id", "media_type": "TEXT_POST" },
                    { "id": "5", "text": "kept", "media_type": "TEXT_POST" }
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/5/insights"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "name": "likes", "values": [{ "value": 7 }] }]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let config = config(&server);

        let rows = collect_rows(&config, &client(&config))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "5");
        assert_eq!(rows[0].metrics.get(Metric::Likes), Some(7));
    }

    #[tokio::test]
    async fn rejected_token_stops_before_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/me"))
            .respond_with(ResponseTemplate::new(401).set_body_string("expired"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/42/threads"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .expect(0)
            .mount(&server)
            .await;
        let config = config(&server);

        let error = collect_rows(&config, &client(&config)).await.unwrap_err();
        assert!(matches!(error, Error::Auth { .. }));
    }
}
