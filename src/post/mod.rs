pub mod insights;

use std::time::Duration;

use log::{info, warn};

use crate::{
    api::threads::ThreadsClient,
    error::Error,
    threads::{post::Post, Page, User},
};

/// Collect every post of `user`, newest first.
///
/// A failing page ends pagination early and the posts gathered so far are
/// returned.
pub async fn list_posts(
    client: &ThreadsClient,
    user: &User,
    fields: &[&str],
    page_delay: Duration,
) -> Vec<Post> {
    let mut posts: Vec<Post> = vec![];
    let mut after: Option<String> = None;
    let mut page = 1;

    loop {
        let response = match fetch_page(client, user, fields, after.as_deref(), page).await {
            Ok(response) => response,
            Err(e) => {
                warn!("{}", e);
                break;
            }
        };

        after = response.next_cursor().map(str::to_string);
        let count = response.data.len();
        posts.extend(response.data);
        info!("Page {}: {} posts, {} total", page, count, posts.len());

        if after.is_none() {
            break;
        }
        page += 1;
        tokio::time::sleep(page_delay).await;
    }

    posts
}

async fn fetch_page(
    client: &ThreadsClient,
    user: &User,
    fields: &[&str],
    after: Option<&str>,
    page: usize,
) -> Result<Page<Post>, Error> {
    client
        .get_threads(user, fields, after)
        .await
        .map_err(|source| Error::PageFetch { page, source })
}
