use log::info;

use crate::{
    api::{threads::ThreadsClient, ApiError},
    error::{Error, Result},
    threads::User,
};

/// Resolve the token owner, any rejection is fatal
pub async fn validate_token(client: &ThreadsClient) -> Result<User> {
    let user = match client.get_me().await {
        Ok(user) => user,
        Err(ApiError::Status { status, body }) => return Err(Error::Auth { status, body }),
        Err(e) => return Err(e.into()),
    };

    if user.id.is_empty() {
        return Err(Error::Auth {
            status: reqwest::StatusCode::OK,
            body: "response did not contain a user id".to_string(),
        });
    }

    info!(
        "Logged in as {} @{} ({})",
        user.name.as_deref().unwrap_or("-"),
        user.username.as_deref().unwrap_or("-"),
        user.id
    );
    Ok(user)
}
