//! Log in against the mock API.

use postboard_api::{ApiClient, ApiConfig, MockApi};

/// Log in and print the `{token, user}` response as JSON.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the credentials are
/// rejected.
pub async fn login(email: &str, password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let api = MockApi::from_config(ApiConfig::from_env()?)?;
    let mut client = ApiClient::new(api);

    let response = client.login(email, password).await?;
    tracing::info!(user_id = %response.user.id, "Logged in");

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&response)?);
    }
    Ok(())
}
