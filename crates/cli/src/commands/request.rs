//! Send one request through the mock router.

use postboard_api::{ApiConfig, ApiRequest, Method, MockApi};

/// Dispatch `method path` and print the `{ok, status, body}` envelope.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the method is not a valid
/// HTTP method. A non-2xx response is printed, not returned as an error.
pub async fn send(
    method: &str,
    path: &str,
    body: Option<String>,
    token: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let method = Method::from_bytes(method.to_uppercase().as_bytes())?;
    let api = MockApi::from_config(ApiConfig::from_env()?)?;

    let mut request = ApiRequest::new(method, path);
    if let Some(body) = body {
        request = request.body(body);
    }
    if let Some(token) = token {
        request = request.bearer(token);
    }

    let response = api.fetch(request).await;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&response.envelope())?);
    }
    Ok(())
}
