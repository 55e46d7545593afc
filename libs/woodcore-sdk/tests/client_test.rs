use httpmock::prelude::*;
use serde_json::json;
use woodcore_sdk::{API_KEY_ENV, BASE_URL_ENV, Environment, Error, Params, TIMEOUT_ENV, WoodCore};

#[test]
fn test_empty_key_fails_before_configuration() {
    for key in ["", "  "] {
        let err = WoodCore::new(key).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert_eq!(err.message(), "API Key is required");
    }
}

#[test]
fn test_key_prefix_selects_environment() {
    let test = WoodCore::new("wc_test_abc").unwrap();
    assert_eq!(test.environment(), Environment::Test);
    assert_eq!(test.base_url(), "https://spark.test.woodcoreapp.com/api/v2");

    for key in ["wc_live_abc", "abc", "WC_TEST_abc"] {
        let client = WoodCore::new(key).unwrap();
        assert_eq!(client.environment(), Environment::Production, "key {key}");
        assert_eq!(client.base_url(), "https://spark.woodcoreapp.com/api/v2");
    }
}

#[test]
fn test_from_env_without_key_fails() {
    temp_env::with_vars_unset([API_KEY_ENV, BASE_URL_ENV, TIMEOUT_ENV], || {
        let err = WoodCore::from_env().unwrap_err();
        assert_eq!(err.name(), "ConfigurationError");
    });
}

#[test]
fn test_from_env_rejects_invalid_base_url() {
    temp_env::with_vars(
        [
            (API_KEY_ENV, Some("wc_test_env")),
            (BASE_URL_ENV, Some("ftp://example.com")),
            (TIMEOUT_ENV, None),
        ],
        || {
            let err = WoodCore::from_env().unwrap_err();
            assert!(matches!(err, Error::Configuration(_)));
        },
    );
}

#[tokio::test]
async fn test_from_env_routes_requests_to_override() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/clients/12")
                .header("Authorization", "Bearer wc_test_env");
            then.status(200).json_body(json!({"data": {"id": 12}}));
        })
        .await;

    let base_url = server.base_url();
    let client = temp_env::async_with_vars(
        [
            (API_KEY_ENV, Some("wc_test_env")),
            (BASE_URL_ENV, Some(base_url.as_str())),
            (TIMEOUT_ENV, Some("10")),
        ],
        async { WoodCore::from_env() },
    )
    .await
    .unwrap();

    assert_eq!(client.environment(), Environment::Test);
    assert_eq!(client.config().timeout().map(|t| t.as_secs()), Some(10));

    let body = client
        .clients()
        .retrieve_client(Params::new().with("clientId", 12))
        .await
        .unwrap();
    assert_eq!(body["data"]["id"], json!(12));
    mock.assert_async().await;
}
