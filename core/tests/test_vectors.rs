//! Verify path resolution against JSON test vectors stored in `test-vectors/`.
//!
//! Each case gives a base URL, a request path, and either the expected final
//! URL or a rejection.

use api_client::{ApiClient, ApiError, Auth};

fn vectors() -> serde_json::Value {
    let raw = include_str!("../../test-vectors/resolve.json");
    serde_json::from_str(raw).unwrap()
}

#[test]
fn resolve_test_vectors() {
    for case in vectors()["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let base = case["base"].as_str().unwrap();
        let client = ApiClient::new(base, Auth::StaticHeaderList).unwrap();
        assert!(!client.base_url().ends_with('/'), "{name}: stored base url");

        let req = client
            .build::<()>("GET", case["path"].as_str().unwrap(), None)
            .unwrap();
        assert_eq!(req.url.as_str(), case["expected"].as_str().unwrap(), "{name}: url");
    }
}

#[test]
fn rejected_test_vectors() {
    for case in vectors()["rejected"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let client = ApiClient::new(case["base"].as_str().unwrap(), Auth::StaticHeaderList).unwrap();

        let err = client
            .build::<()>("GET", case["path"].as_str().unwrap(), None)
            .unwrap_err();
        assert!(matches!(err, ApiError::RequestConstruction(_)), "{name}: {err}");
    }
}
