use super::*;

#[test]
fn services_endpoint_is_under_api_base() {
    assert_eq!(services_endpoint(), "/api/v1/services");
}

#[test]
fn service_endpoint_formats_expected_path() {
    assert_eq!(service_endpoint("svc-123"), "/api/v1/services/svc-123");
}

#[test]
fn alith_endpoint_formats_action() {
    assert_eq!(alith_endpoint("query"), "/api/v1/alith/query");
    assert_eq!(alith_endpoint("execute"), "/api/v1/alith/execute");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn http_calls_are_unavailable_outside_the_browser() {
    let result = futures::executor::block_on(fetch_service("svc-1"));
    assert_eq!(result, Err(ApiError::Unavailable));
}
