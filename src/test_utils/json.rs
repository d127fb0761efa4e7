use axum::{body::Body, http::StatusCode, response::Response};

pub(crate) async fn read_body_text(response: Response<Body>) -> String {
    let body = response.into_body();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Could not get response body");

    String::from_utf8_lossy(&body).to_string()
}

/// Assert that `response` has the `status` and the JSON error body `{"code":...,"message":...}`.
pub(crate) async fn assert_json_error(response: Response<Body>, status: StatusCode, message: &str) {
    assert_eq!(response.status(), status);

    let want = format!(r#"{{"code":{},"message":"{}"}}"#, status.as_u16(), message);
    let got = read_body_text(response).await;

    assert_eq!(got, want);
}
