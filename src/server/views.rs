//! View recording, counts and rankings

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{client_ip, ApiError, AppState};
use crate::views::{Period, Ranking, RecordOutcome};

const DEFAULT_RANKING_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct RecordRequest {
    slug: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecordResponse {
    success: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    throttled: bool,
}

#[derive(Debug, Deserialize)]
pub struct CountQuery {
    slug: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    slug: String,
    count: u64,
}

#[derive(Debug, Deserialize)]
pub struct RankingQuery {
    period: Option<String>,
    limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RankingResponse {
    period: Period,
    rankings: Vec<Ranking>,
}

pub async fn record_view(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<RecordRequest>, JsonRejection>,
) -> Result<Json<RecordResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let slug = request.slug.unwrap_or_default();
    let ip = client_ip(&headers);

    let outcome = state
        .views
        .record_view(&slug, &ip)
        .await
        .map_err(ApiError::from_view("Failed to record view"))?;

    Ok(Json(RecordResponse {
        success: true,
        throttled: outcome == RecordOutcome::Throttled,
    }))
}

pub async fn view_count(
    State(state): State<AppState>,
    Query(query): Query<CountQuery>,
) -> Result<Json<CountResponse>, ApiError> {
    let slug = query.slug.unwrap_or_default();
    let count = state
        .views
        .view_count(&slug)
        .await
        .map_err(ApiError::from_view("Failed to get view count"))?;

    Ok(Json(CountResponse { slug, count }))
}

pub async fn rankings(
    State(state): State<AppState>,
    Query(query): Query<RankingQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let period = match query.period.as_deref().filter(|p| !p.is_empty()) {
        Some(p) => p
            .parse::<Period>()
            .map_err(ApiError::from_view("Failed to get rankings"))?,
        None => Period::default(),
    };
    let limit = query
        .limit
        .as_deref()
        .and_then(|l| l.parse::<usize>().ok())
        .filter(|&l| l > 0)
        .unwrap_or(DEFAULT_RANKING_LIMIT);

    let rankings = state
        .views
        .rankings(period, limit)
        .await
        .map_err(ApiError::from_view("Failed to get rankings"))?;

    Ok((
        [(header::CACHE_CONTROL, state.cache_control())],
        Json(RankingResponse { period, rankings }),
    ))
}

#[cfg(test)]
mod tests {
    use crate::server::test_support::{app, get, get_json, send};
    use crate::views::{PageView, ViewStore};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use chrono::{Duration, Utc};

    fn post_view(body: &str, ip: &str) -> Request<Body> {
        Request::post("/api/views")
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-forwarded-for", ip)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_record_and_count() {
        let (_dir, app, store) = app(&[]);

        let (status, _, body) = send(&app, post_view(r#"{"slug":"hello"}"#, "1.2.3.4")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"success":true}"#);

        let (status, _, body) = send(&app, post_view(r#"{"slug":"hello"}"#, "1.2.3.4")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"success":true,"throttled":true}"#);

        send(&app, post_view(r#"{"slug":"hello"}"#, "5.6.7.8, 10.0.0.1")).await;

        let (status, json) = get_json(&app, "/api/views?slug=hello").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["slug"], "hello");
        assert_eq!(json["count"], 2);

        let views = store.views().await;
        assert_eq!(views.len(), 2);
        assert!(views.iter().all(|v| v.ip_hash.len() == 16));
    }

    #[tokio::test]
    async fn test_record_requires_slug() {
        let (_dir, app, _) = app(&[]);

        let (status, _, body) = send(&app, post_view("{}", "1.2.3.4")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"slug required"}"#);

        let (status, _, _) = send(&app, post_view("not json", "1.2.3.4")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = get_json(&app, "/api/views").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "slug required");
    }

    #[tokio::test]
    async fn test_rankings() {
        let (_dir, app, store) = app(&[]);
        let now = Utc::now();
        for (slug, n, age) in [
            ("popular", 3, Duration::days(2)),
            ("fresh", 1, Duration::minutes(5)),
            ("old", 5, Duration::days(60)),
        ] {
            for i in 0..n {
                store
                    .append(PageView {
                        slug: slug.to_string(),
                        ip_hash: format!("c{}", i),
                        viewed_at: now - age,
                    })
                    .await
                    .unwrap();
            }
        }

        let (status, headers, body) = get(&app, "/api/rankings").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers[header::CACHE_CONTROL],
            "public, s-maxage=3600, stale-while-revalidate=7200"
        );
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["period"], "total");
        assert_eq!(json["rankings"][0]["slug"], "old");
        assert_eq!(json["rankings"][0]["views"], 5);
        assert_eq!(json["rankings"].as_array().unwrap().len(), 3);

        let (_, json) = get_json(&app, "/api/rankings?period=weekly").await;
        assert_eq!(json["period"], "weekly");
        assert_eq!(json["rankings"][0]["slug"], "popular");
        assert_eq!(json["rankings"].as_array().unwrap().len(), 2);

        let (_, json) = get_json(&app, "/api/rankings?period=monthly&limit=1").await;
        assert_eq!(json["rankings"].as_array().unwrap().len(), 1);

        // Unparseable limits fall back to the default
        let (status, json) = get_json(&app, "/api/rankings?limit=abc").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["rankings"].as_array().unwrap().len(), 3);

        let (status, json) = get_json(&app, "/api/rankings?period=yearly").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "unknown period: yearly");
    }
}
