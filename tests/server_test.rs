use std::{collections::HashMap, time::Duration};

use reqwest::{StatusCode, header, redirect::Policy};
use serde_json::{Value, json};
use tunebridge::{
    api::state_cookie_name,
    config::Config,
    provider::{Provider, ProviderConfig},
    server::{AppState, router},
};
use wiremock::matchers::{header as header_eq, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestService {
    base: String,
    client: reqwest::Client,
    state: AppState,
}

fn config_against(upstream: &MockServer) -> Config {
    let uri = upstream.uri();
    let mut spotify = ProviderConfig::spotify("sp-id", "sp-secret", "http://127.0.0.1/callback");
    spotify.token_url = format!("{uri}/api/token");
    let mut genius = ProviderConfig::genius("ge-id", "ge-secret", "http://127.0.0.1/callback");
    genius.token_url = format!("{uri}/oauth/token");

    Config {
        server_address: "127.0.0.1:0".to_string(),
        spotify,
        genius,
        spotify_api_url: format!("{uri}/v1"),
        deezer_search_url: format!("{uri}/search"),
        http_timeout: Duration::from_secs(5),
        state_ttl: Duration::from_secs(600),
    }
}

async fn spawn_service(config: Config) -> TestService {
    let state = AppState::new(config).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestService {
        base: format!("http://{addr}"),
        client: reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .unwrap(),
        state,
    }
}

impl TestService {
    async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.base, path))
            .send()
            .await
            .unwrap()
    }

    /// Runs `/login*` and returns the issued state and its cookie pair.
    async fn login(&self, path: &str, provider: Provider) -> (String, String) {
        let response = self.get(path).await;
        assert_eq!(response.status(), StatusCode::FOUND);

        let location = response.headers()[header::LOCATION].to_str().unwrap();
        let url = reqwest::Url::parse(location).unwrap();
        let query: HashMap<String, String> = url.query_pairs().into_owned().collect();
        let state = query["state"].clone();

        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        let cookie_pair = set_cookie.split(';').next().unwrap().to_string();
        assert_eq!(
            cookie_pair,
            format!("{}={}", state_cookie_name(provider), state)
        );
        assert!(set_cookie.contains("HttpOnly"));

        (state, cookie_pair)
    }

    async fn callback(&self, query: &str, cookie: Option<&str>) -> reqwest::Response {
        let mut request = self
            .client
            .get(format!("{}/callback?{}", self.base, query));
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        request.send().await.unwrap()
    }
}

async fn mount_spotify_token(upstream: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .mount(upstream)
        .await;
}

#[tokio::test]
async fn test_index_greets() {
    let upstream = MockServer::start().await;
    let service = spawn_service(config_against(&upstream)).await;

    let response = service.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_redirects_to_provider() {
    let upstream = MockServer::start().await;
    let service = spawn_service(config_against(&upstream)).await;

    for (route, provider, host, scope) in [
        ("/login", Provider::Spotify, "accounts.spotify.com", "user-read-private user-read-email"),
        ("/loginSpotify", Provider::Spotify, "accounts.spotify.com", "user-read-private user-read-email"),
        ("/loginGenius", Provider::Genius, "api.genius.com", "me"),
    ] {
        let response = service.get(route).await;
        assert_eq!(response.status(), StatusCode::FOUND);

        let location = response.headers()[header::LOCATION].to_str().unwrap();
        let url = reqwest::Url::parse(location).unwrap();
        assert_eq!(url.host_str(), Some(host));

        let query: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(query["response_type"], "code");
        assert_eq!(query["scope"], scope);
        assert_eq!(query["redirect_uri"], "http://127.0.0.1/callback");
        assert_eq!(query["state"].len(), 16);
        assert!(query["state"].chars().all(|c| c.is_ascii_alphanumeric()));

        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.starts_with(&format!("{}=", state_cookie_name(provider))));
    }
}

#[tokio::test]
async fn test_login_with_malformed_authorize_url() {
    let upstream = MockServer::start().await;
    let mut config = config_against(&upstream);
    config.spotify.authorize_url = "::broken::".to_string();
    let service = spawn_service(config).await;

    let response = service.get("/login").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_callback_without_code_makes_no_exchange() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "x"})))
        .expect(0)
        .mount(&upstream)
        .await;
    let service = spawn_service(config_against(&upstream)).await;
    let (state, cookie) = service.login("/login", Provider::Spotify).await;

    let response = service
        .callback(&format!("code=&state={state}"), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = service
        .callback(&format!("state={state}"), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_callback_with_provider_error() {
    let upstream = MockServer::start().await;
    let service = spawn_service(config_against(&upstream)).await;

    let response = service
        .callback("error=access_denied&state=abc", None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.text().await.unwrap().contains("access_denied"));
}

#[tokio::test]
async fn test_callback_rejects_unverified_state() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "x"})))
        .expect(0)
        .mount(&upstream)
        .await;
    let service = spawn_service(config_against(&upstream)).await;

    // never issued
    let response = service
        .callback(
            "code=c&state=forged",
            Some(&format!("{}=forged", state_cookie_name(Provider::Spotify))),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // issued, but the browser does not hold the cookie
    let (state, _) = service.login("/login", Provider::Spotify).await;
    let response = service
        .callback(&format!("code=c&state={state}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(service.state.sessions.token(Provider::Spotify).await.is_err());
}

#[tokio::test]
async fn test_callback_without_cookie_does_not_burn_login() {
    let upstream = MockServer::start().await;
    mount_spotify_token(&upstream, "sp-token").await;
    let service = spawn_service(config_against(&upstream)).await;

    let (state, cookie) = service.login("/login", Provider::Spotify).await;
    let response = service
        .callback(&format!("code=c&state={state}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = service
        .callback(&format!("code=c&state={state}"), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        service.state.sessions.token(Provider::Spotify).await.unwrap(),
        "sp-token"
    );
}

#[tokio::test]
async fn test_spotify_login_then_playlist() {
    let upstream = MockServer::start().await;
    mount_spotify_token(&upstream, "sp-token").await;
    Mock::given(method("GET"))
        .and(path("/v1/playlists/pl1"))
        .and(header_eq("authorization", "Bearer sp-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": {
                "items": [
                    { "track": { "name": "A", "artists": [{ "name": "Alice" }, { "name": "Bob" }] } },
                    { "track": { "name": "B", "artists": [{ "name": "Carol" }] } }
                ],
                "next": null
            }
        })))
        .mount(&upstream)
        .await;
    let service = spawn_service(config_against(&upstream)).await;

    let response = service.get("/getPlaylist/pl1").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let (state, cookie) = service.login("/login", Provider::Spotify).await;
    let response = service
        .callback(&format!("code=the-code&state={state}"), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cleared = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(cleared.contains("Max-Age=0"));
    let body = response.text().await.unwrap();
    assert!(!body.contains("sp-token"));

    let response = service.get("/getPlaylist/pl1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "Alice Bob - A\nCarol - B\n");

    let health: Value = service.get("/health").await.json().await.unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["providers"]["spotify"]["status"], "authenticated");
    assert_eq!(health["providers"]["genius"]["status"], "unauthenticated");
}

#[tokio::test]
async fn test_genius_login_stores_genius_token() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "ge-token"})))
        .expect(1)
        .mount(&upstream)
        .await;
    let service = spawn_service(config_against(&upstream)).await;

    let (state, cookie) = service.login("/loginGenius", Provider::Genius).await;
    let health: Value = service.get("/health").await.json().await.unwrap();
    assert_eq!(health["providers"]["genius"]["status"], "awaiting_callback");

    let response = service
        .callback(&format!("code=g&state={state}"), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        service.state.sessions.token(Provider::Genius).await.unwrap(),
        "ge-token"
    );
    assert!(service.state.sessions.token(Provider::Spotify).await.is_err());
}

#[tokio::test]
async fn test_failed_exchange_reports_upstream_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_grant"}"#))
        .mount(&upstream)
        .await;
    let service = spawn_service(config_against(&upstream)).await;

    let (state, cookie) = service.login("/login", Provider::Spotify).await;
    let response = service
        .callback(&format!("code=bad&state={state}"), Some(&cookie))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(response.text().await.unwrap().contains("invalid_grant"));
    assert!(service.state.sessions.token(Provider::Spotify).await.is_err());
}

#[tokio::test]
async fn test_rejected_token_is_invalidated() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/playlists/pl1"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&upstream)
        .await;
    let service = spawn_service(config_against(&upstream)).await;
    service
        .state
        .sessions
        .store_token(Provider::Spotify, "stale".to_string())
        .await;

    let response = service.get("/getPlaylist/pl1").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let health: Value = service.get("/health").await.json().await.unwrap();
    assert_eq!(health["providers"]["spotify"]["status"], "token_invalidated");

    let response = service.get("/getPlaylist/pl1").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_playlist_without_id() {
    let upstream = MockServer::start().await;
    let service = spawn_service(config_against(&upstream)).await;

    for route in ["/getPlaylist", "/getPlaylist/"] {
        let response = service.get(route).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_get_track_returns_json() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": 99,
                "title": "Song",
                "preview": "https://cdn.example/p.mp3",
                "artist": { "id": 5, "name": "X", "picture_medium": "https://cdn.example/a.jpg" },
                "album": { "cover_medium": "https://cdn.example/c.jpg" }
            }]
        })))
        .mount(&upstream)
        .await;
    let service = spawn_service(config_against(&upstream)).await;

    let response = service.get("/getTrack?search=song").await;
    assert_eq!(response.status(), StatusCode::OK);

    let track: Value = response.json().await.unwrap();
    assert_eq!(
        track,
        json!({
            "track_id": 99,
            "artist_id": 5,
            "artist_name": "X",
            "title": "Song",
            "preview_link": "https://cdn.example/p.mp3",
            "artist_picture": "https://cdn.example/a.jpg",
            "album_picture": "https://cdn.example/c.jpg"
        })
    );
}

#[tokio::test]
async fn test_get_track_errors() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&upstream)
        .await;
    let service = spawn_service(config_against(&upstream)).await;

    let response = service.get("/getTrack").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = service.get("/getTrack?search=zzzz").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
