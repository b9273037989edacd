//! Test fixtures and a mock Key Vault.

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Bearer token the harness passes to the binary.
pub const TEST_TOKEN: &str = "test-token";

/// Standard vault contents: (name, value).
pub const STANDARD_SECRETS: &[(&str, &str)] = &[
    ("db-password", "p4ssw0rd-db"),
    ("api-key", "sk-test-12345"),
    ("jwt-secret", "super-secret-jwt-token"),
];

/// Sample secrets file content.
pub const SAMPLE_SECRETS_FILE: &str = "db-password = DB_PASSWORD\n\napi-key=API_KEY\n";

/// Mock Key Vault backed by wiremock.
pub struct MockVault {
    pub server: MockServer,
}

impl MockVault {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Vault URL to hand to the binary.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Serve a secret value.
    pub async fn secret(&self, name: &str, value: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/secrets/{}", name)))
            .and(header("Authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": value,
                "id": format!("{}/secrets/{}/0123456789abcdef", self.url(), name),
                "attributes": {"enabled": true}
            })))
            .mount(&self.server)
            .await;
    }

    /// Serve every standard secret.
    pub async fn standard(&self) {
        for (name, value) in STANDARD_SECRETS {
            self.secret(name, value).await;
        }
    }

    /// Fail fetches of `name` with `status`.
    pub async fn failing(&self, name: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/secrets/{}", name)))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Serve a listing of `(name, enabled, exp)` entries.
    pub async fn listing(&self, entries: &[(&str, bool, Option<i64>)]) {
        let value: Vec<serde_json::Value> = entries
            .iter()
            .map(|(name, enabled, exp)| {
                serde_json::json!({
                    "id": format!("{}/secrets/{}", self.url(), name),
                    "attributes": {"enabled": enabled, "exp": exp}
                })
            })
            .collect();

        Mock::given(method("GET"))
            .and(path("/secrets"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"value": value, "nextLink": null})),
            )
            .mount(&self.server)
            .await;
    }
}
