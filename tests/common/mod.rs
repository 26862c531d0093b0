use std::sync::Arc;

use wiremock::{MockServer, ResponseTemplate};

use dvault_client::DungeonVaultClient;
use dvault_client::config::ApiConfig;
use dvault_client::credentials::{CredentialPair, CredentialStore, MemoryCredentialStore};
use dvault_client::transport::{HttpCaller, RemoteCaller};

/// Unified test harness: a wiremock backend plus a client wired to it
/// through an in-memory credential store.
pub struct TestHarness {
    pub server: MockServer,
    pub client: DungeonVaultClient,
    pub store: Arc<MemoryCredentialStore>,
}

impl TestHarness {
    /// Harness with no stored session.
    pub async fn new() -> Self {
        Self::build(MemoryCredentialStore::new()).await
    }

    /// Harness with a seeded session, as if login already happened.
    #[allow(dead_code)]
    pub async fn signed_in(access: &str, refresh: &str) -> Self {
        Self::build(MemoryCredentialStore::with_pair(CredentialPair {
            access_token: access.to_string(),
            refresh_token: refresh.to_string(),
            token_type: "bearer".to_string(),
            user_id: 7,
        }))
        .await
    }

    async fn build(store: MemoryCredentialStore) -> Self {
        let server = MockServer::start().await;
        let store = Arc::new(store);

        let caller: Arc<dyn RemoteCaller> = Arc::new(
            HttpCaller::new(&ApiConfig {
                base_url: format!("{}/", server.uri()),
                timeout_secs: 5,
            })
            .unwrap(),
        );
        let client =
            DungeonVaultClient::with_components(caller, store.clone() as Arc<dyn CredentialStore>);

        Self {
            server,
            client,
            store,
        }
    }
}

/// Backend-style error body: `{"detail": "..."}` with the given status.
#[allow(dead_code)]
pub fn detail_response(status: u16, detail: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(serde_json::json!({ "detail": detail }))
}

/// Token payload the way `auth/login` and `auth/refresh` answer.
#[allow(dead_code)]
pub fn token_body(access: &str, refresh: &str, user_id: i64) -> serde_json::Value {
    serde_json::json!({
        "access_token": access,
        "refresh_token": refresh,
        "token_type": "bearer",
        "user_id": user_id,
    })
}

/// Campaign row as returned by the campaigns endpoints.
#[allow(dead_code)]
pub fn campaign_body(id: i64, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "description": "weekly game",
        "img_name": "map.png",
        "invite_code": format!("INV{id}"),
        "creator_id": 7,
    })
}

/// Note row as returned by the notes and transcription endpoints.
#[allow(dead_code)]
pub fn note_body(id: i64, campaign_id: i64, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "campaign_id": campaign_id,
        "user_id": 7,
        "title": title,
        "creation_date": "2025-04-01",
        "file_name": format!("note_{id}.txt"),
        "visibility": true,
    })
}
