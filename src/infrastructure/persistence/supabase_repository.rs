use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::application::ports::outbound::{
    CredentialKey, CredentialSource, GenerationRecordRepositoryPort, RepositoryError,
    WaitlistRepositoryPort,
};
use crate::domain::entities::{GenerationRecord, WaitlistEntry};

const WAITLIST_TABLE: &str = "waitlist";
const GENERATIONS_TABLE: &str = "mentor_generations";

/// Row inserts through the Supabase REST interface.
///
/// The anon key is read on every insert.
pub struct SupabaseRepository {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialSource>,
}

#[derive(Debug, Serialize)]
struct WaitlistRow<'a> {
    id: String,
    name: &'a str,
    email: &'a str,
    role: &'a str,
    message: Option<&'a str>,
    created_at: String,
}

#[derive(Debug, Serialize)]
struct GenerationRow<'a> {
    id: String,
    child_name: Option<&'a str>,
    email: Option<&'a str>,
    original_drawing: &'a str,
    drawing_description: Option<&'a str>,
    character_image_url: &'a str,
    created_at: String,
}

impl<'a> From<&'a WaitlistEntry> for WaitlistRow<'a> {
    fn from(entry: &'a WaitlistEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            name: &entry.name,
            email: &entry.email,
            role: entry.role.as_str(),
            message: entry.message.as_deref(),
            created_at: entry.submitted_at.to_rfc3339(),
        }
    }
}

impl<'a> From<&'a GenerationRecord> for GenerationRow<'a> {
    fn from(record: &'a GenerationRecord) -> Self {
        Self {
            id: record.id.to_string(),
            child_name: record.child_name.as_deref(),
            email: record.email.as_deref(),
            original_drawing: &record.original_drawing,
            drawing_description: record.drawing_description.as_deref(),
            character_image_url: &record.character_image_url,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

impl SupabaseRepository {
    pub fn new(base_url: &str, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn insert_row<T: Serialize + Sync>(
        &self,
        table: &str,
        row: &T,
    ) -> Result<(), RepositoryError> {
        let key = self
            .credentials
            .get(CredentialKey::SupabaseAnonKey)
            .ok_or(RepositoryError::NotConfigured)?;
        let key = key.trim();

        let response = self
            .client
            .post(self.table_url(table))
            .header("apikey", key)
            .bearer_auth(key)
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RepositoryError::Database(format!(
                "{} insert returned status {}: {}",
                table,
                status.as_u16(),
                body
            )));
        }

        debug!(table, "Row inserted");
        Ok(())
    }
}

#[async_trait]
impl WaitlistRepositoryPort for SupabaseRepository {
    async fn insert(&self, entry: &WaitlistEntry) -> Result<(), RepositoryError> {
        self.insert_row(WAITLIST_TABLE, &WaitlistRow::from(entry))
            .await
    }
}

#[async_trait]
impl GenerationRecordRepositoryPort for SupabaseRepository {
    async fn insert(&self, record: &GenerationRecord) -> Result<(), RepositoryError> {
        self.insert_row(GENERATIONS_TABLE, &GenerationRow::from(record))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::WaitlistRole;
    use crate::domain::value_objects::GenerationRecordId;
    use chrono::Utc;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repository(server: &MockServer) -> SupabaseRepository {
        let credentials: HashMap<CredentialKey, String> =
            [(CredentialKey::SupabaseAnonKey, " anon-key ".to_string())].into();
        SupabaseRepository::new(&server.uri(), Arc::new(credentials))
    }

    async fn accept_inserts(server: &MockServer, table: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/rest/v1/{}", table)))
            .and(header("apikey", "anon-key"))
            .and(header("authorization", "Bearer anon-key"))
            .and(header("prefer", "return=minimal"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(server)
            .await;
    }

    async fn inserted_row(server: &MockServer) -> Value {
        let requests = server.received_requests().await.unwrap();
        serde_json::from_slice(&requests[0].body).unwrap()
    }

    #[tokio::test]
    async fn test_waitlist_row_keeps_returned_id() {
        let server = MockServer::start().await;
        accept_inserts(&server, "waitlist").await;
        let entry = WaitlistEntry::new(
            "Ada",
            "ada@example.com",
            WaitlistRole::Partner,
            Some("We build robots".to_string()),
        );

        WaitlistRepositoryPort::insert(&repository(&server), &entry)
            .await
            .unwrap();

        assert_eq!(
            inserted_row(&server).await,
            json!({
                "id": entry.id.to_string(),
                "name": "Ada",
                "email": "ada@example.com",
                "role": "partner",
                "message": "We build robots",
                "created_at": entry.submitted_at.to_rfc3339(),
            })
        );
    }

    #[tokio::test]
    async fn test_generation_row() {
        let server = MockServer::start().await;
        accept_inserts(&server, "mentor_generations").await;
        let record = GenerationRecord {
            id: GenerationRecordId::new(),
            child_name: None,
            email: Some("parent@example.com".to_string()),
            original_drawing: "data:image/png;base64,AAAA".to_string(),
            drawing_description: Some("a robot".to_string()),
            character_image_url: "https://fal.media/files/mentor.png".to_string(),
            created_at: Utc::now(),
        };

        GenerationRecordRepositoryPort::insert(&repository(&server), &record)
            .await
            .unwrap();

        let row = inserted_row(&server).await;
        assert_eq!(row["id"], record.id.to_string());
        assert_eq!(row["child_name"], Value::Null);
        assert_eq!(row["character_image_url"], "https://fal.media/files/mentor.png");
        assert_eq!(row["created_at"], record.created_at.to_rfc3339());
    }

    #[tokio::test]
    async fn test_rejected_insert_is_a_database_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/waitlist"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"message":"Invalid API key"}"#),
            )
            .mount(&server)
            .await;
        let entry = WaitlistEntry::new("Ada", "ada@example.com", WaitlistRole::Other, None);

        let err = WaitlistRepositoryPort::insert(&repository(&server), &entry)
            .await
            .unwrap_err();

        match err {
            RepositoryError::Database(message) => {
                assert!(message.contains("status 401"));
                assert!(message.contains("Invalid API key"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_anon_key() {
        let repo = SupabaseRepository::new("https://abc.supabase.co/", Arc::new(HashMap::new()));
        assert_eq!(repo.table_url("waitlist"), "https://abc.supabase.co/rest/v1/waitlist");

        let entry = WaitlistEntry::new("Ada", "ada@example.com", WaitlistRole::Other, None);
        let err = WaitlistRepositoryPort::insert(&repo, &entry)
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::NotConfigured));
    }
}
