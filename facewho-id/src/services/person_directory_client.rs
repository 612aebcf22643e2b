//! Person directory client

use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;
use tracing::debug;

use super::{FaceApiConnection, PersonDirectory, ProviderError};
use crate::models::PersonRecord;

/// Person lookup client for one person group
pub struct PersonDirectoryClient {
    connection: Arc<FaceApiConnection>,
    person_group_id: String,
}

impl PersonDirectoryClient {
    pub fn new(connection: Arc<FaceApiConnection>, person_group_id: impl Into<String>) -> Self {
        Self {
            connection,
            person_group_id: person_group_id.into(),
        }
    }

    fn person_path(&self, person_id: &str) -> String {
        format!("persongroups/{}/persons/{}", self.person_group_id, person_id)
    }
}

#[async_trait]
impl PersonDirectory for PersonDirectoryClient {
    async fn get_person(&self, person_id: &str) -> Result<PersonRecord, ProviderError> {
        debug!(person_id, "Looking up person");

        let request = self
            .connection
            .request(Method::GET, &self.person_path(person_id));

        self.connection.send_json("get_person", request).await
    }
}
