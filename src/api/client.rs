use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::error::ApiError;
use super::types::*;

/// Where the backend lives and who we are to it
///
/// Built once after sign-in and handed to every client; nothing reads the
/// token from anywhere else.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn auth_header(&self) -> Option<String> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| format!("Bearer {}", t))
    }
}

pub struct ScheduleClient {
    client: Client,
    base_url: String,
    auth_header: Option<String>,
}

impl ScheduleClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, config))
    }

    /// Use an already configured HTTP client (proxy, timeouts)
    pub fn with_client(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            auth_header: config.auth_header(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_header {
            Some(value) => request.header(header::AUTHORIZATION, value),
            None => request,
        }
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.url(endpoint);
        debug!(%url, "GET");

        let response = self
            .authorize(self.client.get(&url))
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        Self::decode(Self::check(response).await?).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(endpoint);
        debug!(%url, "POST");

        let response = self
            .authorize(self.client.post(&url))
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        Self::decode(Self::check(response).await?).await
    }

    async fn delete(&self, endpoint: &str) -> Result<(), ApiError> {
        let url = self.url(endpoint);
        debug!(%url, "DELETE");

        let response = self.authorize(self.client.delete(&url)).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Course catalogue for a major in the active period
    pub async fn get_courses(&self, major_id: &str) -> Result<CoursesResponse, ApiError> {
        self.get(&paths::courses(major_id)).await
    }

    /// Fetch one schedule by id; anyone with the link may view it
    #[instrument(skip(self))]
    pub async fn get_schedule(&self, schedule_id: &str) -> Result<Schedule, ApiError> {
        let response: ScheduleResponse = self.get(&paths::schedule(schedule_id)).await?;
        Ok(response.user_schedule)
    }

    /// All schedules saved by a user
    pub async fn get_schedules(&self, user_id: &str) -> Result<Vec<Schedule>, ApiError> {
        let response: ScheduleListResponse = self.get(&paths::user_schedules(user_id)).await?;
        Ok(response.user_schedules)
    }

    pub async fn save_schedule(
        &self,
        user_id: &str,
        schedule_items: &[ScheduleItem],
    ) -> Result<Schedule, ApiError> {
        let request = SaveScheduleRequest { schedule_items };
        self.post(&paths::save_schedule(user_id), &request).await
    }

    #[instrument(skip(self))]
    pub async fn rename_schedule(
        &self,
        user_id: &str,
        schedule_id: &str,
        name: &str,
    ) -> Result<Schedule, ApiError> {
        let request = RenameScheduleRequest { name };
        let response: ScheduleResponse = self
            .post(&paths::change_name(user_id, schedule_id), &request)
            .await?;
        Ok(response.user_schedule)
    }

    pub async fn delete_schedule(&self, user_id: &str, schedule_id: &str) -> Result<(), ApiError> {
        self.delete(&paths::user_schedule(user_id, schedule_id)).await
    }

    /// Trade an SSO ticket for a backend token
    pub async fn post_auth_ticket(
        &self,
        ticket: &str,
        service_url: &str,
    ) -> Result<AuthSession, ApiError> {
        let request = AuthTicketRequest {
            ticket,
            service_url,
        };
        self.post(paths::AUTH, &request).await
    }
}

/// Endpoint paths, with every id percent-encoded
mod paths {
    use urlencoding::encode;

    pub const AUTH: &str = "/auth/";

    pub fn courses(major_id: &str) -> String {
        format!("/majors/{}/courses", encode(major_id))
    }

    pub fn schedule(schedule_id: &str) -> String {
        format!("/user_schedules/{}", encode(schedule_id))
    }

    pub fn user_schedules(user_id: &str) -> String {
        format!("/users/{}/user_schedules", encode(user_id))
    }

    pub fn save_schedule(user_id: &str) -> String {
        format!("/users/{}/user_schedule", encode(user_id))
    }

    pub fn user_schedule(user_id: &str, schedule_id: &str) -> String {
        format!(
            "/users/{}/user_schedules/{}",
            encode(user_id),
            encode(schedule_id)
        )
    }

    pub fn change_name(user_id: &str, schedule_id: &str) -> String {
        format!("{}/change_name", user_schedule(user_id, schedule_id))
    }
}
