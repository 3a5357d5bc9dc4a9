//! State and async operations behind the schedule screen

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info};

use crate::api::{ApiError, Schedule, ScheduleClient, Viewer};
use crate::timing::at_least;

/// Shortest time the loading indicator stays up
pub const MIN_LOADING: Duration = Duration::from_millis(1000);

/// The calls the schedule screen makes against the backend
pub trait ScheduleBackend {
    fn fetch_schedule(
        &self,
        schedule_id: &str,
    ) -> impl Future<Output = Result<Schedule, ApiError>> + Send;

    fn rename_schedule(
        &self,
        user_id: &str,
        schedule_id: &str,
        name: &str,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

impl ScheduleBackend for ScheduleClient {
    async fn fetch_schedule(&self, schedule_id: &str) -> Result<Schedule, ApiError> {
        self.get_schedule(schedule_id).await
    }

    async fn rename_schedule(
        &self,
        user_id: &str,
        schedule_id: &str,
        name: &str,
    ) -> Result<(), ApiError> {
        ScheduleClient::rename_schedule(self, user_id, schedule_id, name).await?;
        Ok(())
    }
}

/// Fetch a schedule, taking at least [`MIN_LOADING`]
pub async fn load_schedule<B: ScheduleBackend>(
    backend: &B,
    schedule_id: &str,
) -> Result<Schedule, ApiError> {
    let schedule = at_least(backend.fetch_schedule(schedule_id), MIN_LOADING).await?;
    info!(
        schedule_id,
        items = schedule.schedule_items.len(),
        "Schedule loaded"
    );
    Ok(schedule)
}

/// Persist a new name when someone is signed in
///
/// Returns the name to apply locally, or `None` when there is no viewer and
/// nothing was sent.
pub async fn rename_schedule<B: ScheduleBackend>(
    backend: &B,
    viewer: Option<&Viewer>,
    schedule_id: &str,
    name: &str,
) -> Result<Option<String>, ApiError> {
    let Some(viewer) = viewer else {
        debug!(schedule_id, "Rename ignored, nobody signed in");
        return Ok(None);
    };

    backend
        .rename_schedule(&viewer.user_id, schedule_id, name)
        .await?;
    info!(schedule_id, name, "Schedule renamed");
    Ok(Some(name.to_string()))
}

/// What the schedule screen currently holds
#[derive(Debug, Clone, Default)]
pub struct ScheduleView {
    schedule_id: String,
    schedule: Option<Schedule>,
    loading: bool,
}

impl ScheduleView {
    pub fn new(schedule_id: impl Into<String>) -> Self {
        Self {
            schedule_id: schedule_id.into(),
            schedule: None,
            loading: false,
        }
    }

    pub fn schedule_id(&self) -> &str {
        &self.schedule_id
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    pub fn finish_loading(&mut self, schedule: Schedule) {
        self.schedule = Some(schedule);
        self.loading = false;
    }

    /// Replace the held name without going back to the server
    pub fn apply_rename(&mut self, name: String) {
        if let Some(schedule) = self.schedule.as_mut() {
            schedule.name = Some(name);
        }
    }

    pub fn title(&self) -> String {
        match self.schedule.as_ref().map(Schedule::display_name) {
            Some(name) if !name.is_empty() => format!("Jadwal {}", name),
            _ => "Memuat jadwal ...".to_string(),
        }
    }
}
