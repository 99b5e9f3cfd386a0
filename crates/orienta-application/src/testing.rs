//! In-memory service doubles for application tests.

use async_trait::async_trait;
use orienta_core::error::{OrientaError, Result};
use orienta_core::guide::{
    DayEntry, Guide, GuideCatalog, GuideGenerator, GuideRepository, GuideRequest, GuideStatus,
};
use orienta_core::state::{SessionStore, StoredSession};
use orienta_core::user::{AuthService, AuthSession, Credentials, Registration, UserProfile};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn day(number: u32, completed: bool) -> DayEntry {
    DayEntry {
        day: number,
        title: format!("Day {number}"),
        goal: format!("Goal {number}"),
        theoretical_research: vec![format!("Question {number}")],
        practical_activity: "Practice".to_string(),
        learning_verification: "Verify".to_string(),
        completed,
    }
}

pub fn days(count: u32) -> Vec<DayEntry> {
    (1..=count).map(|n| day(n, false)).collect()
}

pub fn guide(id: &str, status: GuideStatus, daily_study: Vec<DayEntry>) -> Guide {
    Guide {
        id: id.to_string(),
        title: format!("Guide {id}"),
        topic: "Rust".to_string(),
        status,
        created_at: "2025-10-01".to_string(),
        completed_at: None,
        owner: Some("ava".to_string()),
        daily_study,
    }
}

pub fn session() -> AuthSession {
    AuthSession {
        user_id: "u-1".to_string(),
        username: "ava".to_string(),
        email: "ava@example.com".to_string(),
        session_cookie: "cookie".to_string(),
        expires_in_secs: 1_209_600,
    }
}

pub fn profile() -> UserProfile {
    session().profile()
}

/// Guide repository that records every write.
#[derive(Default)]
pub struct MockGuideRepository {
    guides: Mutex<HashMap<String, Guide>>,
    list_result: Mutex<Option<Result<GuideCatalog>>>,
    find_error: Mutex<Option<OrientaError>>,
    save_outcomes: Mutex<VecDeque<Result<()>>>,
    save_delay: Mutex<Duration>,
    saves: Mutex<Vec<Vec<DayEntry>>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    delete_error: Mutex<Option<OrientaError>>,
    deleted: Mutex<Vec<String>>,
    topic_error: Mutex<Option<OrientaError>>,
    topics: Mutex<Vec<String>>,
    create_error: Mutex<Option<OrientaError>>,
}

impl MockGuideRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_guide(self, guide: Guide) -> Self {
        self.guides
            .lock()
            .unwrap()
            .insert(guide.id.clone(), guide);
        self
    }

    pub fn set_list_result(&self, result: Result<GuideCatalog>) {
        *self.list_result.lock().unwrap() = Some(result);
    }

    pub fn fail_find(&self, err: OrientaError) {
        *self.find_error.lock().unwrap() = Some(err);
    }

    /// Queues the outcome of the next write. Unscripted writes succeed.
    pub fn push_save_outcome(&self, outcome: Result<()>) {
        self.save_outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn set_save_delay(&self, delay: Duration) {
        *self.save_delay.lock().unwrap() = delay;
    }

    /// Every payload received, successful or not.
    pub fn saves(&self) -> Vec<Vec<DayEntry>> {
        self.saves.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn fail_delete(&self, err: OrientaError) {
        *self.delete_error.lock().unwrap() = Some(err);
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn fail_topic(&self, err: OrientaError) {
        *self.topic_error.lock().unwrap() = Some(err);
    }

    /// Topics received by `validate_topic`, as sent.
    pub fn topics(&self) -> Vec<String> {
        self.topics.lock().unwrap().clone()
    }

    pub fn fail_create(&self, err: OrientaError) {
        *self.create_error.lock().unwrap() = Some(err);
    }
}

#[async_trait]
impl GuideRepository for MockGuideRepository {
    async fn list(&self) -> Result<GuideCatalog> {
        if let Some(result) = self.list_result.lock().unwrap().clone() {
            return result;
        }
        Ok(GuideCatalog {
            guides: self.guides.lock().unwrap().values().cloned().collect(),
            invalid_count: 0,
        })
    }

    async fn find_by_id(&self, id: &str) -> Result<Guide> {
        if let Some(err) = self.find_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.guides
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| OrientaError::not_found("guide", id))
    }

    async fn update_studies(&self, id: &str, days: &[DayEntry]) -> Result<Vec<DayEntry>> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.saves.lock().unwrap().push(days.to_vec());

        let delay = *self.save_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        let outcome = self.save_outcomes.lock().unwrap().pop_front().unwrap_or(Ok(()));
        outcome?;

        if let Some(guide) = self.guides.lock().unwrap().get_mut(id) {
            guide.daily_study = days.to_vec();
        }
        Ok(days.to_vec())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        if let Some(err) = self.delete_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.guides.lock().unwrap().remove(id);
        self.deleted.lock().unwrap().push(id.to_string());
        Ok(())
    }
}

#[async_trait]
impl GuideGenerator for MockGuideRepository {
    async fn validate_topic(&self, topic: &str) -> Result<()> {
        self.topics.lock().unwrap().push(topic.to_string());
        match self.topic_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn create(&self, request: &GuideRequest) -> Result<Guide> {
        if let Some(err) = self.create_error.lock().unwrap().clone() {
            return Err(err);
        }
        let created = guide("generated", GuideStatus::Studying, days(request.days));
        self.guides
            .lock()
            .unwrap()
            .insert(created.id.clone(), created.clone());
        Ok(created)
    }
}

/// Auth service with scripted answers.
#[derive(Default)]
pub struct MockAuthService {
    pub login_error: Mutex<Option<OrientaError>>,
    pub register_error: Mutex<Option<OrientaError>>,
    pub current_user_error: Mutex<Option<OrientaError>>,
    pub logout_error: Mutex<Option<OrientaError>>,
    pub installed: Mutex<Option<String>>,
    pub logout_calls: AtomicUsize,
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn register(&self, _registration: &Registration) -> Result<()> {
        match self.register_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn login(&self, _credentials: &Credentials) -> Result<AuthSession> {
        if let Some(err) = self.login_error.lock().unwrap().clone() {
            return Err(err);
        }
        let session = session();
        *self.installed.lock().unwrap() = Some(session.session_cookie.clone());
        Ok(session)
    }

    async fn logout(&self) -> Result<()> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        *self.installed.lock().unwrap() = None;
        match self.logout_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn current_user(&self) -> Result<UserProfile> {
        if let Some(err) = self.current_user_error.lock().unwrap().clone() {
            return Err(err);
        }
        if self.installed.lock().unwrap().is_none() {
            return Err(OrientaError::unauthorized("No session.", "Log in."));
        }
        Ok(profile())
    }

    async fn install_session(&self, session: &AuthSession) {
        *self.installed.lock().unwrap() = Some(session.session_cookie.clone());
    }

    async fn clear_session(&self) {
        *self.installed.lock().unwrap() = None;
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    pub stored: Mutex<Option<StoredSession>>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<StoredSession>> {
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn save(&self, session: &StoredSession) -> Result<()> {
        *self.stored.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.stored.lock().unwrap() = None;
        Ok(())
    }
}
