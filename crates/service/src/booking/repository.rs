use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use models::{Category, Event, Ticket, User};

use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Entity counts per kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub users: usize,
    pub events: usize,
    pub tickets: usize,
}

impl StoreStats {
    pub fn total(&self) -> usize { self.users + self.events + self.tickets }
}

/// Trait abstraction for booking storage.
/// Implementations can be file-backed, database-backed, or remote.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create_user(&self, user: User) -> Result<User, ServiceError>;
    async fn update_user(&self, user: User) -> Result<User, ServiceError>;
    async fn delete_user(&self, id: i64) -> bool;
    async fn get_user_by_id(&self, id: i64) -> Option<User>;
    async fn get_user_by_email(&self, email: &str) -> Option<User>;
    async fn get_users_by_name(&self, name: &str, page: Pagination) -> Vec<User>;

    async fn create_event(&self, event: Event) -> Result<Event, ServiceError>;
    async fn update_event(&self, event: Event) -> Result<Event, ServiceError>;
    async fn delete_event(&self, id: i64) -> bool;
    async fn get_event_by_id(&self, id: i64) -> Option<Event>;
    async fn get_events_by_title(&self, title: &str, page: Pagination) -> Vec<Event>;
    async fn get_events_for_day(&self, day: DateTime<Utc>, page: Pagination) -> Vec<Event>;

    /// `None` when the place is already taken for that event.
    async fn book_ticket(&self, user_id: i64, event_id: i64, place: i32, category: Category) -> Option<Ticket>;
    async fn cancel_ticket(&self, id: i64) -> bool;
    async fn get_booked_tickets_for_user(&self, user: &User, page: Pagination) -> Vec<Ticket>;
    async fn get_booked_tickets_for_event(&self, event: &Event, page: Pagination) -> Vec<Ticket>;

    async fn save(&self) -> Result<(), ServiceError>;
    async fn stats(&self) -> StoreStats;
}
