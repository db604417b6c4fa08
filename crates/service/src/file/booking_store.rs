use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::{DateTime, Utc};
use configs::{IdStrategy, StorageConfig};
use models::{codec, key::make_key, Category, Entity, EntityKind, Event, Record, Ticket, User};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::booking::{BookingRepository, StoreStats};
use crate::errors::ServiceError;
use crate::ids::IdGenerator;
use crate::pagination::Pagination;
use crate::storage::json_map_store::JsonMapFile;

struct StoreState {
    entities: HashMap<String, Entity>,
    ids: IdGenerator,
}

fn id_in_use(entities: &HashMap<String, Entity>, id: i64) -> bool {
    EntityKind::ALL.iter().any(|kind| entities.contains_key(&make_key(*kind, id)))
}

impl StoreState {
    fn new(entities: HashMap<String, Entity>, strategy: IdStrategy) -> Self {
        let mut ids = IdGenerator::new(strategy);
        ids.seed(entities.values().map(Entity::id).max().unwrap_or(0));
        Self { entities, ids }
    }

    fn records<T: Record>(&self) -> impl Iterator<Item = &T> + '_ {
        self.entities.values().filter_map(T::from_entity)
    }

    fn get<T: Record>(&self, id: i64) -> Option<&T> {
        self.entities.get(&make_key(T::KIND, id)).and_then(T::from_entity)
    }

    /// Store `record` under a freshly generated id, whatever id it came with.
    fn insert_new<T: Record>(&mut self, mut record: T) -> T {
        let entities = &self.entities;
        let id = self.ids.next_id(|id| id_in_use(entities, id));
        record.set_id(id);
        record.normalize();
        self.entities.insert(record.key(), record.clone().into_entity());
        record
    }

    fn replace<T: Record>(&mut self, mut record: T) -> Result<T, ServiceError> {
        if self.get::<T>(record.id()).is_none() {
            return Err(ServiceError::not_found(T::KIND.as_str(), record.id()));
        }
        record.normalize();
        self.entities.insert(record.key(), record.clone().into_entity());
        Ok(record)
    }

    fn remove<T: Record>(&mut self, id: i64) -> bool {
        self.entities.remove(&make_key(T::KIND, id)).is_some()
    }

    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.records::<User>().any(|u| u.email == email && Some(u.id) != except)
    }

    fn stats(&self) -> StoreStats {
        self.entities.values().fold(StoreStats::default(), |mut acc, e| {
            match e.kind() {
                EntityKind::User => acc.users += 1,
                EntityKind::Event => acc.events += 1,
                EntityKind::Ticket => acc.tickets += 1,
            }
            acc
        })
    }
}

/// In-memory booking store backed by a single JSON file.
///
/// The file is read once when the store is opened; mutations only touch
/// memory until [`FileBookingStore::save`] is called. One `RwLock` guards the
/// whole map: mutations run their check-then-act under the write guard,
/// queries and saves under the read guard.
///
/// ```
/// use configs::IdStrategy;
/// use models::User;
/// use service::file::booking_store::FileBookingStore;
///
/// let store = FileBookingStore::from_entities("data/doc.json", Vec::new(), IdStrategy::Sequential);
/// let user = tokio_test::block_on(store.create_user(User::new(0, "Ann", "ann@example.com"))).unwrap();
/// assert_eq!(user.id, 1);
/// ```
#[derive(Clone)]
pub struct FileBookingStore {
    inner: Arc<RwLock<StoreState>>,
    file: JsonMapFile,
}

impl FileBookingStore {
    /// Load the store from `path`. A missing file gives an empty store.
    pub async fn open<P: Into<PathBuf>>(path: P, strategy: IdStrategy) -> Result<Arc<Self>, ServiceError> {
        let file = JsonMapFile::new(path);
        let entities = codec::decode_batch(file.load().await?)?;
        info!(path = %file.path().display(), entities = entities.len(), ?strategy, "booking storage loaded");
        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(StoreState::new(entities, strategy))), file }))
    }

    pub async fn open_with_config(cfg: &StorageConfig) -> Result<Arc<Self>, ServiceError> {
        Self::open(&cfg.path, cfg.id_strategy).await
    }

    /// Build a store from entities already in memory; `path` is only used by `save`.
    pub fn from_entities<P, I>(path: P, entities: I, strategy: IdStrategy) -> Arc<Self>
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = Entity>,
    {
        let entities = entities.into_iter().map(|e| (e.key(), e)).collect();
        Arc::new(Self {
            inner: Arc::new(RwLock::new(StoreState::new(entities, strategy))),
            file: JsonMapFile::new(path),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Write the whole map back to the file the store was opened from.
    pub async fn save(&self) -> Result<(), ServiceError> {
        self.save_into(&self.file).await
    }

    pub async fn save_to<P: Into<PathBuf>>(&self, path: P) -> Result<(), ServiceError> {
        self.save_into(&JsonMapFile::new(path)).await
    }

    async fn save_into(&self, file: &JsonMapFile) -> Result<(), ServiceError> {
        let state = self.inner.read().await;
        let written = file.save(&state.entities).await?;
        info!(path = %file.path().display(), entities = written, "booking storage saved");
        Ok(())
    }

    /// Replace memory with the file's current content; returns the entity count.
    pub async fn reload(&self) -> Result<usize, ServiceError> {
        let mut state = self.inner.write().await;
        let entities = codec::decode_batch(self.file.load().await?)?;
        let strategy = state.ids.strategy();
        *state = StoreState::new(entities, strategy);
        info!(path = %self.file.path().display(), entities = state.entities.len(), "booking storage reloaded");
        Ok(state.entities.len())
    }

    pub async fn stats(&self) -> StoreStats {
        self.inner.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entities.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    // ---- users ----

    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn create_user(&self, user: User) -> Result<User, ServiceError> {
        let mut state = self.inner.write().await;
        if state.email_taken(&user.email, None) {
            debug!("email already registered");
            return Err(ServiceError::DuplicateEmail(user.email));
        }
        let created = state.insert_new(user);
        info!(user_id = created.id, "user_created");
        Ok(created)
    }

    #[instrument(skip(self, user), fields(user_id = user.id, email = %user.email))]
    pub async fn update_user(&self, user: User) -> Result<User, ServiceError> {
        let mut state = self.inner.write().await;
        if state.get::<User>(user.id).is_none() {
            return Err(ServiceError::not_found("user", user.id));
        }
        if state.email_taken(&user.email, Some(user.id)) {
            debug!("email belongs to another user");
            return Err(ServiceError::DuplicateEmail(user.email));
        }
        let updated = state.replace(user)?;
        info!("user_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: i64) -> bool {
        let removed = self.inner.write().await.remove::<User>(id);
        debug!(removed, "user_delete");
        removed
    }

    pub async fn get_user_by_id(&self, id: i64) -> Option<User> {
        self.inner.read().await.get::<User>(id).cloned()
    }

    pub async fn get_user_by_email(&self, email: &str) -> Option<User> {
        let state = self.inner.read().await;
        let found = state.records::<User>().find(|u| u.email == email).cloned();
        found
    }

    /// Users whose name starts with `name`, ordered by id.
    pub async fn get_users_by_name(&self, name: &str, page: Pagination) -> Vec<User> {
        let state = self.inner.read().await;
        let mut found: Vec<&User> = state.records::<User>().filter(|u| u.name.starts_with(name)).collect();
        found.sort_by_key(|u| u.id);
        page.slice(found).into_iter().cloned().collect()
    }

    // ---- events ----

    #[instrument(skip(self, event), fields(title = %event.title))]
    pub async fn create_event(&self, event: Event) -> Result<Event, ServiceError> {
        let created = self.inner.write().await.insert_new(event);
        info!(event_id = created.id, "event_created");
        Ok(created)
    }

    #[instrument(skip(self, event), fields(event_id = event.id))]
    pub async fn update_event(&self, event: Event) -> Result<Event, ServiceError> {
        let updated = self.inner.write().await.replace(event)?;
        info!("event_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_event(&self, id: i64) -> bool {
        let removed = self.inner.write().await.remove::<Event>(id);
        debug!(removed, "event_delete");
        removed
    }

    pub async fn get_event_by_id(&self, id: i64) -> Option<Event> {
        self.inner.read().await.get::<Event>(id).cloned()
    }

    /// Events whose title contains `title`, ordered by id.
    pub async fn get_events_by_title(&self, title: &str, page: Pagination) -> Vec<Event> {
        let state = self.inner.read().await;
        let mut found: Vec<&Event> = state.records::<Event>().filter(|e| e.title.contains(title)).collect();
        found.sort_by_key(|e| e.id);
        page.slice(found).into_iter().cloned().collect()
    }

    /// Events on the same UTC calendar day as `day`, ordered by time then id.
    pub async fn get_events_for_day(&self, day: DateTime<Utc>, page: Pagination) -> Vec<Event> {
        let day = day.date_naive();
        let state = self.inner.read().await;
        let mut found: Vec<&Event> = state.records::<Event>().filter(|e| e.day() == day).collect();
        found.sort_by_key(|e| (e.date, e.id));
        page.slice(found).into_iter().cloned().collect()
    }

    // ---- tickets ----

    /// Book `place` at `event_id`; `None` if that place is already taken.
    #[instrument(skip(self))]
    pub async fn book_ticket(&self, user_id: i64, event_id: i64, place: i32, category: Category) -> Option<Ticket> {
        let mut state = self.inner.write().await;
        if state.records::<Ticket>().any(|t| t.occupies(event_id, place)) {
            debug!("place already booked");
            return None;
        }
        let ticket = state.insert_new(Ticket::new(0, event_id, user_id, category, place));
        info!(ticket_id = ticket.id, "ticket_booked");
        Some(ticket)
    }

    #[instrument(skip(self))]
    pub async fn cancel_ticket(&self, id: i64) -> bool {
        let removed = self.inner.write().await.remove::<Ticket>(id);
        debug!(removed, "ticket_cancel");
        removed
    }

    /// Tickets held by `user`, ordered by event id.
    pub async fn get_booked_tickets_for_user(&self, user: &User, page: Pagination) -> Vec<Ticket> {
        let state = self.inner.read().await;
        let mut found: Vec<&Ticket> = state.records::<Ticket>().filter(|t| t.user_id == user.id).collect();
        found.sort_by_key(|t| (t.event_id, t.id));
        page.slice(found).into_iter().cloned().collect()
    }

    /// Tickets for `event`, ordered by the holder's email. Tickets whose holder
    /// is gone sort last.
    pub async fn get_booked_tickets_for_event(&self, event: &Event, page: Pagination) -> Vec<Ticket> {
        let state = self.inner.read().await;
        let mut found: Vec<(Option<&str>, &Ticket)> = state
            .records::<Ticket>()
            .filter(|t| t.event_id == event.id)
            .map(|t| (state.get::<User>(t.user_id).map(|u| u.email.as_str()), t))
            .collect();
        found.sort_by(|(ea, ta), (eb, tb)| (ea.is_none(), ea, ta.id).cmp(&(eb.is_none(), eb, tb.id)));
        page.slice(found).into_iter().map(|(_, t)| t.clone()).collect()
    }
}

#[async_trait::async_trait]
impl BookingRepository for FileBookingStore {
    async fn create_user(&self, user: User) -> Result<User, ServiceError> {
        self.create_user(user).await
    }
    async fn update_user(&self, user: User) -> Result<User, ServiceError> {
        self.update_user(user).await
    }
    async fn delete_user(&self, id: i64) -> bool { self.delete_user(id).await }
    async fn get_user_by_id(&self, id: i64) -> Option<User> { self.get_user_by_id(id).await }
    async fn get_user_by_email(&self, email: &str) -> Option<User> { self.get_user_by_email(email).await }
    async fn get_users_by_name(&self, name: &str, page: Pagination) -> Vec<User> {
        self.get_users_by_name(name, page).await
    }

    async fn create_event(&self, event: Event) -> Result<Event, ServiceError> {
        self.create_event(event).await
    }
    async fn update_event(&self, event: Event) -> Result<Event, ServiceError> {
        self.update_event(event).await
    }
    async fn delete_event(&self, id: i64) -> bool { self.delete_event(id).await }
    async fn get_event_by_id(&self, id: i64) -> Option<Event> { self.get_event_by_id(id).await }
    async fn get_events_by_title(&self, title: &str, page: Pagination) -> Vec<Event> {
        self.get_events_by_title(title, page).await
    }
    async fn get_events_for_day(&self, day: DateTime<Utc>, page: Pagination) -> Vec<Event> {
        self.get_events_for_day(day, page).await
    }

    async fn book_ticket(&self, user_id: i64, event_id: i64, place: i32, category: Category) -> Option<Ticket> {
        self.book_ticket(user_id, event_id, place, category).await
    }
    async fn cancel_ticket(&self, id: i64) -> bool { self.cancel_ticket(id).await }
    async fn get_booked_tickets_for_user(&self, user: &User, page: Pagination) -> Vec<Ticket> {
        self.get_booked_tickets_for_user(user, page).await
    }
    async fn get_booked_tickets_for_event(&self, event: &Event, page: Pagination) -> Vec<Ticket> {
        self.get_booked_tickets_for_event(event, page).await
    }

    async fn save(&self) -> Result<(), ServiceError> { self.save().await }
    async fn stats(&self) -> StoreStats { self.stats().await }
}
