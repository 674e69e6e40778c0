use std::sync::RwLock;

use once_cell::sync::Lazy;
use serde_json::Value;

use super::IdGenerator;
use crate::error::{Result, ServiceError};
use crate::models::{Tasker, User};

/// The fixed tasker fixture. Never mutated at runtime.
static SEED_TASKERS: Lazy<Vec<Tasker>> = Lazy::new(|| {
    vec![
        Tasker {
            id: "1".into(),
            name: "John Smith".into(),
            skills: vec!["Cleaning".into(), "Repairs".into()],
            hourly_rate: 25,
            bio: "Professional cleaner with 5 years experience".into(),
        },
        Tasker {
            id: "2".into(),
            name: "Sarah Johnson".into(),
            skills: vec!["Beauty".into(), "Wellness".into()],
            hourly_rate: 35,
            bio: "Certified beauty therapist".into(),
        },
        Tasker {
            id: "3".into(),
            name: "Mike Wilson".into(),
            skills: vec!["Car Care".into(), "Repairs".into()],
            hourly_rate: 30,
            bio: "Auto repair specialist".into(),
        },
    ]
});

/// In-memory fixture store backing the mock responder.
///
/// One instance per client (or per test), shared by `Arc`. Users, tasks and
/// bookings are append-only; taskers are fixed at construction.
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    tasks: RwLock<Vec<Value>>,
    bookings: RwLock<Vec<Value>>,
    taskers: Vec<Tasker>,
    ids: IdGenerator,
}

impl MemoryStore {
    /// Creates an empty store seeded with the default tasker fixture.
    pub fn new() -> Self {
        Self::with_taskers(SEED_TASKERS.clone())
    }

    /// Creates a store with a custom tasker fixture.
    pub fn with_taskers(taskers: Vec<Tasker>) -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            tasks: RwLock::new(Vec::new()),
            bookings: RwLock::new(Vec::new()),
            taskers,
            ids: IdGenerator::new(),
        }
    }

    /// Hands out the next identifier. Strictly increasing per store.
    pub fn next_id(&self) -> u64 {
        self.ids.next_id()
    }

    pub fn add_user(&self, user: User) -> Result<User> {
        let mut users = self
            .users
            .write()
            .map_err(|_| ServiceError::Internal("Failed to acquire write lock".into()))?;

        users.push(user.clone());
        Ok(user)
    }

    /// Linear scan over registered users; first match wins.
    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| ServiceError::Internal("Failed to acquire read lock".into()))?;

        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    pub fn add_task(&self, task: Value) -> Result<()> {
        let mut tasks = self
            .tasks
            .write()
            .map_err(|_| ServiceError::Internal("Failed to acquire write lock".into()))?;

        tasks.push(task);
        Ok(())
    }

    /// All tasks in submission order.
    pub fn tasks(&self) -> Result<Vec<Value>> {
        let tasks = self
            .tasks
            .read()
            .map_err(|_| ServiceError::Internal("Failed to acquire read lock".into()))?;

        Ok(tasks.clone())
    }

    pub fn add_booking(&self, booking: Value) -> Result<()> {
        let mut bookings = self
            .bookings
            .write()
            .map_err(|_| ServiceError::Internal("Failed to acquire write lock".into()))?;

        bookings.push(booking);
        Ok(())
    }

    /// Bookings whose `customer_id` field equals the given id. The comparison
    /// is string equality; a numeric or missing field never matches.
    pub fn bookings_for_customer(&self, customer_id: &str) -> Result<Vec<Value>> {
        let bookings = self
            .bookings
            .read()
            .map_err(|_| ServiceError::Internal("Failed to acquire read lock".into()))?;

        let matching: Vec<Value> = bookings
            .iter()
            .filter(|b| b.get("customer_id").and_then(Value::as_str) == Some(customer_id))
            .cloned()
            .collect();

        Ok(matching)
    }

    pub fn taskers(&self) -> &[Tasker] {
        &self.taskers
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
