use std::sync::Arc;

use http::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use url::form_urlencoded;

use taskhub_shared::error::{Result, ServiceError};
use taskhub_shared::models::{
    now_str, LoginRequest, LoginResponse, RegisterCustomerRequest, RegisterCustomerResponse,
    StatusResponse, User,
};
use taskhub_shared::store::MemoryStore;

/// Synthesizes backend responses from the in-memory store when the real
/// backend is unreachable.
///
/// Every POST handler appends exactly one record to its collection; GET
/// handlers are read-only. The only business failure a handler raises is a
/// login lookup miss; an unknown route degrades to a normal payload instead.
#[derive(Clone)]
pub struct MockResponder {
    store: Arc<MemoryStore>,
}

impl MockResponder {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    /// Routes a (path, method) pair to its canned handler. The path may carry
    /// a query string; it is split off before matching.
    pub fn dispatch(&self, path: &str, method: &Method, body: Option<&str>) -> Result<Value> {
        let (route, query) = split_query(path);
        log::debug!("Dispatching mock request: {} {}", method, route);

        match route {
            "/" => Ok(serde_json::to_value(StatusResponse::success(
                "Backend running",
            ))?),
            "/register/customer" if method == Method::POST => self.register_customer(body),
            "/login/customer" if method == Method::POST => self.login_customer(body),
            "/tasks" if method == Method::GET => self.list_tasks(),
            "/tasks" if method == Method::POST => self.create_task(body),
            "/taskers" if method == Method::GET => Ok(json!({ "taskers": self.store.taskers() })),
            "/bookings" if method == Method::GET => self.list_bookings(query),
            "/bookings" if method == Method::POST => self.create_booking(body),
            _ => {
                log::debug!("No mock handler for {} {}", method, route);
                Ok(serde_json::to_value(StatusResponse::error(
                    "Endpoint not found",
                ))?)
            }
        }
    }

    fn register_customer(&self, body: Option<&str>) -> Result<Value> {
        let request: RegisterCustomerRequest = parse_body(body)?;

        let user = User {
            id: self.store.next_id().to_string(),
            name: request.name,
            email: request.email,
            role: "customer".to_string(),
        };
        let user = self.store.add_user(user)?;
        log::info!("Registered mock customer {}", user.id);

        Ok(serde_json::to_value(RegisterCustomerResponse {
            message: "Customer registered successfully".to_string(),
            user_id: user.id,
            email: user.email,
        })?)
    }

    fn login_customer(&self, body: Option<&str>) -> Result<Value> {
        let request: LoginRequest = parse_body(body)?;

        let user = self
            .store
            .find_user_by_email(&request.email)?
            .ok_or(ServiceError::InvalidCredentials)?;

        Ok(serde_json::to_value(LoginResponse {
            message: "Login successful".to_string(),
            user_id: user.id,
            email: user.email,
            name: user.name.clone(),
            user_name: user.name,
            role: user.role,
        })?)
    }

    fn list_tasks(&self) -> Result<Value> {
        Ok(json!({ "tasks": self.store.tasks()? }))
    }

    fn create_task(&self, body: Option<&str>) -> Result<Value> {
        let mut task = parse_object(body)?;
        // Fresh id and timestamp always win over caller-supplied ones.
        task.insert("id".to_string(), Value::from(self.store.next_id()));
        task.insert("created_at".to_string(), Value::from(now_str()));

        let task = Value::Object(task);
        self.store.add_task(task.clone())?;

        Ok(json!({ "message": "Task created", "task": task }))
    }

    fn list_bookings(&self, query: Option<&str>) -> Result<Value> {
        let customer_id = query.and_then(|q| {
            form_urlencoded::parse(q.as_bytes())
                .find(|(key, _)| key == "customer_id")
                .map(|(_, value)| value.into_owned())
        });

        let bookings = match customer_id {
            Some(id) => self.store.bookings_for_customer(&id)?,
            // Without a customer_id there is nothing to match against.
            None => Vec::new(),
        };

        Ok(json!({ "bookings": bookings }))
    }

    fn create_booking(&self, body: Option<&str>) -> Result<Value> {
        let mut booking = parse_object(body)?;
        booking.insert("id".to_string(), Value::from(self.store.next_id()));
        booking.insert("status".to_string(), Value::from("pending"));
        booking.insert("created_at".to_string(), Value::from(now_str()));

        let booking = Value::Object(booking);
        self.store.add_booking(booking.clone())?;

        Ok(json!({ "message": "Booking created", "booking": booking }))
    }
}

fn split_query(path: &str) -> (&str, Option<&str>) {
    match path.split_once('?') {
        Some((route, query)) => (route, Some(query)),
        None => (path, None),
    }
}

/// Parses a typed request body. An absent body is treated as an empty object
/// so missing fields surface as validation errors rather than panics; a
/// present-but-invalid body fails outright.
fn parse_body<T: DeserializeOwned>(body: Option<&str>) -> Result<T> {
    Ok(serde_json::from_str(body.unwrap_or("{}"))?)
}

/// Parses a free-form body that must be a JSON object.
fn parse_object(body: Option<&str>) -> Result<Map<String, Value>> {
    match body {
        None => Ok(Map::new()),
        Some(raw) => match serde_json::from_str::<Value>(raw)? {
            Value::Object(map) => Ok(map),
            other => Err(ServiceError::Validation(format!(
                "Expected a JSON object body, got: {}",
                other
            ))),
        },
    }
}
