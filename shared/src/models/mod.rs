use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Returns the current time as an RFC 3339 string, the format every
/// `created_at` field uses.
pub fn now_str() -> String {
    Utc::now().to_rfc3339()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// One entry of the tasker fixture. Read-only at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tasker {
    pub id: String,
    pub name: String,
    pub skills: Vec<String>,
    pub hourly_rate: u32,
    pub bio: String,
}

// Request DTOs
#[derive(Deserialize, Debug)]
pub struct RegisterCustomerRequest {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
}

// Response DTOs
#[derive(Serialize, Debug)]
pub struct RegisterCustomerResponse {
    pub message: String,
    pub user_id: String,
    pub email: String,
}

#[derive(Serialize, Debug)]
pub struct LoginResponse {
    pub message: String,
    pub user_id: String,
    pub email: String,
    pub name: String,
    /// Duplicate of `name`, kept for older frontend callers.
    pub user_name: String,
    pub role: String,
}

#[derive(Serialize, Debug)]
pub struct StatusResponse {
    pub message: String,
    pub status: String,
}

impl StatusResponse {
    pub fn success(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status: "success".to_string(),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status: "error".to_string(),
        }
    }
}
