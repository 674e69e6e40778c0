use serde_json::{json, Value};

/// Caller-shaped task body, as a frontend would submit it.
pub fn task_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Test task",
        "budget": 50,
    })
}

/// Caller-shaped booking body for the given customer.
pub fn booking_body(customer_id: &str, tasker_id: &str) -> Value {
    json!({
        "customer_id": customer_id,
        "tasker_id": tasker_id,
        "date": "2024-06-01",
    })
}
