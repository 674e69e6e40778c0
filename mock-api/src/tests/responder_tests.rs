use std::sync::Arc;

use http::Method;
use serde_json::{json, Value};

use taskhub_shared::error::ServiceError;
use taskhub_shared::store::MemoryStore;
use taskhub_shared::test_utils::{booking_body, init_test_logging, task_body};

use crate::responder::MockResponder;

fn test_responder() -> MockResponder {
    init_test_logging();
    MockResponder::new(Arc::new(MemoryStore::new()))
}

fn register_body(name: &str, email: &str) -> String {
    json!({ "name": name, "email": email }).to_string()
}

#[test]
fn test_liveness_route() {
    let responder = test_responder();

    let value = responder.dispatch("/", &Method::GET, None).unwrap();
    assert_eq!(value["message"], "Backend running");
    assert_eq!(value["status"], "success");
}

#[test]
fn test_register_then_login_returns_same_user_id() {
    let responder = test_responder();

    let registered = responder
        .dispatch(
            "/register/customer",
            &Method::POST,
            Some(&register_body("Alice", "alice@example.com")),
        )
        .unwrap();
    assert_eq!(registered["message"], "Customer registered successfully");
    assert_eq!(registered["email"], "alice@example.com");

    let logged_in = responder
        .dispatch(
            "/login/customer",
            &Method::POST,
            Some(&json!({ "email": "alice@example.com" }).to_string()),
        )
        .unwrap();

    assert_eq!(logged_in["message"], "Login successful");
    assert_eq!(logged_in["user_id"], registered["user_id"]);
    assert_eq!(logged_in["name"], "Alice");
    // Compatibility duplicate expected by older frontend callers.
    assert_eq!(logged_in["user_name"], "Alice");
    assert_eq!(logged_in["role"], "customer");
}

#[test]
fn test_login_unknown_email_is_invalid_credentials() {
    let responder = test_responder();

    let result = responder.dispatch(
        "/login/customer",
        &Method::POST,
        Some(&json!({ "email": "nobody@example.com" }).to_string()),
    );

    assert!(matches!(result, Err(ServiceError::InvalidCredentials)));
}

#[test]
fn test_create_task_echoes_body_and_assigns_fresh_fields() {
    let responder = test_responder();

    let body = json!({
        "title": "Fix the sink",
        "budget": 80,
        // A caller-supplied id must be replaced, not trusted.
        "id": 12345,
    });
    let value = responder
        .dispatch("/tasks", &Method::POST, Some(&body.to_string()))
        .unwrap();

    assert_eq!(value["message"], "Task created");
    let task = &value["task"];
    assert_eq!(task["title"], "Fix the sink");
    assert_eq!(task["budget"], 80);
    assert_ne!(task["id"], 12345);
    assert!(task["id"].is_u64());
    assert!(task["created_at"].is_string());
}

#[test]
fn test_list_tasks_preserves_submission_order() {
    let responder = test_responder();

    for i in 0..4 {
        responder
            .dispatch(
                "/tasks",
                &Method::POST,
                Some(&task_body(&format!("task-{}", i)).to_string()),
            )
            .unwrap();
    }

    let value = responder.dispatch("/tasks", &Method::GET, None).unwrap();
    let tasks = value["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 4);
    for (i, task) in tasks.iter().enumerate() {
        assert_eq!(task["title"], format!("task-{}", i));
    }
}

#[test]
fn test_bookings_filter_by_query_customer_id() {
    let responder = test_responder();

    for customer in ["7", "8", "7"] {
        responder
            .dispatch(
                "/bookings",
                &Method::POST,
                Some(&booking_body(customer, "1").to_string()),
            )
            .unwrap();
    }

    let value = responder
        .dispatch("/bookings?customer_id=7", &Method::GET, None)
        .unwrap();
    let bookings = value["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 2);
    for booking in bookings {
        assert_eq!(booking["customer_id"], "7");
        assert_eq!(booking["status"], "pending");
    }
}

#[test]
fn test_bookings_without_customer_id_match_nothing() {
    let responder = test_responder();

    responder
        .dispatch(
            "/bookings",
            &Method::POST,
            Some(&booking_body("7", "1").to_string()),
        )
        .unwrap();

    let value = responder.dispatch("/bookings", &Method::GET, None).unwrap();
    assert_eq!(value["bookings"], json!([]));
}

#[test]
fn test_taskers_seed_is_fixed() {
    let responder = test_responder();

    // Unrelated traffic must not disturb the fixture.
    responder
        .dispatch("/tasks", &Method::POST, Some(&task_body("noise").to_string()))
        .unwrap();

    let value = responder.dispatch("/taskers", &Method::GET, None).unwrap();
    let taskers = value["taskers"].as_array().unwrap();
    assert_eq!(taskers.len(), 3);
    assert_eq!(taskers[0]["name"], "John Smith");
    assert_eq!(taskers[1]["name"], "Sarah Johnson");
    assert_eq!(taskers[2]["name"], "Mike Wilson");
}

#[test]
fn test_unknown_path_returns_not_found_payload() {
    let responder = test_responder();

    let value = responder
        .dispatch("/nonsense", &Method::GET, None)
        .unwrap();
    assert_eq!(value["message"], "Endpoint not found");
    assert_eq!(value["status"], "error");
}

#[test]
fn test_unsupported_method_falls_through_to_not_found() {
    let responder = test_responder();

    let value = responder.dispatch("/tasks", &Method::DELETE, None).unwrap();
    assert_eq!(value["message"], "Endpoint not found");
}

#[test]
fn test_malformed_body_is_a_validation_error() {
    let responder = test_responder();

    let result = responder.dispatch("/tasks", &Method::POST, Some("{not json"));
    assert!(matches!(result, Err(ServiceError::Validation(_))));

    let result = responder.dispatch("/tasks", &Method::POST, Some("[1, 2, 3]"));
    assert!(matches!(result, Err(ServiceError::Validation(_))));
}

#[test]
fn test_absent_body_defaults_to_empty_object() {
    let responder = test_responder();

    let value = responder.dispatch("/tasks", &Method::POST, None).unwrap();
    let task = value["task"].as_object().unwrap();
    // Only the synthesized fields are present.
    assert_eq!(task.len(), 2);
    assert!(task.contains_key("id"));
    assert!(task.contains_key("created_at"));
    assert_eq!(responder.store().tasks().unwrap().len(), 1);
}

#[test]
fn test_register_missing_fields_is_a_validation_error() {
    let responder = test_responder();

    let result = responder.dispatch(
        "/register/customer",
        &Method::POST,
        Some(&json!({ "name": "No Email" }).to_string()),
    );
    assert!(matches!(result, Err(ServiceError::Validation(_))));

    let result = responder.dispatch("/register/customer", &Method::POST, None);
    assert!(matches!(result, Err(ServiceError::Validation(_))));
}

#[test]
fn test_task_ids_are_unique_under_rapid_creation() {
    let responder = test_responder();

    for _ in 0..50 {
        responder.dispatch("/tasks", &Method::POST, None).unwrap();
    }

    let value = responder.dispatch("/tasks", &Method::GET, None).unwrap();
    let mut ids: Vec<u64> = value["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_u64().unwrap())
        .collect();
    let len = ids.len();
    ids.dedup();
    assert_eq!(ids.len(), len);
}

#[test]
fn test_two_responders_do_not_share_state() {
    let first = test_responder();
    let second = test_responder();

    first
        .dispatch(
            "/register/customer",
            &Method::POST,
            Some(&register_body("Alice", "alice@example.com")),
        )
        .unwrap();

    let result = second.dispatch(
        "/login/customer",
        &Method::POST,
        Some(&json!({ "email": "alice@example.com" }).to_string()),
    );
    assert!(matches!(result, Err(ServiceError::InvalidCredentials)));
}

#[test]
fn test_response_is_json_value() {
    let responder = test_responder();

    let value = responder.dispatch("/", &Method::GET, None).unwrap();
    assert!(matches!(value, Value::Object(_)));
}
