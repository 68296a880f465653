//! Common fixtures for admin service integration tests

#![allow(dead_code, unreachable_pub, clippy::unwrap_used)]

use ridedesk_console::{Dashboard, DashboardOptions, HttpAdminService};
use ridedesk_core::Operator;
use serde_json::{Value, json};
use std::num::NonZeroUsize;
use wiremock::MockServer;

/// API key the mock server expects
pub const API_KEY: &str = "test-key";

/// File origin used for photo resolution
pub const FILE_BASE: &str = "http://files.test";

/// One request as the admin service serializes it
pub fn request_json(id: &str, status: &str) -> Value {
    json!({
        "requestId": id,
        "userName": format!("user-{id}"),
        "fromLocation": "Depot",
        "toLocation": "Market",
        "goodsDescription": "Rice sacks",
        "fare": 150.5,
        "status": status,
        "goodsPhoto1Url": format!("/uploads/{id}-1.jpg"),
        "createdAt": "2024-03-15T14:25:30",
    })
}

/// `{ "data": { "content": [...] } }` list body
pub fn list_body(records: &[(&str, &str)]) -> Value {
    let content: Vec<Value> = records
        .iter()
        .map(|(id, status)| request_json(id, status))
        .collect();
    json!({ "data": { "content": content } })
}

/// Twelve requests: five pending, four approved, three rejected
pub fn dozen() -> Vec<(&'static str, &'static str)> {
    vec![
        ("R1", "PENDING"),
        ("R2", "APPROVED"),
        ("R3", "REJECTED"),
        ("R4", "PENDING"),
        ("R5", "APPROVED"),
        ("R6", "PENDING"),
        ("R7", "REJECTED"),
        ("R8", "APPROVED"),
        ("R9", "PENDING"),
        ("R10", "APPROVED"),
        ("R11", "REJECTED"),
        ("R12", "PENDING"),
    ]
}

/// Operator used for approve/reject calls
pub fn operator() -> Operator {
    Operator {
        id: "7".to_string(),
        name: "Dana".to_string(),
        phone: "555-0100".to_string(),
    }
}

/// HTTP client pointed at `server`
pub fn client(server: &MockServer) -> HttpAdminService {
    HttpAdminService::new(server.uri())
        .unwrap()
        .with_api_key(API_KEY)
}

/// Dashboard over `server` with a page size of five
pub fn dashboard(server: &MockServer, reconcile: bool) -> Dashboard<HttpAdminService> {
    Dashboard::new(
        client(server),
        DashboardOptions {
            page_size: NonZeroUsize::new(5).unwrap(),
            file_base_url: FILE_BASE.to_string(),
            reconcile_after_action: reconcile,
        },
    )
}
