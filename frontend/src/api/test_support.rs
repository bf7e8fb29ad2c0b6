use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use httpmock::MockServer;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::ApiClient;
use crate::utils::storage::{MemorySessionStore, SessionStore};

pub const API_PREFIX: &str = "/api/v1";

/// Unsigned JWT carrying `claims`; the client never verifies signatures.
pub fn token_for(claims: Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.signature", header, payload)
}

pub fn employee_token() -> String {
    token_for(json!({ "userId": 7, "name": "Jane Doe", "roleName": "Accountant" }))
}

pub fn manager_token() -> String {
    token_for(json!({ "userId": 1, "name": "Mark Boss", "roleName": "Manager" }))
}

pub fn api_path(path: &str) -> String {
    format!("{}{}", API_PREFIX, path)
}

pub fn client_with_store(server: &MockServer, store: Arc<dyn SessionStore>) -> ApiClient {
    ApiClient::new_with_base_url(server.url(API_PREFIX), store)
}

pub fn signed_in_client(server: &MockServer, token: &str) -> (ApiClient, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::with_token(token));
    (client_with_store(server, store.clone()), store)
}

pub fn balance_json(leave_type: &str, balance: f64) -> Value {
    json!({ "leaveType": leave_type, "leaveBalance": balance })
}

pub fn own_request_json(id: u64, leave_type: &str, from: &str, to: &str, status: &str) -> Value {
    json!({
        "id": id,
        "leaveType": leave_type,
        "fromDate": from,
        "toDate": to,
        "status": status
    })
}

pub fn team_request_json(
    id: u64,
    employee: (&str, &str),
    leave_type: &str,
    from: &str,
    to: &str,
    status: &str,
) -> Value {
    json!({
        "id": id,
        "leaveType": leave_type,
        "fromDate": from,
        "toDate": to,
        "status": status,
        "EmployeeId": id + 100,
        "Employee": {
            "firstName": employee.0,
            "lastName": employee.1,
            "Leaves": [
                balance_json("annual", 10.0),
                balance_json("casual", 4.0),
                balance_json("sick", 7.0)
            ]
        }
    })
}
