use chrono::{DateTime, NaiveDate};
use leavedesk_core::AllocationError;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Payload of the session token, as issued by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    #[serde(default, deserialize_with = "optional_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role_name: Option<String>,
}

impl Claims {
    pub fn role(&self) -> Role {
        self.role_name
            .as_deref()
            .map(Role::from_claim)
            .unwrap_or(Role::Employee)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unknown")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Employee,
    Manager,
}

impl Role {
    /// Backend role names; employees are issued the "Accountant" role.
    pub fn from_claim(value: &str) -> Self {
        if value.eq_ignore_ascii_case("manager") {
            Role::Manager
        } else {
            Role::Employee
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalanceResponse {
    pub leave_type: String,
    pub leave_balance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "Leaves", default)]
    pub leaves: Vec<LeaveBalanceResponse>,
}

impl EmployeeResponse {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequestResponse {
    #[serde(deserialize_with = "required_id")]
    pub id: String,
    pub leave_type: String,
    #[serde(deserialize_with = "iso_date")]
    pub from_date: NaiveDate,
    #[serde(deserialize_with = "iso_date")]
    pub to_date: NaiveDate,
    pub status: String,
    #[serde(rename = "EmployeeId", default, deserialize_with = "optional_id")]
    pub employee_id: Option<String>,
    #[serde(rename = "Employee", default)]
    pub employee: Option<EmployeeResponse>,
}

impl LeaveRequestResponse {
    pub fn status(&self) -> Option<LeaveStatus> {
        LeaveStatus::from_wire(&self.status)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveRequest {
    pub leave_type: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(LeaveStatus::Pending),
            "approved" => Some(LeaveStatus::Approved),
            "rejected" => Some(LeaveStatus::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLeaveStatus {
    pub status: LeaveStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    #[serde(default = "unknown_code")]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

fn unknown_code() -> String {
    "UNKNOWN".to_string()
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ApiError {}

impl From<AllocationError> for ApiError {
    fn from(error: AllocationError) -> Self {
        Self {
            error: error.to_string(),
            code: "VALIDATION_ERROR".to_string(),
            details: Some(serde_json::json!({ "check": error.code() })),
        }
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "VALIDATION_ERROR".to_string(),
            details: None,
        }
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNKNOWN".to_string(),
            details: None,
        }
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "REQUEST_FAILED".to_string(),
            details: None,
        }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNAUTHORIZED".to_string(),
            details: None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == "UNAUTHORIZED"
    }
}

fn id_from_value<E: de::Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(E::custom(format!("expected string or number id, got {}", other))),
    }
}

fn required_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    id_from_value(Value::deserialize(deserializer)?)?
        .ok_or_else(|| de::Error::custom("id must not be null"))
}

fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    id_from_value(Value::deserialize(deserializer)?)
}

// The backend stores DATEONLY columns but some deployments serialise them as
// full timestamps.
fn iso_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(&raw)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|_| de::Error::custom(format!("invalid ISO date: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialize_login_request_camel_case_fields() {
        let req = LoginRequest {
            user_name: "jdoe".into(),
            password: "secret".into(),
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v, json!({ "userName": "jdoe", "password": "secret" }));
    }

    #[test]
    fn serialize_create_leave_request_uses_plain_dates() {
        let req = CreateLeaveRequest {
            leave_type: "annual".into(),
            from_date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["leaveType"], json!("annual"));
        assert_eq!(v["fromDate"], json!("2024-01-08"));
        assert_eq!(v["toDate"], json!("2024-01-12"));
    }

    #[test]
    fn deserialize_manager_view_of_leave_request() {
        let value = json!({
            "id": 42,
            "leaveType": "annual",
            "fromDate": "2024-01-08",
            "toDate": "2024-01-12T00:00:00.000Z",
            "status": "pending",
            "EmployeeId": 7,
            "Employee": {
                "firstName": "Jane",
                "lastName": "Doe",
                "Leaves": [{ "leaveType": "annual", "leaveBalance": 10 }]
            }
        });
        let req: LeaveRequestResponse = serde_json::from_value(value).unwrap();
        assert_eq!(req.id, "42");
        assert_eq!(req.employee_id.as_deref(), Some("7"));
        assert_eq!(req.to_date, NaiveDate::from_ymd_opt(2024, 1, 12).unwrap());
        assert_eq!(req.status(), Some(LeaveStatus::Pending));
        let employee = req.employee.unwrap();
        assert_eq!(employee.full_name(), "Jane Doe");
        assert_eq!(employee.leaves[0].leave_balance, 10.0);
    }

    #[test]
    fn deserialize_employee_view_without_employee_block() {
        let value = json!({
            "id": "r-1",
            "leaveType": "sick",
            "fromDate": "2024-02-01",
            "toDate": "2024-02-02",
            "status": "approved"
        });
        let req: LeaveRequestResponse = serde_json::from_value(value).unwrap();
        assert!(req.employee.is_none());
        assert!(req.employee_id.is_none());
        assert_eq!(req.status().map(|s| s.as_str()), Some("approved"));
    }

    #[test]
    fn rejects_malformed_dates() {
        let value = json!({
            "id": "r-1",
            "leaveType": "sick",
            "fromDate": "tomorrow",
            "toDate": "2024-02-02",
            "status": "approved"
        });
        assert!(serde_json::from_value::<LeaveRequestResponse>(value).is_err());
    }

    #[test]
    fn update_status_serializes_lower_case() {
        let v = serde_json::to_value(UpdateLeaveStatus {
            status: LeaveStatus::Rejected,
        })
        .unwrap();
        assert_eq!(v, json!({ "status": "rejected" }));
    }

    #[test]
    fn claims_map_role_names() {
        let claims: Claims = serde_json::from_value(json!({
            "userId": 3,
            "name": "Jane Doe",
            "roleName": "Manager"
        }))
        .unwrap();
        assert_eq!(claims.user_id.as_deref(), Some("3"));
        assert_eq!(claims.role(), Role::Manager);
        assert_eq!(Role::from_claim("Accountant"), Role::Employee);
    }

    #[test]
    fn allocation_errors_become_validation_errors() {
        let err = ApiError::from(AllocationError::ZeroBalance {
            leave_type: "Annual".into(),
        });
        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(
            err.error,
            "Cannot perform allocation: The leave type \"Annual\" has zero days."
        );
        assert_eq!(err.details, Some(json!({ "check": "ZERO_BALANCE" })));
    }
}
