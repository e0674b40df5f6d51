//! Request and response payloads of the parking backend.

use serde::{Deserialize, Serialize};

use crate::identity::Role;

/// Plain `{"msg": ...}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub msg: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub role: Role,
    pub user_id: SubjectId,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
}

/// The backend only acknowledges registration, but a deployment that signs the new
/// account in straight away also returns the login fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub msg: String,
    pub user_id: SubjectId,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Subject ids arrive as JSON numbers from login and as strings elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SubjectId {
    Num(i64),
    Text(String),
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubjectId::Num(n) => write!(f, "{}", n),
            SubjectId::Text(s) => f.write_str(s),
        }
    }
}

/// Lot as listed to a signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableLot {
    pub id: i64,
    pub name: String,
    pub price_per_hour: f64,
    pub available_spots: i64,
    pub total_spots: i64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookRequest {
    pub lot_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default)]
    pub msg: String,
    pub lot_id: i64,
    pub reservation_id: i64,
    pub spot_id: i64,
    pub spot_number: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaveRequest {
    pub reservation_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub msg: String,
    pub parking_cost: f64,
    pub duration_minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub spot_id: i64,
    #[serde(default)]
    pub spot_number: Option<i64>,
    #[serde(default)]
    pub lot_id: Option<i64>,
    #[serde(default)]
    pub parking_timestamp: Option<String>,
    #[serde(default)]
    pub leaving_timestamp: Option<String>,
    #[serde(default)]
    pub parking_cost: Option<f64>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportJob {
    #[serde(default)]
    pub msg: String,
    pub job_id: i64,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportStatus {
    pub job_id: i64,
    pub status: String,
    #[serde(default)]
    pub requested_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

impl ExportStatus {
    pub fn is_done(&self) -> bool { self.status.eq_ignore_ascii_case("done") }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_lots: i64,
    pub total_spots: i64,
    pub occupied_spots: i64,
    pub available_spots: i64,
    pub occupancy_rate: f64,
    pub active_reservations: i64,
    pub total_users: i64,
    pub today_revenue: f64,
    pub month_revenue: f64,
}

/// Lot as managed by an admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagedLot {
    pub id: i64,
    pub name: String,
    pub price_per_hour: f64,
    pub number_of_spots: i64,
    #[serde(default)]
    pub occupied: i64,
    #[serde(default)]
    pub available: i64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Create/update payload. Unset fields are left out so updates stay partial.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LotInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_hour: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_spots: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotCreated {
    #[serde(default)]
    pub msg: String,
    pub lot_id: i64,
    pub spots_created: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotReservation {
    pub reservation_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub parking_timestamp: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    pub id: i64,
    pub spot_number: i64,
    /// "A" available, "O" occupied.
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub reservation: Option<SpotReservation>,
}

impl Spot {
    pub fn is_occupied(&self) -> bool { self.status == "O" }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotSpots {
    pub lot: LotRef,
    pub spots: Vec<Spot>,
}
