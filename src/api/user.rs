use super::dto::{AvailableLot, BookRequest, Booking, ExportJob, ExportStatus, LeaveRequest, Release, Reservation};
use crate::error::ApiResult;
use crate::gateway::HttpGateway;

pub struct UserApi<'a> {
    gateway: &'a HttpGateway,
}

impl<'a> UserApi<'a> {
    pub(crate) fn new(gateway: &'a HttpGateway) -> Self { Self { gateway } }

    pub async fn lots(&self) -> ApiResult<Vec<AvailableLot>> {
        self.gateway.get("/user/lots").await
    }

    /// Take the first free spot in a lot.
    pub async fn book(&self, lot_id: i64) -> ApiResult<Booking> {
        self.gateway.post("/user/book", &BookRequest { lot_id }).await
    }

    pub async fn leave(&self, reservation_id: i64) -> ApiResult<Release> {
        self.gateway.post("/user/leave", &LeaveRequest { reservation_id }).await
    }

    pub async fn reservations(&self) -> ApiResult<Vec<Reservation>> {
        self.gateway.get("/user/my_reservations").await
    }

    pub async fn trigger_export(&self) -> ApiResult<ExportJob> {
        self.gateway.post("/user/export/trigger", &serde_json::json!({})).await
    }

    pub async fn export_status(&self) -> ApiResult<ExportStatus> {
        self.gateway.get("/user/export/status").await
    }

    /// Raw CSV bytes of a finished export.
    pub async fn download_export(&self, job_id: i64) -> ApiResult<Vec<u8>> {
        self.gateway.get_bytes(&format!("/user/export/download/{}", job_id)).await
    }
}
