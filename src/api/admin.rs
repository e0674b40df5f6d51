use super::dto::{DashboardStats, LotCreated, LotInput, LotSpots, ManagedLot, Message};
use crate::error::ApiResult;
use crate::gateway::HttpGateway;

pub struct AdminApi<'a> {
    gateway: &'a HttpGateway,
}

impl<'a> AdminApi<'a> {
    pub(crate) fn new(gateway: &'a HttpGateway) -> Self { Self { gateway } }

    pub async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        self.gateway.get("/admin/dashboard/stats").await
    }

    pub async fn lots(&self) -> ApiResult<Vec<ManagedLot>> {
        self.gateway.get("/admin/lots").await
    }

    pub async fn lot(&self, lot_id: i64) -> ApiResult<ManagedLot> {
        self.gateway.get(&format!("/admin/lots/{}", lot_id)).await
    }

    pub async fn create_lot(&self, lot: &LotInput) -> ApiResult<LotCreated> {
        self.gateway.post("/admin/lots", lot).await
    }

    pub async fn update_lot(&self, lot_id: i64, lot: &LotInput) -> ApiResult<Message> {
        self.gateway.put(&format!("/admin/lots/{}", lot_id), lot).await
    }

    /// Refused by the backend while the lot has occupied spots.
    pub async fn delete_lot(&self, lot_id: i64) -> ApiResult<Message> {
        self.gateway.delete(&format!("/admin/lots/{}", lot_id)).await
    }

    pub async fn lot_spots(&self, lot_id: i64) -> ApiResult<LotSpots> {
        self.gateway.get(&format!("/admin/lots/{}/spots", lot_id)).await
    }
}
