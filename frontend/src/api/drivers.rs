use super::{
    client::ApiClient,
    types::{ApiError, DriverRecord, DutyStatusResponse, ToggleDutyRequest},
};

impl ApiClient {
    pub async fn toggle_duty(&self, id: &str) -> Result<DutyStatusResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let body = ToggleDutyRequest { id: id.to_string() };
        let response = self
            .send_put(&format!("{}/driver/toggleDuty", base_url), &body)
            .await?;
        self.map_json_response(response).await
    }

    pub async fn get_all_drivers(&self) -> Result<Vec<DriverRecord>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self.send_get(&format!("{}/driver/getAll", base_url)).await?;
        self.map_json_response(response).await
    }

    /// The backend exposes no per-driver lookup, so the duty page seeds its
    /// state from the full listing filtered by the session subject id.
    pub async fn find_driver(&self, id: &str) -> Result<Option<DriverRecord>, ApiError> {
        let drivers = self.get_all_drivers().await?;
        Ok(drivers.into_iter().find(|driver| driver.id == id))
    }
}
