//! Delivery-related API endpoints

use std::time::Duration;

use courier_core::dto::delivery::{
    DeliveryResponse, DeliverySummary, HealthResponse, ResponseStatus, StartDeliveryRequest,
};

use crate::CourierClient;
use crate::error::{ClientError, Result};

impl CourierClient {
    /// Check that the server is up
    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self.client.get(self.url("/api/health")).send().await?;

        self.handle_response(response).await
    }

    /// Start a delivery
    ///
    /// A start refused because another delivery is running comes back from
    /// the server as a 200; it is surfaced here as [`ClientError::Rejected`].
    pub async fn start_delivery(&self, req: &StartDeliveryRequest) -> Result<DeliveryResponse> {
        let response = self
            .client
            .post(self.url("/api/delivery/start"))
            .json(req)
            .send()
            .await?;

        let body: DeliveryResponse = self.handle_response(response).await?;

        if body.status == ResponseStatus::Error {
            return Err(ClientError::Rejected(body.message));
        }

        Ok(body)
    }

    /// Get the current status of a delivery
    pub async fn get_delivery_status(&self, delivery_id: &str) -> Result<DeliveryResponse> {
        let url = self.url(&format!("/api/delivery/status/{}", delivery_id));
        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }

    /// List every delivery the server has run since startup
    pub async fn list_deliveries(&self) -> Result<Vec<DeliverySummary>> {
        let response = self.client.get(self.url("/api/deliveries")).send().await?;

        self.handle_response(response).await
    }

    /// Poll a delivery until it completes or fails
    ///
    /// # Arguments
    /// * `delivery_id` - The delivery to follow
    /// * `interval` - Delay between status queries
    pub async fn wait_for_delivery(
        &self,
        delivery_id: &str,
        interval: Duration,
    ) -> Result<DeliveryResponse> {
        loop {
            let status = self.get_delivery_status(delivery_id).await?;
            if status.status.is_terminal() {
                return Ok(status);
            }

            tracing::debug!("Delivery {} still {:?}", delivery_id, status.status);
            tokio::time::sleep(interval).await;
        }
    }
}
