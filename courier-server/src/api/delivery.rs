//! Delivery API Handlers
//!
//! HTTP endpoints for starting deliveries and following their status.

use axum::{
    Json,
    extract::{Path, State},
};
use courier_core::dto::delivery::{DeliveryResponse, DeliverySummary, StartDeliveryRequest};

use crate::api::error::ApiResult;
use crate::service::delivery_service;
use crate::state::AppState;

/// POST /api/delivery/start
/// Start a delivery unless one is already running
///
/// A rejection is still a 200 response, with `status: "error"` and no
/// delivery ID.
pub async fn start_delivery(
    State(state): State<AppState>,
    Json(req): Json<StartDeliveryRequest>,
) -> Json<DeliveryResponse> {
    tracing::info!("Delivery requested on interface {}", req.interface_name);

    match delivery_service::start_delivery(&state, req) {
        Ok(delivery) => Json(DeliveryResponse::accepted(&delivery)),
        Err(e) => {
            tracing::warn!("Delivery rejected: {:?}", e);
            Json(DeliveryResponse::rejected(e.to_string()))
        }
    }
}

/// GET /api/delivery/status/{delivery_id}
/// Get the status of a delivery
///
/// The ID is echoed back as given in the path (`01` stays `01`).
pub async fn get_delivery_status(
    State(state): State<AppState>,
    Path(delivery_id): Path<String>,
) -> ApiResult<Json<DeliveryResponse>> {
    tracing::debug!("Getting delivery status: {}", delivery_id);

    let delivery = delivery_service::get_delivery(&state, &delivery_id)?;

    Ok(Json(DeliveryResponse::from_delivery(&delivery, &delivery_id)))
}

/// GET /api/deliveries
/// List every delivery since startup
pub async fn list_deliveries(State(state): State<AppState>) -> Json<Vec<DeliverySummary>> {
    tracing::debug!("Listing deliveries");

    let deliveries = delivery_service::list_deliveries(&state);

    Json(deliveries.iter().map(DeliverySummary::from).collect())
}
