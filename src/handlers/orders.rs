use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::DynOrderService;
use crate::domain::order::{Order, OrderId};
use crate::errors::{AppError, ErrorResponse};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Omit to let the store assign an id.
    pub id: Option<OrderId>,
    pub product_name: Option<String>,
    pub product_id: Option<i64>,
    /// Non-negative amount in the smallest currency unit.
    pub price: Option<u32>,
}

impl From<OrderRequest> for Order {
    fn from(req: OrderRequest) -> Self {
        Order {
            id: req.id,
            product_name: req.product_name,
            product_id: req.product_id,
            price: req.price,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Option<OrderId>,
    pub product_name: Option<String>,
    pub product_id: Option<i64>,
    pub price: Option<u32>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.id,
            product_name: order.product_name,
            product_id: order.product_id,
            price: order.price,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /order
///
/// Returns every stored order, ordered by id.
#[utoipa::path(
    get,
    path = "/order",
    responses(
        (status = 200, description = "All orders", body = [OrderResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn list_orders(service: web::Data<DynOrderService>) -> Result<HttpResponse, AppError> {
    let orders = web::block(move || service.find_all_orders())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /order/{id}
#[utoipa::path(
    get,
    path = "/order/{id}",
    params(
        ("id" = i64, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<DynOrderService>,
    path: web::Path<OrderId>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let result = web::block(move || service.find_order_by_id(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match result {
        Some(order) => Ok(HttpResponse::Ok().json(OrderResponse::from(order))),
        None => Err(AppError::NotFound),
    }
}

/// POST /order
///
/// Inserts the order, or overwrites the stored one when the body carries an
/// id that already exists. A `null` body is rejected.
#[utoipa::path(
    post,
    path = "/order",
    request_body = OrderRequest,
    responses(
        (status = 201, description = "Order saved", body = OrderResponse),
        (status = 400, description = "Missing or malformed order", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<DynOrderService>,
    body: web::Json<Option<OrderRequest>>,
) -> Result<HttpResponse, AppError> {
    let order = body.into_inner().map(Order::from);

    let saved = web::block(move || service.save_order(order))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(OrderResponse::from(saved)))
}

/// PUT /order/{id}
///
/// Replaces the whole stored order. The path id wins; a body id that
/// disagrees with it is rejected.
#[utoipa::path(
    put,
    path = "/order/{id}",
    params(
        ("id" = i64, Path, description = "Order id"),
    ),
    request_body = OrderRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 400, description = "Malformed order or mismatched id", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn update_order(
    service: web::Data<DynOrderService>,
    path: web::Path<OrderId>,
    body: web::Json<OrderRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let body = body.into_inner();

    if let Some(body_id) = body.id.filter(|&body_id| body_id != order_id) {
        return Err(AppError::BadRequest(format!(
            "body id {} does not match path id {}",
            body_id, order_id
        )));
    }
    let order = Order::from(body).with_id(order_id);

    let updated = web::block(move || service.update_order(order))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(updated)))
}

/// DELETE /order/{id}
///
/// Succeeds whether or not the order existed.
#[utoipa::path(
    delete,
    path = "/order/{id}",
    params(
        ("id" = i64, Path, description = "Order id"),
    ),
    responses(
        (status = 204, description = "Order absent after the call"),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    service: web::Data<DynOrderService>,
    path: web::Path<OrderId>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    web::block(move || service.delete_order_by_id(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::NoContent().finish())
}
