use utoipa::OpenApi;

use crate::errors::ErrorResponse;
use crate::handlers::orders::{self, OrderRequest, OrderResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        orders::list_orders,
        orders::get_order,
        orders::create_order,
        orders::update_order,
        orders::delete_order,
    ),
    components(schemas(OrderRequest, OrderResponse, ErrorResponse)),
    tags((name = "orders", description = "Order management"))
)]
pub struct ApiDoc;
