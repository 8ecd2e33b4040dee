use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::order_service::OrderService;
use crate::domain::order::{Order, OrderItem, OrderRequestItem};
use crate::domain::ports::{BookInfoProvider, OrderRepository};
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    pub book_id: i64,
    pub quantity: i32,
}

impl From<OrderItemRequest> for OrderRequestItem {
    fn from(r: OrderItemRequest) -> Self {
        OrderRequestItem {
            book_id: r.book_id,
            quantity: r.quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItemResponse {
    pub book_id: i64,
    pub quantity: i32,
    /// Unit price at the time the order was placed, e.g. "9.99"
    pub price: String,
    pub book_title: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i64,
    pub customer_id: i64,
    /// Sum of price × quantity over the items, as a decimal string
    pub total: String,
    /// RFC 3339 timestamp
    pub order_date: String,
    pub items: Vec<OrderItemResponse>,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(i: OrderItem) -> Self {
        OrderItemResponse {
            book_id: i.book_id,
            quantity: i.quantity,
            price: i.price.to_string(),
            book_title: i.book_title,
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        OrderResponse {
            id: o.id,
            customer_id: o.customer_id,
            total: o.total.to_string(),
            order_date: o.order_date.to_rfc3339(),
            items: o.items.into_iter().map(Into::into).collect(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /customers/{customer_id}/orders
///
/// Places an order for the customer. Prices come from the catalog, never
/// from the request.
#[utoipa::path(
    post,
    path = "/customers/{customer_id}/orders",
    params(
        ("customer_id" = i64, Path, description = "Customer id"),
    ),
    request_body = Vec<OrderItemRequest>,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Invalid order request"),
        (status = 502, description = "Book catalog lookup failed"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order<R: OrderRepository, B: BookInfoProvider>(
    service: web::Data<OrderService<R, B>>,
    path: web::Path<i64>,
    body: web::Json<Vec<OrderItemRequest>>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();
    let items: Vec<OrderRequestItem> = body.into_inner().into_iter().map(Into::into).collect();

    let order = web::block(move || service.make_order(customer_id, items))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /customers/{customer_id}/orders
///
/// Returns the customer's orders, newest first.
#[utoipa::path(
    get,
    path = "/customers/{customer_id}/orders",
    params(
        ("customer_id" = i64, Path, description = "Customer id"),
    ),
    responses(
        (status = 200, description = "Order history", body = Vec<OrderResponse>),
        (status = 502, description = "Book catalog lookup failed"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders<R: OrderRepository, B: BookInfoProvider>(
    service: web::Data<OrderService<R, B>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();

    let orders = web::block(move || service.get_orders_by_customer(customer_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<OrderResponse> = orders.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}
