//! Customer route handlers.
//!
//! A thin pass-through layer: route, DTO, service call, status code. All
//! decision logic lives in [`crate::services::CustomerService`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use tracing::instrument;

use crm_core::{Customer, CustomerId, CustomerPatch};

use crate::error::Result;
use crate::state::AppState;

/// Body of `POST /api/v1/customers`.
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    pub address: String,
}

/// Query parameters of `GET /api/v1/customers`.
#[derive(Debug, Deserialize)]
pub struct ListCustomersQuery {
    pub address: Option<String>,
}

/// Query parameters of `PUT /api/v1/customers/{id}`.
///
/// An absent parameter is the no-op sentinel: the stored value is kept.
#[derive(Debug, Deserialize)]
pub struct UpdateCustomerParams {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl From<UpdateCustomerParams> for CustomerPatch {
    fn from(params: UpdateCustomerParams) -> Self {
        Self {
            name: params.name,
            email: params.email,
            address: params.address,
        }
    }
}

/// Create a customer. Returns 200 with an empty body.
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<StatusCode> {
    state
        .customers()
        .create_customer(request.name, request.email, request.address)
        .await?;

    Ok(StatusCode::OK)
}

/// List customers, optionally filtered by exact address.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListCustomersQuery>,
) -> Result<Json<Vec<Customer>>> {
    let customers = match query.address {
        Some(address) => {
            state
                .customers()
                .get_customers_by_address(&address)
                .await?
        }
        None => state.customers().get_customers().await?,
    };

    Ok(Json(customers))
}

/// Get a single customer by id.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<Json<Customer>> {
    let customer = state.customers().get_customer_by_id(id).await?;

    Ok(Json(customer))
}

/// Partially update a customer from optional query parameters.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
    Query(params): Query<UpdateCustomerParams>,
) -> Result<StatusCode> {
    state
        .customers()
        .update_customer(id, params.into())
        .await?;

    Ok(StatusCode::OK)
}

/// Delete a customer by id.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<StatusCode> {
    state.customers().delete_customer(id).await?;

    Ok(StatusCode::OK)
}
