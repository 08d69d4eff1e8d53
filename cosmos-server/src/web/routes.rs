//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::domain::DomainError;
use crate::planner::{SortKey, UnknownSortKey};
use crate::service::{BookingRequest, RefreshError, ReservationError};
use crate::store::StoreError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/price-lists", get(list_price_lists))
        .route("/price-lists/refresh", post(refresh_price_lists))
        .route("/planets", get(planets))
        .route("/companies", get(companies))
        .route("/destinations", get(destinations))
        .route("/routes", get(search_routes))
        .route(
            "/reservations",
            get(list_reservations).post(create_reservation),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Cached price lists, most recent first.
async fn list_price_lists(
    State(state): State<AppState>,
) -> Result<Json<PriceListsResponse>, AppError> {
    let now = Utc::now();
    let price_lists = state
        .service
        .price_lists()?
        .iter()
        .map(|list| PriceListSummary::from_price_list(list, now))
        .collect();

    Ok(Json(PriceListsResponse { price_lists }))
}

/// Fetch the current price list now.
async fn refresh_price_lists(
    State(state): State<AppState>,
) -> Result<Json<RefreshResponse>, AppError> {
    let outcome = state.service.refresh().await?;
    Ok(Json(outcome.into()))
}

/// Planets in the active price list.
async fn planets(State(state): State<AppState>) -> Result<Json<PlanetsResponse>, AppError> {
    let planets = state.service.planets()?;
    Ok(Json(PlanetsResponse::from_planets(planets)))
}

/// Companies in the active price list.
async fn companies(State(state): State<AppState>) -> Result<Json<CompaniesResponse>, AppError> {
    let companies = state.service.companies()?;
    Ok(Json(CompaniesResponse { companies }))
}

/// Destinations to offer once an origin is chosen.
async fn destinations(
    State(state): State<AppState>,
    Query(req): Query<DestinationsQuery>,
) -> Result<Json<PlanetsResponse>, AppError> {
    let planets = state.service.destinations(req.origin.as_deref())?;
    Ok(Json(PlanetsResponse::from_planets(planets)))
}

/// Search, filter and sort routes.
async fn search_routes(
    State(state): State<AppState>,
    Query(req): Query<RoutesQuery>,
) -> Result<Json<RoutesResponse>, AppError> {
    let sort = match req.sort.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(s) => s.parse::<SortKey>()?,
        None => SortKey::default(),
    };

    let routes = state
        .service
        .routes(
            req.origin.as_deref().unwrap_or_default(),
            req.destination.as_deref().unwrap_or_default(),
            req.company.as_deref(),
            sort,
        )
        .await?;

    Ok(Json(RoutesResponse {
        routes: routes.iter().map(RouteResult::from_route).collect(),
        sort: sort.to_string(),
    }))
}

/// Stored reservations, newest first.
async fn list_reservations(
    State(state): State<AppState>,
) -> Result<Json<ReservationsResponse>, AppError> {
    let reservations = state
        .service
        .reservations()?
        .iter()
        .map(ReservationResult::from_reservation)
        .collect();

    Ok(Json(ReservationsResponse { reservations }))
}

/// Book a route from the active price list.
async fn create_reservation(
    State(state): State<AppState>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let request = BookingRequest {
        origin: req.origin,
        destination: req.destination,
        route_id: req.route_id,
        first_name: req.first_name,
        last_name: req.last_name,
    };

    let reservation = state.service.reserve(request, Utc::now()).await?;
    info!(reservation = %reservation.id, "Reservation created");

    Ok((
        StatusCode::CREATED,
        Json(ReservationResult::from_reservation(&reservation)),
    ))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<UnknownSortKey> for AppError {
    fn from(e: UnknownSortKey) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<RefreshError> for AppError {
    fn from(e: RefreshError) -> Self {
        let message = e.to_string();
        match e {
            RefreshError::Feed(_) => AppError::BadGateway { message },
            RefreshError::Store(_) => AppError::Internal { message },
        }
    }
}

impl From<ReservationError> for AppError {
    fn from(e: ReservationError) -> Self {
        let message = e.to_string();
        match e {
            ReservationError::NoActivePriceList => AppError::Conflict { message },
            ReservationError::RouteNotFound { .. } => AppError::NotFound { message },
            ReservationError::Domain(DomainError::PriceListExpired { .. }) => {
                AppError::Conflict { message }
            }
            ReservationError::Domain(DomainError::BlankName(_)) => AppError::BadRequest { message },
            ReservationError::Domain(_) | ReservationError::Store(_) => {
                AppError::Internal { message }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
