//! Loan application handlers.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{ValidPath, ValidQuery, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{ApplicationFilter, LoanApplication, LoanApplicationView, LoanStatus};
use crate::errors::AppResult;
use crate::services::ApplicationUpdate;
use crate::types::MessageResponse;

/// New application. Extra descriptive fields in the body are accepted and ignored.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateApplicationRequest {
    /// Requested amount, must be positive
    #[schema(example = 5000.0)]
    pub amount: f64,
    /// What the loan is for
    #[validate(length(min = 1, message = "Purpose is required"))]
    #[schema(example = "Tuition")]
    pub purpose: String,
}

/// Partial update. Owners send `amount`/`purpose`; reviewers send `status`.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateApplicationRequest {
    #[schema(example = 2500.0)]
    pub amount: Option<f64>,
    #[schema(example = "Roof repair")]
    pub purpose: Option<String>,
    pub status: Option<LoanStatus>,
}

impl From<UpdateApplicationRequest> for ApplicationUpdate {
    fn from(request: UpdateApplicationRequest) -> Self {
        Self {
            amount: request.amount,
            purpose: request.purpose,
            status: request.status,
        }
    }
}

/// Create loan application routes
pub fn loan_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_applications).post(create_application))
        .route(
            "/:id",
            get(get_application)
                .put(update_application)
                .delete(delete_application),
        )
}

/// List applications visible to the caller
#[utoipa::path(
    get,
    path = "/loan-applications",
    tag = "Loan Applications",
    security(("bearer_auth" = [])),
    params(ApplicationFilter),
    responses(
        (status = 200, description = "Applications, newest first", body = Vec<LoanApplicationView>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_applications(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidQuery(filter): ValidQuery<ApplicationFilter>,
) -> AppResult<Json<Vec<LoanApplicationView>>> {
    let views = state
        .loan_service
        .list(&current_user.actor(), filter)
        .await?;
    Ok(Json(views))
}

/// Submit a new application (role `user` only)
#[utoipa::path(
    post,
    path = "/loan-applications",
    tag = "Loan Applications",
    security(("bearer_auth" = [])),
    request_body = CreateApplicationRequest,
    responses(
        (status = 201, description = "Application created as pending", body = LoanApplication),
        (status = 400, description = "Invalid amount or purpose"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only users may apply")
    )
)]
pub async fn create_application(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateApplicationRequest>,
) -> AppResult<(StatusCode, Json<LoanApplication>)> {
    let application = state
        .loan_service
        .create(&current_user.actor(), payload.amount, payload.purpose)
        .await?;

    Ok((StatusCode::CREATED, Json(application)))
}

/// Get one application with owner and reviewer details
#[utoipa::path(
    get,
    path = "/loan-applications/{id}",
    tag = "Loan Applications",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application", body = LoanApplicationView),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Application not found")
    )
)]
pub async fn get_application(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> AppResult<Json<LoanApplicationView>> {
    let view = state.loan_service.get(&current_user.actor(), id).await?;
    Ok(Json(view))
}

/// Edit a pending application or record a review decision
#[utoipa::path(
    put,
    path = "/loan-applications/{id}",
    tag = "Loan Applications",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    request_body = UpdateApplicationRequest,
    responses(
        (status = 200, description = "Updated application", body = LoanApplication),
        (status = 400, description = "Invalid value, empty update or application no longer pending"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Application not found")
    )
)]
pub async fn update_application(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateApplicationRequest>,
) -> AppResult<Json<LoanApplication>> {
    let application = state
        .loan_service
        .update(&current_user.actor(), id, payload.into())
        .await?;

    Ok(Json(application))
}

/// Delete an application
#[utoipa::path(
    delete,
    path = "/loan-applications/{id}",
    tag = "Loan Applications",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application deleted", body = MessageResponse),
        (status = 400, description = "Application no longer pending"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Application not found")
    )
)]
pub async fn delete_application(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.loan_service.delete(&current_user.actor(), id).await?;
    Ok(Json(MessageResponse::new("Loan application deleted")))
}
