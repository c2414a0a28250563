//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, loan_handler, user_handler};
use crate::domain::{
    Capabilities, LoanApplication, LoanApplicationView, LoanStatus, UserResponse, UserRole,
    UserSummary,
};
use crate::services::TokenResponse;
use crate::types::MessageResponse;

/// OpenAPI documentation for the Loan Desk API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Loan Desk API",
        version = "0.1.0",
        description = "Loan applications with applicant, verifier and admin roles",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::signup,
        auth_handler::signin,
        auth_handler::me,
        // Loan application endpoints
        loan_handler::list_applications,
        loan_handler::create_application,
        loan_handler::get_application,
        loan_handler::update_application,
        loan_handler::delete_application,
        // User endpoints
        user_handler::list_users,
        user_handler::change_role,
        user_handler::delete_user,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            UserSummary,
            LoanStatus,
            LoanApplication,
            LoanApplicationView,
            Capabilities,
            // Auth types
            auth_handler::SignupRequest,
            auth_handler::SigninRequest,
            auth_handler::SessionResponse,
            TokenResponse,
            // Request bodies
            loan_handler::CreateApplicationRequest,
            loan_handler::UpdateApplicationRequest,
            user_handler::ChangeRoleRequest,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Sign-up, sign-in and session inspection"),
        (name = "Loan Applications", description = "Submit, review and manage loan applications"),
        (name = "Users", description = "Account administration")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/signin"))
                        .build(),
                ),
            );
        }
    }
}
