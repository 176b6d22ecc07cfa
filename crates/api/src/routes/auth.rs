//! Login route.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use tracing::{error, info};

use crate::{AppState, error::ApiError};
use invoicer_core::auth::{AuthError, Credentials, authorize};
use invoicer_db::UserRepository;
use invoicer_shared::{
    AppError,
    auth::{LoginRequest, LoginResponse, UserInfo},
};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

/// POST /auth/login - Check credentials and issue an access token.
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let user_repo = UserRepository::new((*state.db).clone());
    let credentials = Credentials::new(&payload.email, &payload.password);

    let user = match authorize(&user_repo, &credentials).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Err(AppError::Unauthorized("Invalid credentials.".into()).into());
        }
        Err(AuthError::InvalidInput(errors)) => {
            info!(email = %payload.email, "Rejected malformed credentials");
            return Err(AppError::Validation(errors.to_string()).into());
        }
        Err(e) => {
            error!(error = %e, "Login failed");
            return Err(AppError::Internal(e.to_string()).into());
        }
    };

    let user_id = user.id.into_inner();
    let access_token = state
        .jwt_service
        .generate_access_token(user_id, &user.email)
        .map_err(|e| {
            error!(error = %e, "Failed to generate access token");
            ApiError::internal()
        })?;

    info!(user_id = %user_id, "User logged in successfully");

    let response = LoginResponse {
        user: UserInfo {
            id: user_id,
            email: user.email,
            name: user.name,
        },
        access_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    };

    Ok((StatusCode::OK, Json(response)))
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    use crate::routes::test_support::{app, json_body};

    #[tokio::test]
    async fn test_malformed_credentials_rejected_before_lookup() {
        let (app, _) = app();

        let response = app
            .oneshot(
                Request::post("/api/v1/auth/login")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"email":"not-an-email","password":"123"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unparseable_body_gets_json_error() {
        let (app, _) = app();

        let response = app
            .oneshot(
                Request::post("/api/v1/auth/login")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert!(body["message"].is_string());
    }
}
