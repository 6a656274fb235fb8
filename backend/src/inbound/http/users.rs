//! Account API handlers.
//!
//! ```text
//! POST /api/v1/signup {"username":"ada","email":"ada@example.com","password":"pw"}
//! POST /api/v1/login {"email":"ada@example.com","password":"pw"}
//! GET /api/v1/user/get/profile
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::state::HttpState;
use super::validation::credentials_error;
use crate::domain::{
    ApiResult, AuthenticatedUser, Error, LoginCredentials, SignUpDetails, UserProfile,
};

/// Response header reporting whether a profile came from the cache or the
/// store.
pub const PROFILE_SOURCE_HEADER: &str = "X-Profile-Source";

const LOGIN_SUCCESS: &str = "user logged in successfully";

/// Signup request body for `POST /api/v1/signup`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

impl TryFrom<&SignupRequest> for SignUpDetails {
    type Error = Error;

    fn try_from(value: &SignupRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.email, &value.password)
            .map_err(|err| credentials_error(&err))
    }
}

/// Login request body for `POST /api/v1/login`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub password: String,
}

impl TryFrom<&LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: &LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password).map_err(|err| credentials_error(&err))
    }
}

/// Successful login payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[schema(example = "user logged in successfully")]
    pub message: String,
    /// HS256 bearer token valid for five hours.
    pub token: String,
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = UserProfile),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let details = SignUpDetails::try_from(&*payload)?;
    let profile = state.accounts.sign_up(details).await?;
    Ok(HttpResponse::Created().json(profile))
}

/// Exchange credentials for a bearer token.
///
/// Unknown emails and wrong passwords produce the same response.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 202, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request or credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(&*payload)?;
    let token = state.accounts.login(credentials).await?;
    Ok(HttpResponse::Accepted().json(LoginResponse {
        message: LOGIN_SUCCESS.to_owned(),
        token: token.as_str().to_owned(),
    }))
}

/// Fetch the caller's profile.
#[utoipa::path(
    get,
    path = "/api/v1/user/get/profile",
    responses(
        (status = 200, description = "Profile", body = UserProfile,
            headers(("X-Profile-Source" = String, description = "`cache` or `store`"))),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getProfile",
    security(("bearer" = []))
)]
#[get("/user/get/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let (profile, source) = state.profiles.get_profile(user.user_id()).await?;
    Ok(HttpResponse::Ok()
        .insert_header((PROFILE_SOURCE_HEADER, source.as_str()))
        .json(profile))
}

#[cfg(test)]
mod tests;
