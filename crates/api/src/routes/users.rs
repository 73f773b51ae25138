//! User session routes: signup and login.
//!
//! Both return the created/authenticated user together with a signed bearer
//! token; the password hash never appears on the wire.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::{Deserialize, Serialize};

use loommarket_core::{Email, Role, UserId};

use crate::error::Result;
use crate::models::{ApiResponse, User};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Signup request body.
#[derive(Debug, Deserialize)]
pub struct SignupBody {
    pub user_name: String,
    pub user_email: String,
    pub user_password: String,
    /// Optional; accounts default to the `user` role.
    pub roles: Option<Vec<Role>>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub user_email: String,
    pub user_password: String,
}

/// Wire shape of a user record.
#[derive(Debug, Serialize)]
pub struct UserBody {
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: Email,
    pub roles: Vec<Role>,
}

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            user_name: user.name,
            user_email: user.email,
            roles: user.roles,
        }
    }
}

/// A user plus the token that authenticates them.
#[derive(Debug, Serialize)]
pub struct SessionBody {
    pub user: UserBody,
    pub token: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// `POST /user/signup`
async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupBody>,
) -> Result<impl IntoResponse> {
    let (user, token) = AuthService::new(state.pool(), state.tokens())
        .signup(
            &body.user_name,
            &body.user_email,
            &body.user_password,
            body.roles,
        )
        .await?;

    let session = SessionBody {
        user: user.into(),
        token,
    };

    Ok((StatusCode::CREATED, Json(ApiResponse::new(session))))
}

/// `POST /user/login`
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse> {
    let (user, token) = AuthService::new(state.pool(), state.tokens())
        .login(&body.user_email, &body.user_password)
        .await?;

    let session = SessionBody {
        user: user.into(),
        token,
    };

    Ok(Json(ApiResponse::new(session)))
}
