//! Cookie-based user identity middleware.

use axum::{
    extract::{Request, State},
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
    },
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::domain::entities::UserId;
use crate::state::AppState;

/// Name of the cookie carrying the user token.
pub const USER_TOKEN_COOKIE: &str = "user_token";

/// Identity of the caller, inserted into request extensions by [`layer`].
///
/// Handlers read it with `Extension<CurrentUser>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

/// Resolves the caller's identity from the `user_token` cookie.
///
/// # Identity Flow
///
/// 1. Extract the `user_token` cookie from the request
/// 2. Verify it with [`crate::application::services::UserTokenCodec`]
/// 3. On a missing, malformed or forged token, mint a fresh identity
/// 4. Expose the user as [`CurrentUser`] and run the handler
/// 5. Echo the (possibly new) token back in `Set-Cookie`
///
/// There is no rejection path: every request ends up with an identity.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::user_token;
///
/// let app = Router::new()
///     .route("/api/user/urls", get(user_urls_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), user_token::layer));
/// ```
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let verified = cookie_value(req.headers(), USER_TOKEN_COOKIE)
        .and_then(|token| st.token_codec.verify(&token).map(|user_id| (user_id, token)));

    let (user_id, token) = match verified {
        Some(identity) => identity,
        None => {
            let (user_id, token) = st.token_codec.mint();
            debug!(user_id, "Issued new user identity");
            (user_id, token)
        }
    };

    req.extensions_mut().insert(CurrentUser(user_id));

    let mut response = next.run(req).await;

    match HeaderValue::from_str(&format!("{USER_TOKEN_COOKIE}={token}; Path=/; HttpOnly")) {
        Ok(cookie) => {
            response.headers_mut().append(SET_COOKIE, cookie);
        }
        Err(e) => warn!("Failed to build user token cookie: {}", e),
    }

    response
}

/// Returns the value of the cookie `name`, ignoring every other cookie.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            let mut parts = cookie.trim().splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(key), Some(value)) if key == name => Some(value.to_string()),
                _ => None,
            }
        })
}
