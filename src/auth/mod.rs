//! Owner authentication: signed bearer cookie

mod clock;
mod token;

pub use clock::{Clock, FixedClock, SystemClock};
pub use token::{TokenError, TokenSigner, MAX_AGE_MS};

/// Name of the cookie carrying the session token
pub const COOKIE_NAME: &str = "owner_session";

/// `Set-Cookie` value that stores `token` for the token lifetime
pub fn session_cookie(token: &str, secure: bool) -> String {
    format!(
        "{}={}; Path=/; HttpOnly;{} SameSite=Lax; Max-Age={}",
        COOKIE_NAME,
        token,
        if secure { " Secure;" } else { "" },
        MAX_AGE_MS / 1000
    )
}

/// `Set-Cookie` value that clears the session cookie
pub fn clear_cookie(secure: bool) -> String {
    format!(
        "{}=; Path=/; Max-Age=0; HttpOnly;{} SameSite=Lax",
        COOKIE_NAME,
        if secure { " Secure;" } else { "" },
    )
}
