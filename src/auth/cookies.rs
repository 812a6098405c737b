// Session cookies carrying the token pair

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::auth::token::{ACCESS_TOKEN_TTL_SECS, REFRESH_TOKEN_TTL_SECS};

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Builds an http-only, strict same-site cookie scoped to `domain`
fn session_cookie(name: &'static str, value: String, domain: &str, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build((name, value))
        .domain(domain.to_string())
        .path("/")
        .same_site(SameSite::Strict)
        .http_only(true)
        .max_age(Duration::seconds(max_age_secs))
        .build()
}

pub fn access_token_cookie(token: String, domain: &str) -> Cookie<'static> {
    session_cookie(ACCESS_TOKEN_COOKIE, token, domain, ACCESS_TOKEN_TTL_SECS)
}

pub fn refresh_token_cookie(token: String, domain: &str) -> Cookie<'static> {
    session_cookie(REFRESH_TOKEN_COOKIE, token, domain, REFRESH_TOKEN_TTL_SECS)
}

/// Adds both session cookies to the response jar
pub fn set_session_cookies(
    jar: CookieJar,
    access_token: String,
    refresh_token: String,
    domain: &str,
) -> CookieJar {
    jar.add(access_token_cookie(access_token, domain))
        .add(refresh_token_cookie(refresh_token, domain))
}

/// Overwrites both session cookies with expired, empty ones
pub fn clear_session_cookies(jar: CookieJar, domain: &str) -> CookieJar {
    let mut jar = jar;
    for name in [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE] {
        let mut cookie = session_cookie(name, String::new(), domain, 0);
        cookie.make_removal();
        jar = jar.add(cookie);
    }
    jar
}
