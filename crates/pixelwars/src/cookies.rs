//! Reading and writing the `key` and `id` session cookies.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use pixelwars_protocol::{Key, UserId};

pub(crate) const KEY_COOKIE: &str = "key";
pub(crate) const ID_COOKIE: &str = "id";

/// Attributes shared by every cookie the server sets.
///
/// Both cookies are `SameSite=None; Secure` so a front end served from
/// another origin can send them back with credentials.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CookiePolicy {
    pub(crate) max_age: u64,
}

impl CookiePolicy {
    /// `Set-Cookie` value for a session key. HttpOnly.
    pub(crate) fn key(&self, key: &Key) -> String {
        format!("{}; HttpOnly", self.cookie(KEY_COOKIE, key.as_str()))
    }

    /// `Set-Cookie` value for a user id.
    pub(crate) fn id(&self, id: &UserId) -> String {
        self.cookie(ID_COOKIE, id.as_str())
    }

    fn cookie(&self, name: &str, value: &str) -> String {
        format!(
            "{name}={value}; Max-Age={}; Path=/; SameSite=None; Secure",
            self.max_age
        )
    }
}

/// Returns the value of cookie `name`, or `""` if the request has none.
///
/// An empty value never matches an issued key or id, so a missing cookie
/// fails validation like any other unknown identifier.
pub(crate) fn read(headers: &HeaderMap, name: &str) -> String {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
        .unwrap_or_default()
}

pub(crate) fn key(headers: &HeaderMap) -> Key {
    Key(read(headers, KEY_COOKIE))
}

pub(crate) fn user_id(headers: &HeaderMap) -> UserId {
    UserId(read(headers, ID_COOKIE))
}
