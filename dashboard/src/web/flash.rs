//! One-shot notices carried across the post/redirect/get cycle in a signed cookie.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    TaskAdded,
    EventAdded,
}

impl Flash {
    fn code(self) -> &'static str {
        match self {
            Flash::TaskAdded => "task-added",
            Flash::EventAdded => "event-added",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "task-added" => Some(Flash::TaskAdded),
            "event-added" => Some(Flash::EventAdded),
            _ => None,
        }
    }

    /// Text shown on the dashboard.
    pub fn message(self) -> &'static str {
        match self {
            Flash::TaskAdded => "Task added.",
            Flash::EventAdded => "Event added.",
        }
    }
}

/// Queues a flash for the next page view.
pub fn set_flash(jar: SignedCookieJar, flash: Flash) -> SignedCookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.code()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Reads the pending flash, if any, and clears it.
///
/// Cookies failing signature verification never reach this point; the jar drops them.
pub fn take_flash(jar: SignedCookieJar) -> (SignedCookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let flash = Flash::from_code(cookie.value());
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, flash)
}
