//! localStorage persistence for the attempt counter and the signed-in user.
//! Both records are opaque JSON blobs; corrupt blobs are treated as absent.

use web_sys as web;

use shortlink_core::{AttemptWindow, User};

const ATTEMPTS_KEY: &str = "urlShortenerAttempts";
const USER_KEY: &str = "urlShortenerUser";

fn local_storage() -> Option<web::Storage> {
    web::window().and_then(|w| w.local_storage().ok().flatten())
}

fn read_json<T: serde::de::DeserializeOwned>(key: &str) -> Option<T> {
    let raw = local_storage()?.get_item(key).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::error!("[storage] dropping corrupt blob {key}: {e}");
            None
        }
    }
}

fn write_json<T: serde::Serialize>(key: &str, value: &T) {
    let Some(storage) = local_storage() else {
        return;
    };
    match serde_json::to_string(value) {
        Ok(raw) => {
            if storage.set_item(key, &raw).is_err() {
                log::error!("[storage] write failed for {key}");
            }
        }
        Err(e) => log::error!("[storage] serialize failed for {key}: {e}"),
    }
}

pub fn load_attempts(now_ms: f64) -> AttemptWindow {
    read_json(ATTEMPTS_KEY).unwrap_or_else(|| AttemptWindow::start(now_ms))
}

pub fn save_attempts(attempts: &AttemptWindow) {
    write_json(ATTEMPTS_KEY, attempts);
}

pub fn clear_attempts() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(ATTEMPTS_KEY);
    }
}

pub fn load_user() -> Option<User> {
    read_json(USER_KEY)
}

pub fn save_user(user: &User) {
    write_json(USER_KEY, user);
}

pub fn clear_user() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(USER_KEY);
    }
}
