//! Mock backend: synthetic data from the core behind a fixed artificial
//! delay. Every endpoint is async and fails soft at the caller.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use shortlink_core::constants::{AUTH_LATENCY_MS, HISTORY_LATENCY_MS, SHORTEN_LATENCY_MS};
use shortlink_core::{session, shorten};
use shortlink_core::{AuthError, AuthResponse, Credentials, RegisterData, ShortenedUrl, UrlError};

/// Resolve after `ms` milliseconds on the host event loop.
pub async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    let _ = JsFuture::from(promise).await;
}

pub async fn shorten_url(url: String) -> Result<ShortenedUrl, UrlError> {
    sleep_ms(SHORTEN_LATENCY_MS).await;
    let mut rng = StdRng::from_entropy();
    let entry = shorten::shorten(&url, js_sys::Date::now(), &mut rng)?;
    log::info!("[api] shortened {} -> {}", entry.original_url, entry.short_url);
    Ok(entry)
}

pub async fn get_url_history() -> Vec<ShortenedUrl> {
    sleep_ms(HISTORY_LATENCY_MS).await;
    let rows = shorten::sample_history(js_sys::Date::now());
    log::info!("[api] history returned {} rows", rows.len());
    rows
}

pub async fn login(credentials: Credentials) -> Result<AuthResponse, AuthError> {
    sleep_ms(AUTH_LATENCY_MS).await;
    let response = session::login(&credentials)?;
    log::info!("[api] login as {}", response.user.email);
    Ok(response)
}

pub async fn register(data: RegisterData) -> Result<AuthResponse, AuthError> {
    sleep_ms(AUTH_LATENCY_MS).await;
    let response = session::register(&data)?;
    log::info!("[api] registered {}", response.user.email);
    Ok(response)
}
