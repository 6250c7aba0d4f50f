//! Platform-free logic for ShortLink: the pointer-reactive dot-grid engine
//! plus the mock shortening/auth domain. No web APIs here; the frontend
//! crate feeds in measurements, events and timestamps.

pub mod color;
pub mod config;
pub mod constants;
pub mod engine;
pub mod grid;
pub mod physics;
pub mod pointer;
pub mod qr;
pub mod session;
pub mod shorten;

pub use color::Rgb;
pub use config::{ConfigError, GridConfig};
pub use engine::DotGridEngine;
pub use grid::{Dot, DotState, GridDimensions, GridLayout};
pub use pointer::PointerState;
pub use qr::QrMatrix;
pub use session::{AttemptWindow, AuthError, AuthResponse, Credentials, RegisterData, User};
pub use shorten::{ShortenedUrl, UrlError};
