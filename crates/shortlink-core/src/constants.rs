// Shared tuning constants used by both the engine and the web frontend.

// Grid defaults. The page embed overrides several of these; see the frontend.
pub const DEFAULT_DOT_SIZE: f32 = 16.0;
pub const DEFAULT_GAP: f32 = 32.0;
pub const DEFAULT_PROXIMITY: f32 = 150.0; // px radius for color interpolation
pub const DEFAULT_SPEED_TRIGGER: f32 = 100.0; // px/s pointer speed that launches impulses
pub const DEFAULT_SHOCK_RADIUS: f32 = 250.0;
pub const DEFAULT_SHOCK_STRENGTH: f32 = 5.0;
pub const DEFAULT_MAX_SPEED: f32 = 5000.0; // px/s pointer velocity clamp
pub const DEFAULT_RESISTANCE: f32 = 750.0; // px/s^2 glide deceleration
pub const DEFAULT_RETURN_DURATION: f32 = 1.5; // seconds

pub const DEFAULT_BASE_COLOR: &str = "#5227FF";
pub const DEFAULT_ACTIVE_COLOR: &str = "#5227FF";

// Pointer sampling
pub const POINTER_SAMPLE_INTERVAL_MS: f64 = 16.0; // ~60 samples/s

// Move-impulse shaping
pub const MIN_NORMALIZED_DIST: f32 = 0.1; // floor before inverting, keeps the push finite
pub const PUSH_FALLOFF_SCALE: f32 = 0.5;
pub const VELOCITY_PUSH_SCALE: f32 = 0.01;
pub const VELOCITY_PUSH_CAP: f32 = 3.0; // speed/trigger ratio cap
pub const MOVE_RETURN_PERIOD: f32 = 0.75; // elastic period for the return ease

// Click-shockwave shaping
pub const SHOCK_FALLOFF_EXPONENT: f32 = 0.3;
pub const SHOCK_NEAR_FRACTION: f32 = 0.3; // of shock radius
pub const SHOCK_NEAR_BOOST: f32 = 2.5;
pub const SHOCK_JITTER_MIN: f32 = 0.8;
pub const SHOCK_JITTER_MAX: f32 = 1.2;
pub const SHOCK_PUSH_MIN_PX: f32 = 50.0;
pub const SHOCK_PUSH_MAX_PX: f32 = 80.0;
pub const SHOCK_RESISTANCE_SCALE: f32 = 0.6;
pub const SHOCK_RETURN_SCALE: f32 = 1.2;
pub const SHOCK_RETURN_PERIOD: f32 = 0.6;

// Resize handling (consumed by the frontend frame loop)
pub const RESIZE_DEBOUNCE_MS: f64 = 10.0;
pub const RESIZE_POLL_INTERVAL_MS: f64 = 250.0; // fallback when no observer exists

// Mock shortening service
pub const SHORT_LINK_BASE: &str = "https://short.link/";
pub const SHORT_CODE_LEN: usize = 6;
pub const MAX_URL_LENGTH: usize = 2048;

// Anonymous usage
pub const FREE_ATTEMPT_LIMIT: u32 = 3;
pub const ATTEMPT_WINDOW_MS: f64 = 86_400_000.0; // 24 h

// Mock auth
pub const MOCK_TOKEN: &str = "mock-jwt-token";
pub const MOCK_USER_NAME: &str = "John Doe";

// Simulated backend latency (ms)
pub const SHORTEN_LATENCY_MS: i32 = 1000;
pub const HISTORY_LATENCY_MS: i32 = 800;
pub const AUTH_LATENCY_MS: i32 = 1000;

// Decorative QR matrix
pub const QR_MODULES: usize = 25; // matrix edge length, modules
pub const QR_QUIET_ZONE: usize = 2; // light margin when rendered, modules
