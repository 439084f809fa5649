pub mod claims;
pub mod clock;
pub mod errors;
pub mod service;

pub use claims::Claims;
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use errors::TokenError;
pub use service::TokenService;
pub use service::TokenSettings;
pub use service::DEFAULT_TTL_SECONDS;
pub use service::MIN_SECRET_BYTES;
