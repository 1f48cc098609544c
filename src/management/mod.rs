mod auth;
mod store;

pub use auth::Clock;
pub use auth::TOKEN_KEY;
pub use auth::TokenManager;
pub use store::FileStore;
pub use store::KeyValueStore;
pub use store::MemoryStore;
