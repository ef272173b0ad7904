// Public API for the game core; the binary and integration tests use it

pub mod anagram;
pub mod auth;
pub mod crop;
pub mod ingest;
pub mod score;
pub mod sequencer;
pub mod session;
pub mod signing;
pub mod token_cache;
pub mod types;
