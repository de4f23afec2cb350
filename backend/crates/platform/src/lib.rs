//! Platform Infrastructure
//!
//! Infrastructure primitives with no domain knowledge:
//! - `password` - Argon2id hashing and verification
//! - `wordlist` - common-password denylist loading
//! - `cookie` - cookie construction and extraction
//! - `client` - client IP extraction for operational logging

pub mod client;
pub mod cookie;
pub mod password;
pub mod wordlist;
