//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Secure random bytes
//! - Password policy and hashing (Argon2id)
//! - Stateless HS256 bearer tokens (JWT)
//! - `Authorization` header parsing

pub mod bearer;
pub mod crypto;
pub mod password;
pub mod token;
