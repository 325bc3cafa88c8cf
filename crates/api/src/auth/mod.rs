//! Credentials: Argon2id password hashes ([`password`]) and signed access
//! tokens ([`jwt`]).

pub mod jwt;
pub mod password;
