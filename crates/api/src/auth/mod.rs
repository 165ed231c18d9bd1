//! Credentials: Argon2id password hashes ([`password`]) and the access and
//! refresh tokens handed to clients ([`jwt`]).

pub mod jwt;
pub mod password;
