pub mod auth;
pub mod hasher;
pub mod jwt;
pub mod media;
