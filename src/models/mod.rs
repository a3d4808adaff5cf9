// SPDX-License-Identifier: MIT

//! Data models.

pub mod user;

pub use user::{NewUser, RefreshTokenRecord, User};
