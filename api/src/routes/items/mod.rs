//! Item catalog endpoints:
//! - `GET /items` — browse the public catalog (no auth)
//! - `GET /items/{id}` — fetch a single listing (no auth)
//! - `POST /items` — create a listing
//! - `PUT /items/{id}` — edit a listing (resets approval)
//! - `DELETE /items/{id}` — delete a listing
//! - `GET /users/me/items` — the caller's own listings

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod my_items;
pub mod update;
