//! Verde Storefront library.
//!
//! This crate provides the storefront core as a library: the product
//! catalog, the cart store with its derived aggregates, the persisted cart
//! snapshot, and the checkout state machine. The presentation layer (the
//! `verde` CLI, or any other front end) drives this crate and owns all
//! rendering, routing, and input collection.
//!
//! # Architecture
//!
//! - [`catalog`] - Read-only product and category data
//! - [`cart`] - Single-writer cart store, persisted after every mutation
//! - [`checkout`] - Linear `Shipping -> Payment -> Confirmation` flow
//! - [`notify`] - Fire-and-forget user-facing notifications
//! - [`state`] - `AppState` wiring the collaborators together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod notify;
pub mod state;

pub use error::{AppError, Result};
pub use state::AppState;
