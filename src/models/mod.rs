//! Data models for the FoodCourt ordering service.
//!
//! This module contains the data structures exchanged with the backend:
//!
//! - `MenuItem` and the menu search request/response pair
//! - `Order` and the order placement payloads
//! - `UserProfile` and the login/registration payloads

pub mod menu;
pub mod order;
pub mod user;

pub use menu::{CategoryFilter, MenuItem, MenuPage, MenuQuery, NewMenuItem};
pub use order::{Order, PlaceOrderRequest, PlaceOrderResponse, StatusUpdate};
pub use user::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserProfile};
