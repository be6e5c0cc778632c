//! HTTP handlers for all web routes.

pub mod page;
pub mod home;
pub mod predict;
pub mod report;
pub mod health;
