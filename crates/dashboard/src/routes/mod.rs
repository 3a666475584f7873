//! API Routes

pub mod history;
pub mod readings;
pub mod view;
