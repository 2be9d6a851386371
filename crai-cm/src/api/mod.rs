//! HTTP API handlers for crai-cm

pub mod comments;
pub mod health;
pub mod ui;

pub use comments::comment_routes;
pub use health::health_routes;
pub use ui::ui_routes;
