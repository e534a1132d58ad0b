pub mod addon_controller;
pub mod health_controller;
