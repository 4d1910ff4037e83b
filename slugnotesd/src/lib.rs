pub mod app_constants;
pub mod app_setup;
pub mod authentication_guard;
pub mod cli;
pub mod endpoint;
pub mod forms;
pub mod http;
pub mod routes;
pub mod views;
