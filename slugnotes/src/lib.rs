pub mod config;
pub mod storage;
pub mod data;
pub mod util;
mod lib_constants;
pub mod rng;
pub mod bin_constants;
pub mod hasher;
pub mod serde;
pub mod username_string;
pub mod slug_string;
pub mod logging;
pub mod state_file;
pub mod session_storage;
pub mod user_db;
