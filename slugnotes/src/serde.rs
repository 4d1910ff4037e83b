pub mod base64vec;
pub mod password_hash_string;
