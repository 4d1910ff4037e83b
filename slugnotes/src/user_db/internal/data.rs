use argon2::password_hash::PasswordHashString;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use crate::username_string::UsernameString;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UsersData {
    #[serde(rename = "user", default)]
    pub users: Vec<UserData>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UserData {
    pub username: UsernameString,

    #[serde(with = "crate::serde::password_hash_string")]
    pub hash: PasswordHashString,

    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
