use std::fmt::{Display, Formatter};
use crate::app_constants::AUTH_PREFIX;

/// Every page of the app, resolvable into its absolute path.
///
/// Slugs only consist of URL-safe characters, so they are put into the
/// paths as they are.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Endpoint<'a> {
    Home,
    Add,
    Edit(&'a str),
    Detail(&'a str),
    Delete(&'a str),
    List,
    Success,
    Login,
    Logout,
    Signup,
}

impl Display for Endpoint<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Home => f.write_str("/"),
            Endpoint::Add => f.write_str("/add"),
            Endpoint::Edit(slug) => write!(f, "/edit/{slug}"),
            Endpoint::Detail(slug) => write!(f, "/note/{slug}"),
            Endpoint::Delete(slug) => write!(f, "/delete/{slug}"),
            Endpoint::List => f.write_str("/notes"),
            Endpoint::Success => f.write_str("/done"),
            Endpoint::Login => write!(f, "{AUTH_PREFIX}/login"),
            Endpoint::Logout => write!(f, "{AUTH_PREFIX}/logout"),
            Endpoint::Signup => write!(f, "{AUTH_PREFIX}/signup"),
        }
    }
}
