use std::sync::LazyLock;
use reqwest::redirect::Policy;

/// Doesn't follow redirects, so that the tests see them.
pub static RQ: LazyLock<reqwest::blocking::Client> = LazyLock::new(||
    reqwest::blocking::Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("failed to build the http client")
);
