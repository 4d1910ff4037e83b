use std::any::type_name;
use std::fmt::Write;
use askama::Template;
use log::error;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::response::{self, Responder};
use rocket::Request;

/// Renders the template as an html response, any rendering failure is a 500.
pub struct HtmlPage<T: Template>(pub T);

impl<'r, 'o: 'r, T: Template> Responder<'r, 'o> for HtmlPage<T> {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'o> {
        match self.0.render() {
            Ok(html) => RawHtml(html).respond_to(request),
            Err(e) => {
                error!("failed to render {}: {e}", type_name::<T>());
                Err(Status::InternalServerError)
            },
        }
    }
}

/// Percent-encodes everything except the unreserved characters and `/`.
pub fn percent_encode(s: &str) -> String {
    let mut ret = String::with_capacity(s.len());
    for byte in s.bytes() {
        if byte.is_ascii_alphanumeric() || b"-._~/".contains(&byte) {
            ret.push(char::from(byte));
        } else {
            let _ = write!(ret, "%{byte:02X}");
        }
    }
    ret
}

/// Accepts only same-site absolute paths as redirect targets.
pub fn local_redirect_target(next: Option<&str>) -> Option<&str> {
    next.filter(|next|
        next.starts_with('/')
            && !next.starts_with("//")
            && !next.contains('\\')
    )
}
