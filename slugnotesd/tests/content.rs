//! Forms and data rendered on the pages.

mod common;

use rocket::http::Status;
use slugnotesd::endpoint::Endpoint;
use common::*;

async fn body_of(app: &TestApp, uri: &str, cookie: Option<&rocket::http::Cookie<'static>>) -> String {
    let response = app.get(uri, cookie).await;
    assert_eq!(response.status(), Status::Ok, "for {uri}");
    response.into_string().await.expect("empty body")
}

#[rocket::async_test]
async fn add_and_edit_pages_have_note_form() {
    let (app, author, _) = TestApp::with_note().await;
    let add = body_of(&app, &Endpoint::Add.to_string(), Some(&author)).await;
    assert!(add.contains(r#"data-form="note""#), "{add}");

    let edit = body_of(&app, &Endpoint::Edit(NOTE_SLUG).to_string(), Some(&author)).await;
    assert!(edit.contains(r#"data-form="note""#), "{edit}");
    assert!(edit.contains(NOTE_TITLE), "{edit}");
    assert!(edit.contains(NOTE_TEXT), "{edit}");
    assert!(edit.contains(NOTE_SLUG), "{edit}");
}

#[rocket::async_test]
async fn login_page_has_authentication_form() {
    let app = TestApp::new().await;
    let body = body_of(&app, &Endpoint::Login.to_string(), None).await;
    assert!(body.contains(r#"data-form="authentication""#), "{body}");
    assert!(!body.contains(r#"data-form="registration""#), "{body}");
}

#[rocket::async_test]
async fn signup_page_has_registration_form() {
    let app = TestApp::new().await;
    let body = body_of(&app, &Endpoint::Signup.to_string(), None).await;
    assert!(body.contains(r#"data-form="registration""#), "{body}");
    assert!(!body.contains(r#"data-form="authentication""#), "{body}");
}

#[rocket::async_test]
async fn list_shows_only_own_notes() {
    let (app, author, reader) = TestApp::with_note().await;
    app.create_note(READER, "Reader's private title", "text", "reader-note").await;

    let body = body_of(&app, &Endpoint::List.to_string(), Some(&author)).await;
    assert!(body.contains(NOTE_TITLE), "{body}");
    assert!(!body.contains("reader-note"), "{body}");

    let body = body_of(&app, &Endpoint::List.to_string(), Some(&reader)).await;
    assert!(body.contains("reader-note"), "{body}");
    assert!(!body.contains(NOTE_SLUG), "{body}");
}

#[rocket::async_test]
async fn list_is_in_creation_order() {
    let (app, author, _) = TestApp::with_note().await;
    app.create_note(AUTHOR, "Second title", "text", "second-note").await;
    let body = body_of(&app, &Endpoint::List.to_string(), Some(&author)).await;
    let first = body.find(NOTE_SLUG).expect("first note is missing");
    let second = body.find("second-note").expect("second note is missing");
    assert!(first < second, "{body}");
}

#[rocket::async_test]
async fn detail_shows_note() {
    let (app, author, _) = TestApp::with_note().await;
    let body = body_of(&app, &Endpoint::Detail(NOTE_SLUG).to_string(), Some(&author)).await;
    assert!(body.contains(NOTE_TITLE), "{body}");
    assert!(body.contains(NOTE_TEXT), "{body}");
}

#[rocket::async_test]
async fn delete_page_asks_for_confirmation() {
    let (app, author, _) = TestApp::with_note().await;
    let body = body_of(&app, &Endpoint::Delete(NOTE_SLUG).to_string(), Some(&author)).await;
    assert!(body.contains(NOTE_TITLE), "{body}");
    assert!(body.contains(r#"name="_method" value="DELETE""#), "{body}");
}

#[rocket::async_test]
async fn home_greets_user() {
    let (app, author, _) = TestApp::with_note().await;
    let body = body_of(&app, &Endpoint::Home.to_string(), Some(&author)).await;
    assert!(body.contains(&format!("Hello, {AUTHOR}")), "{body}");

    let body = body_of(&app, &Endpoint::Home.to_string(), None).await;
    assert!(!body.contains("Hello,"), "{body}");
}

#[rocket::async_test]
async fn note_text_is_escaped() {
    let app = TestApp::new().await;
    let author = app.login_as(AUTHOR).await;
    app.create_note(AUTHOR, "Title", "<script>alert(1)</script>", "scripted").await;
    let body = body_of(&app, &Endpoint::Detail("scripted").to_string(), Some(&author)).await;
    assert!(!body.contains("<script>"), "{body}");
    assert!(body.contains("&lt;script&gt;"), "{body}");
}

#[rocket::async_test]
async fn not_found_page_keeps_the_session() {
    let (app, _, reader) = TestApp::with_note().await;
    let response = app.get(&Endpoint::Detail(NOTE_SLUG).to_string(), Some(&reader)).await;
    assert_eq!(response.status(), Status::NotFound);
    let body = response.into_string().await.expect("empty body");
    assert!(body.contains(&format!("Log out {READER}")), "{body}");
    assert!(!body.contains("Sign up"), "{body}");

    let response = app.get("/no-such-page", None).await;
    assert_eq!(response.status(), Status::NotFound);
    let body = response.into_string().await.expect("empty body");
    assert!(body.contains("Sign up"), "{body}");
    assert!(!body.contains("Log out"), "{body}");
}
