use rocket::FromForm;
use slugnotes::config::app_config::AppConfig;
use slugnotes::data::{NewNote, Note, NoteUpdate};
use slugnotes::slug_string::{SlugParseError, SlugString};
use slugnotes::util::StrExt;
use crate::forms::{FormErrors, REQUIRED_MESSAGE};

#[derive(Clone, Debug, Default, FromForm)]
pub struct NoteFormData {
    pub title: Option<String>,
    pub text: Option<String>,
    pub slug: Option<String>,
}

/// The note form as rendered on the add and edit pages.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NoteForm {
    pub title: String,
    pub text: String,
    pub slug: String,
    pub errors: FormErrors,
}

pub fn slug_taken_message(slug: &str) -> String {
    format!("{slug} - such a slug already exists, pick a unique value!")
}

impl NoteForm {
    pub fn from_note(note: &Note) -> Self {
        NoteForm {
            title: note.title.clone(),
            text: note.text.clone(),
            slug: note.slug.to_string(),
            errors: FormErrors::default(),
        }
    }

    /// Shows the submitted values, falling back to the stored note for the
    /// fields that weren't submitted.
    pub fn from_submission(
        data: &NoteFormData,
        stored: Option<&Note>,
        errors: FormErrors,
    ) -> Self {
        let fallback = stored.map(NoteForm::from_note).unwrap_or_default();
        NoteForm {
            title: data.title.clone().unwrap_or(fallback.title),
            text: data.text.clone().unwrap_or(fallback.text),
            slug: data.slug.clone().unwrap_or(fallback.slug),
            errors,
        }
    }
}

impl NoteFormData {
    pub fn to_new_note(&self, config: &AppConfig) -> Result<NewNote, FormErrors> {
        let mut errors = FormErrors::default();
        let title = validate_title(self.title.as_deref(), config, &mut errors);
        let text = validate_text(self.text.as_deref(), &mut errors);
        let slug = match self.slug.as_deref().and_then(|s| s.nonblank_to_some()) {
            Some(slug) => validate_slug(&slug, config, &mut errors),
            None => title
                .as_deref()
                .and_then(|title| {
                    let derived = SlugString::from_title(title, config.max_slug_len);
                    if derived.is_none() {
                        errors.add(
                            "slug",
                            "Could not make a slug out of the title, please provide one.",
                        );
                    }
                    derived
                }),
        };
        match (title, text, slug) {
            (Some(title), Some(text), Some(slug)) => errors.into_result(
                NewNote {
                    title,
                    text,
                    slug,
                }
            ),
            _ => Err(errors),
        }
    }

    /// Absent fields and a blank slug keep the stored values.
    pub fn to_note_update(&self, config: &AppConfig) -> Result<NoteUpdate, FormErrors> {
        let mut errors = FormErrors::default();
        let update = NoteUpdate {
            title: self.title
                .as_deref()
                .and_then(|title| validate_title(Some(title), config, &mut errors)),
            text: self.text
                .as_deref()
                .and_then(|text| validate_text(Some(text), &mut errors)),
            slug: self.slug
                .as_deref()
                .and_then(|s| s.nonblank_to_some())
                .and_then(|slug| validate_slug(&slug, config, &mut errors)),
        };
        errors.into_result(update)
    }
}

fn validate_title(
    title: Option<&str>,
    config: &AppConfig,
    errors: &mut FormErrors,
) -> Option<String> {
    let Some(title) = title.and_then(|t| t.nonblank_to_some()) else {
        errors.add("title", REQUIRED_MESSAGE);
        return None
    };
    let len = title.chars().count();
    if len > config.max_title_len {
        errors.add(
            "title",
            format!(
                "Ensure this value has at most {} characters (it has {len}).",
                config.max_title_len,
            ),
        );
        return None
    }
    Some(title)
}

fn validate_text(text: Option<&str>, errors: &mut FormErrors) -> Option<String> {
    if text.is_none_or(|t| t.trim().is_empty()) {
        errors.add("text", REQUIRED_MESSAGE);
        return None
    }
    text.map(str::to_owned)
}

fn validate_slug(
    slug: &str,
    config: &AppConfig,
    errors: &mut FormErrors,
) -> Option<SlugString> {
    match SlugString::parse(slug, config.max_slug_len) {
        Ok(slug) => Some(slug),
        Err(SlugParseError::TooLong(len)) => {
            errors.add(
                "slug",
                format!(
                    "Ensure this value has at most {} characters (it has {len}).",
                    config.max_slug_len,
                ),
            );
            None
        },
        Err(_) => {
            errors.add(
                "slug",
                "Enter a valid slug consisting of letters, numbers, \
                    underscores or hyphens.",
            );
            None
        },
    }
}
