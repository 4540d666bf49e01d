//! Form payloads and their submission-time validation rules.
//!
//! Each form deserializes from `application/x-www-form-urlencoded` and
//! validates only when submitted. Failures carry field-level messages so
//! the originating page can re-render with inline errors.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Field name -> messages. Every field of the form is present as a key,
/// so templates can iterate without guarding against missing entries.
pub type FormErrors = BTreeMap<&'static str, Vec<String>>;

const REQUIRED: &str = "This field is required.";
const MIN_PASSWORD_LEN: usize = 6;

fn empty_errors(fields: &[&'static str]) -> FormErrors {
    fields.iter().map(|f| (*f, Vec::new())).collect()
}

fn push(errors: &mut FormErrors, field: &'static str, message: impl Into<String>) {
    errors.entry(field).or_default().push(message.into());
}

fn finish(errors: FormErrors) -> Result<(), FormErrors> {
    if errors.values().all(Vec::is_empty) {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Loose syntactic email check: one `@`, a non-empty local part, and a
/// dotted domain.
fn is_valid_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && domain.split('.').all(|part| !part.is_empty())
}

/// Comma-separated free text into an ordered sequence of trimmed tags.
/// Empty segments are dropped, so `""` and `" , "` both yield `[]`.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl RegistrationForm {
    pub const FIELDS: &'static [&'static str] =
        &["username", "email", "password", "confirm_password"];

    pub fn empty_errors() -> FormErrors {
        empty_errors(Self::FIELDS)
    }

    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = Self::empty_errors();
        if self.username.trim().is_empty() {
            push(&mut errors, "username", REQUIRED);
        }
        if self.email.trim().is_empty() {
            push(&mut errors, "email", REQUIRED);
        } else if !is_valid_email(&self.email) {
            push(&mut errors, "email", "Invalid email address.");
        }
        if self.password.is_empty() {
            push(&mut errors, "password", REQUIRED);
        } else if self.password.len() < MIN_PASSWORD_LEN {
            push(
                &mut errors,
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters long."),
            );
        }
        if self.confirm_password != self.password {
            push(&mut errors, "confirm_password", "Passwords must match.");
        }
        finish(errors)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub const FIELDS: &'static [&'static str] = &["email", "password"];

    pub fn empty_errors() -> FormErrors {
        empty_errors(Self::FIELDS)
    }

    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = Self::empty_errors();
        if self.email.trim().is_empty() {
            push(&mut errors, "email", REQUIRED);
        }
        if self.password.is_empty() {
            push(&mut errors, "password", REQUIRED);
        }
        finish(errors)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Raw comma-separated input; see [`split_tags`].
    #[serde(default)]
    pub tags: String,
}

impl PostForm {
    pub const FIELDS: &'static [&'static str] = &["title", "content", "tags"];

    pub fn empty_errors() -> FormErrors {
        empty_errors(Self::FIELDS)
    }

    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = Self::empty_errors();
        if self.title.trim().is_empty() {
            push(&mut errors, "title", REQUIRED);
        }
        if self.content.trim().is_empty() {
            push(&mut errors, "content", REQUIRED);
        }
        finish(errors)
    }

    pub fn split_tags(&self) -> Vec<String> {
        split_tags(&self.tags)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn tags_are_split_and_trimmed_in_order() {
        assert_eq!(split_tags("a, b ,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_tags_input_yields_no_tags() {
        assert_eq!(split_tags(""), Vec::<String>::new());
        assert_eq!(split_tags("  ,  , "), Vec::<String>::new());
    }

    #[test]
    fn trailing_comma_is_ignored() {
        assert_eq!(split_tags("rust,"), vec!["rust"]);
    }

    #[test]
    fn registration_requires_every_field() {
        let errors = RegistrationForm::default().validate().unwrap_err();
        assert!(!errors["username"].is_empty());
        assert!(!errors["email"].is_empty());
        assert!(!errors["password"].is_empty());
    }

    #[test]
    fn registration_rejects_mismatched_confirmation() {
        let form = RegistrationForm {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "hunter22".into(),
            confirm_password: "hunter23".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors["confirm_password"], vec!["Passwords must match."]);
        assert!(errors["username"].is_empty());
    }

    #[test]
    fn registration_rejects_short_passwords() {
        let form = RegistrationForm {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "ab".into(),
            confirm_password: "ab".into(),
        };
        let errors = form.validate().unwrap_err();
        assert!(!errors["password"].is_empty());
    }

    #[test]
    fn registration_accepts_a_complete_submission() {
        let form = RegistrationForm {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "hunter22".into(),
            confirm_password: "hunter22".into(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn email_shape_is_checked() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a.b.co"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@nodot"));
        assert!(!is_valid_email("a@b..co"));
        assert!(!is_valid_email("a b@c.co"));
    }

    #[test]
    fn login_requires_both_fields() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert!(!errors["email"].is_empty());
        assert!(!errors["password"].is_empty());
    }

    #[test]
    fn post_form_requires_title_and_content_but_not_tags() {
        let form = PostForm {
            title: "hello".into(),
            content: "world".into(),
            tags: String::new(),
        };
        assert!(form.validate().is_ok());
        assert_eq!(form.split_tags(), Vec::<String>::new());
    }
}
