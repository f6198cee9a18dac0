//! The resume form's fields, kept in the order they were entered.

use crate::errors::SubmitError;

/// Field names of the resume form, in page order.
pub const RESUME_FIELDS: &[&str] = &[
    "name",
    "email",
    "phone",
    "linkedin",
    "summary",
    "skills",
    "languages",
    "experience",
    "education",
    "projects",
    "certifications",
    "extracurriculars",
];

/// Fields whose comma-separated value is submitted as a list of strings.
pub const MULTI_VALUE_FIELDS: &[&str] = &["skills", "languages"];

pub fn is_resume_field(name: &str) -> bool {
    RESUME_FIELDS.contains(&name)
}

pub fn is_multi_value(name: &str) -> bool {
    MULTI_VALUE_FIELDS.contains(&name)
}

/// Ordered `(name, value)` pairs, like a browser's `FormData`.
/// Duplicate names are kept; payload construction decides how they collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut form = FormData::new();
        for (name, value) in iter {
            form.append(name, value);
        }
        form
    }
}

/// Parses one `NAME=VALUE` argument. Only the first `=` separates; the value
/// may itself contain `=` and may be empty.
pub fn parse_field(arg: &str) -> Result<(String, String), SubmitError> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| SubmitError::InvalidField(arg.to_string()))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(SubmitError::InvalidField(arg.to_string()));
    }

    Ok((name.to_string(), value.to_string()))
}
