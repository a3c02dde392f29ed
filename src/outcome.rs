use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed status strings returned in place of a document.
///
/// These are normal outcomes, not errors: they travel with a success status
/// and serialize as a bare JSON string.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    #[serde(rename = "missing required field title")]
    MissingTitle,
    #[serde(rename = "missing required field comment")]
    MissingComment,
    #[serde(rename = "no book exists")]
    NoBook,
    #[serde(rename = "delete successful")]
    DeleteSuccessful,
    #[serde(rename = "complete delete successful")]
    CompleteDeleteSuccessful,
}

impl Notice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Notice::MissingTitle => "missing required field title",
            Notice::MissingComment => "missing required field comment",
            Notice::NoBook => "no book exists",
            Notice::DeleteSuccessful => "delete successful",
            Notice::CompleteDeleteSuccessful => "complete delete successful",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Either the requested document or a [`Notice`] explaining why there is none.
///
/// Untagged, so a document serializes as its own object and a notice as a
/// plain string.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum Outcome<T> {
    Document(T),
    Notice(Notice),
}

impl<T> Outcome<T> {
    pub fn document(self) -> Option<T> {
        match self {
            Outcome::Document(doc) => Some(doc),
            Outcome::Notice(_) => None,
        }
    }

    pub fn notice(&self) -> Option<Notice> {
        match self {
            Outcome::Document(_) => None,
            Outcome::Notice(notice) => Some(*notice),
        }
    }
}

impl<T> From<Notice> for Outcome<T> {
    fn from(notice: Notice) -> Self {
        Outcome::Notice(notice)
    }
}
