use serde::{Deserialize, Serialize};

/// A catalog entry as stored in the `books` collection.
///
/// The identifier is serialized as `_id` so documents keep the shape clients
/// see on the wire.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    /// Insertion-ordered; older documents without the field read back empty.
    #[serde(default)]
    pub comments: Vec<String>,
}

impl Book {
    /// Create a book with a freshly generated id and no comments.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            comments: Vec::new(),
        }
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }
}

/// Listing view of a book: the comment list collapsed to a count.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BookSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub commentcount: usize,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            commentcount: book.comment_count(),
        }
    }
}

impl From<Book> for BookSummary {
    fn from(book: Book) -> Self {
        let commentcount = book.comment_count();
        Self {
            id: book.id,
            title: book.title,
            commentcount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_book_has_unique_id_and_no_comments() {
        let a = Book::new("Dune");
        let b = Book::new("Dune");
        assert_ne!(a.id, b.id);
        assert!(a.comments.is_empty());
    }

    #[test]
    fn book_serializes_id_as_underscore_id() {
        let book = Book {
            id: "abc".into(),
            title: "Dune".into(),
            comments: vec!["great".into()],
        };
        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(
            value,
            json!({ "_id": "abc", "title": "Dune", "comments": ["great"] })
        );
    }

    #[test]
    fn missing_comments_deserialize_as_empty() {
        let book: Book = serde_json::from_value(json!({ "_id": "abc", "title": "Dune" })).unwrap();
        assert_eq!(book.comments, Vec::<String>::new());
    }

    #[test]
    fn summary_counts_comments() {
        let mut book = Book::new("Solaris");
        book.comments.push("one".into());
        book.comments.push("two".into());

        let summary = BookSummary::from(&book);
        assert_eq!(summary.commentcount, 2);

        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("comments").is_none());
        assert_eq!(value["commentcount"], 2);
        assert_eq!(value["_id"], book.id.as_str());
    }
}
