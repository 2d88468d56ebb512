//! Normalized input records handed over by an ingestion adapter.

use serde::{Deserialize, Serialize};

use crate::normalize::{is_blank, normalize_field, normalize_key};
use super::node::Paper;

/// Error raised for records that cannot be inserted without breaking
/// identity-key invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// Paper title is missing or blank.
    #[error("record {paper_id:?} has no title")]
    MissingTitle {
        /// Paper id as supplied by the adapter (may be empty).
        paper_id: String,
    },
    /// A standalone author name is blank.
    #[error("author name is blank")]
    BlankName,
    /// An author name in the list is blank.
    #[error("record {title:?} has a blank author name at position {position}")]
    BlankAuthor {
        /// Normalized title of the offending record.
        title: String,
        /// Zero-based index in the author list.
        position: usize,
    },
}

/// One `(paperId, category, venue, title, year, authorNames)` tuple.
///
/// Fields are already split by the adapter; the kernel only normalizes
/// whitespace and uses them as identity keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Source paper id (`category/venue/title` in the usual feed). May be
    /// empty, in which case it is derived from the other fields.
    #[serde(default)]
    pub paper_id: String,
    /// Subject category.
    #[serde(default)]
    pub category: String,
    /// Journal or conference.
    #[serde(default)]
    pub venue: String,
    /// Paper title (identity).
    pub title: String,
    /// Publication year.
    pub year: i32,
    /// Ordered author names; may be empty.
    #[serde(default)]
    pub authors: Vec<String>,
}

impl PaperRecord {
    /// Create a record with a derived paper id.
    pub fn new(
        category: impl Into<String>,
        venue: impl Into<String>,
        title: impl Into<String>,
        year: i32,
        authors: Vec<String>,
    ) -> Self {
        Self {
            paper_id: String::new(),
            category: category.into(),
            venue: venue.into(),
            title: title.into(),
            year,
            authors,
        }
    }

    /// Set an explicit paper id.
    pub fn with_paper_id(mut self, paper_id: impl Into<String>) -> Self {
        self.paper_id = paper_id.into();
        self
    }

    /// Check mandatory identity fields.
    pub fn validate(&self) -> Result<(), RecordError> {
        if is_blank(&self.title) {
            return Err(RecordError::MissingTitle {
                paper_id: self.paper_id.clone(),
            });
        }
        if let Some(position) = self.authors.iter().position(|a| is_blank(a)) {
            return Err(RecordError::BlankAuthor {
                title: normalize_key(&self.title),
                position,
            });
        }
        Ok(())
    }

    /// Build the paper vertex for this record.
    pub fn to_paper(&self) -> Result<Paper, RecordError> {
        self.validate()?;

        let category = normalize_field(&self.category);
        let venue = normalize_field(&self.venue);
        let title = normalize_key(&self.title);
        let key = if is_blank(&self.paper_id) {
            format!("{}/{}/{}", category, venue, title)
        } else {
            normalize_field(&self.paper_id)
        };

        Ok(Paper {
            key,
            category,
            venue,
            title,
            year: self.year,
        })
    }

    /// Normalized author names in record order.
    pub fn author_names(&self) -> Result<Vec<String>, RecordError> {
        self.validate()?;
        Ok(self.authors.iter().map(|a| normalize_key(a)).collect())
    }
}
