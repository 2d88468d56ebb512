//! Node types for the coauthorship graph.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of vertex in the bipartite graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// A published paper.
    Paper,
    /// A credited author.
    Author,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paper => write!(f, "paper"),
            Self::Author => write!(f, "author"),
        }
    }
}

/// Identity of a vertex in the bipartite graph.
///
/// The kind is part of the key, so a paper whose title equals an author's
/// name is still a distinct vertex. Implements `Ord` for deterministic
/// ordering: papers sort before authors, then by identity string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum NodeKey {
    /// Paper keyed by normalized title.
    Paper(String),
    /// Author keyed by normalized name.
    Author(String),
}

impl NodeKey {
    /// Key for a paper title (must already be normalized).
    pub fn paper(title: impl Into<String>) -> Self {
        Self::Paper(title.into())
    }

    /// Key for an author name (must already be normalized).
    pub fn author(name: impl Into<String>) -> Self {
        Self::Author(name.into())
    }

    /// Kind of node this key identifies.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Paper(_) => NodeKind::Paper,
            Self::Author(_) => NodeKind::Author,
        }
    }

    /// Identity string without the kind tag.
    pub fn id(&self) -> &str {
        match self {
            Self::Paper(id) | Self::Author(id) => id,
        }
    }

    /// Author name, if this key identifies an author.
    pub fn as_author(&self) -> Option<&str> {
        match self {
            Self::Author(name) => Some(name),
            Self::Paper(_) => None,
        }
    }

    /// Whether this key identifies a paper.
    pub fn is_paper(&self) -> bool {
        matches!(self, Self::Paper(_))
    }

    /// Whether this key identifies an author.
    pub fn is_author(&self) -> bool {
        matches!(self, Self::Author(_))
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id())
    }
}

/// A paper vertex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Paper {
    /// Source key, `category/venue/title` unless the record carried its own id.
    pub key: String,
    /// Subject category.
    pub category: String,
    /// Journal or conference.
    pub venue: String,
    /// Normalized title (identity).
    pub title: String,
    /// Publication year.
    pub year: i32,
}

impl Paper {
    /// Identity key of this paper.
    pub fn node_key(&self) -> NodeKey {
        NodeKey::Paper(self.title.clone())
    }
}

/// An author vertex.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Author {
    /// Normalized name (identity).
    pub name: String,
}

impl Author {
    /// Create an author from an already-normalized name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Identity key of this author.
    pub fn node_key(&self) -> NodeKey {
        NodeKey::Author(self.name.clone())
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A vertex of the bipartite graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    /// Paper vertex.
    Paper(Paper),
    /// Author vertex.
    Author(Author),
}

impl Node {
    /// Identity key of this node.
    pub fn key(&self) -> NodeKey {
        match self {
            Self::Paper(p) => p.node_key(),
            Self::Author(a) => a.node_key(),
        }
    }

    /// Kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Paper(_) => NodeKind::Paper,
            Self::Author(_) => NodeKind::Author,
        }
    }

    /// Borrow as a paper.
    pub fn as_paper(&self) -> Option<&Paper> {
        match self {
            Self::Paper(p) => Some(p),
            Self::Author(_) => None,
        }
    }

    /// Borrow as an author.
    pub fn as_author(&self) -> Option<&Author> {
        match self {
            Self::Author(a) => Some(a),
            Self::Paper(_) => None,
        }
    }
}
