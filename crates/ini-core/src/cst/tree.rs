//! Parsed snapshots

use rowan::GreenNode;
use tracing::debug;

use super::ast::Document;
use super::parser::parse_green;
use super::IniSyntaxNode;
use crate::text::{BufferId, Snapshot};

/// A syntax tree together with the snapshot it was parsed from
///
/// The tree is immutable. It holds only the green tree, which is `Send` and
/// `Sync`, so a `SyntaxTree` can be shared freely behind an `Arc`. Red nodes
/// are created on demand by [`SyntaxTree::syntax`] and [`SyntaxTree::document`].
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    green: GreenNode,
    snapshot: Snapshot,
}

impl SyntaxTree {
    /// Parse a snapshot. Never fails.
    pub fn parse(snapshot: &Snapshot) -> Self {
        let green = parse_green(snapshot.text());
        debug!(
            buffer = %snapshot.buffer_id(),
            version = snapshot.version(),
            len = snapshot.text().len(),
            "Parsed INI snapshot"
        );
        Self {
            green,
            snapshot: snapshot.clone(),
        }
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn version(&self) -> u64 {
        self.snapshot.version()
    }

    pub fn buffer_id(&self) -> BufferId {
        self.snapshot.buffer_id()
    }

    pub fn text(&self) -> &str {
        self.snapshot.text()
    }

    /// A fresh red root over the green tree
    pub fn syntax(&self) -> IniSyntaxNode {
        IniSyntaxNode::new_root(self.green.clone())
    }

    pub fn document(&self) -> Document {
        Document::from_root(self.syntax())
    }

    /// Same structure and text, regardless of which snapshot produced it
    pub fn structurally_eq(&self, other: &SyntaxTree) -> bool {
        self.green == other.green
    }

    /// Whether `node` belongs to a tree with this tree's structure
    pub fn contains(&self, node: &IniSyntaxNode) -> bool {
        node.ancestors()
            .last()
            .is_some_and(|root| root.green().into_owned() == self.green)
    }
}

/// Parse a snapshot into a syntax tree
pub fn parse(snapshot: &Snapshot) -> SyntaxTree {
    SyntaxTree::parse(snapshot)
}

/// Parse standalone text, as version 0 of a fresh buffer
pub fn parse_text(text: &str) -> SyntaxTree {
    SyntaxTree::parse(&Snapshot::from_text(text))
}
