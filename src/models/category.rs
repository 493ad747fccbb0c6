//! Category taxonomy model
//!
//! Categories form a fixed tree: groups (e.g. "expense", "food") contain
//! leaf categories (e.g. "meal") and further groups. Records carry a
//! category label; lookups are by label, never by path, so every label in
//! the tree must be unique.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

use crate::error::{LedgerError, LedgerResult};

/// A single node of the category tree
///
/// Serialized untagged: a leaf is a bare JSON string, a group is an object
/// with `name` and `children`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryNode {
    /// A category a record can be filed under
    Leaf(String),
    /// A named collection of child nodes
    Group {
        name: String,
        children: Vec<CategoryNode>,
    },
}

impl CategoryNode {
    /// Create a leaf node
    pub fn leaf(label: impl Into<String>) -> Self {
        Self::Leaf(label.into())
    }

    /// Create a group node
    pub fn group(name: impl Into<String>, children: Vec<CategoryNode>) -> Self {
        Self::Group {
            name: name.into(),
            children,
        }
    }

    /// The node's own label (leaf label or group name)
    pub fn label(&self) -> &str {
        match self {
            Self::Leaf(label) => label,
            Self::Group { name, .. } => name,
        }
    }

    fn collect_leaves(&self, out: &mut BTreeSet<String>) {
        match self {
            Self::Leaf(label) => {
                out.insert(label.clone());
            }
            Self::Group { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

impl fmt::Display for CategoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The built-in category tree used when no settings file overrides it
pub fn default_categories() -> Vec<CategoryNode> {
    use CategoryNode as N;

    vec![
        N::group(
            "expense",
            vec![
                N::group(
                    "food",
                    vec![N::leaf("meal"), N::leaf("snack"), N::leaf("drink")],
                ),
                N::group("transportation", vec![N::leaf("bus"), N::leaf("railway")]),
            ],
        ),
        N::group("income", vec![N::leaf("salary"), N::leaf("bonus")]),
    ]
}

/// Immutable category tree answering membership and subtree queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTaxonomy {
    roots: Vec<CategoryNode>,
}

impl CategoryTaxonomy {
    /// Build a taxonomy from a nested definition
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Config` if any label is empty, contains
    /// whitespace, or appears more than once in the tree.
    pub fn new(roots: Vec<CategoryNode>) -> LedgerResult<Self> {
        let taxonomy = Self { roots };
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Top-level nodes in definition order
    pub fn roots(&self) -> &[CategoryNode] {
        &self.roots
    }

    /// True if `label` names any node in the tree, leaf or group
    pub fn is_valid(&self, label: &str) -> bool {
        self.find_node(label).is_some()
    }

    /// Every leaf label at or under `label`
    ///
    /// A leaf yields itself, a group yields all leaves it transitively
    /// contains (never its own name), and an unknown label yields nothing.
    pub fn descendants_of(&self, label: &str) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        if let Some(node) = self.find_node(label) {
            node.collect_leaves(&mut out);
        }
        out
    }

    /// Pre-order listing of `(depth, node)` pairs, roots at depth 0
    pub fn walk(&self) -> Vec<(usize, &CategoryNode)> {
        fn visit<'a>(
            nodes: &'a [CategoryNode],
            depth: usize,
            out: &mut Vec<(usize, &'a CategoryNode)>,
        ) {
            for node in nodes {
                out.push((depth, node));
                if let CategoryNode::Group { children, .. } = node {
                    visit(children, depth + 1, out);
                }
            }
        }

        let mut out = Vec::new();
        visit(&self.roots, 0, &mut out);
        out
    }

    fn find_node(&self, label: &str) -> Option<&CategoryNode> {
        fn search<'a>(nodes: &'a [CategoryNode], label: &str) -> Option<&'a CategoryNode> {
            for node in nodes {
                if node.label() == label {
                    return Some(node);
                }
                if let CategoryNode::Group { children, .. } = node {
                    if let Some(found) = search(children, label) {
                        return Some(found);
                    }
                }
            }
            None
        }

        search(&self.roots, label)
    }

    fn validate(&self) -> LedgerResult<()> {
        let mut seen = HashSet::new();

        for (_, node) in self.walk() {
            let label = node.label();
            if label.is_empty() {
                return Err(LedgerError::Config("Category label cannot be empty".into()));
            }
            if label.chars().any(char::is_whitespace) {
                return Err(LedgerError::Config(format!(
                    "Category label '{}' cannot contain whitespace",
                    label
                )));
            }
            if !seen.insert(label) {
                return Err(LedgerError::Config(format!(
                    "Category label '{}' appears more than once",
                    label
                )));
            }
        }

        Ok(())
    }
}

impl Default for CategoryTaxonomy {
    fn default() -> Self {
        Self {
            roots: default_categories(),
        }
    }
}
