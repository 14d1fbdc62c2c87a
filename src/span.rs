//! Dependency-tree-based span reconstruction ("props" conversion).
//!
//! CoNLL-05 evaluation expects each semantic role as a contiguous
//! bracketed span rather than a single dependency-labeled token. The
//! converter builds the dependency tree induced by the head column and
//! expands each argument token to the ids it dominates, then renders the
//! open/continue/close bracket column per predicate.

use crate::error::CorpusResult;
use crate::sentence::Sentence;
use crate::word::TokenId;
use std::collections::{HashMap, HashSet};

/// Label whose span never expands through the tree; modal auxiliaries
/// attach directly without covering their subtree.
pub const MODAL_LABEL: &str = "AM-MOD";

/// Transient dependency tree: head id to ordered dependent ids, derived
/// from every word's head column. Rebuilt per conversion call.
#[derive(Debug, Default)]
pub struct DepTree {
    dependents: HashMap<TokenId, Vec<TokenId>>,
}

impl DepTree {
    /// Build the tree from the sentence's head column.
    pub fn from_sentence(sentence: &Sentence) -> CorpusResult<DepTree> {
        let mut dependents: HashMap<TokenId, Vec<TokenId>> = HashMap::new();
        for word in &sentence.words {
            let id = word.id()?;
            if let Some(head) = word.head()? {
                dependents.entry(head).or_default().push(id);
            }
        }
        Ok(DepTree { dependents })
    }

    /// Direct dependents of a token, in sentence order.
    pub fn dependents(&self, id: TokenId) -> &[TokenId] {
        self.dependents
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All ids reachable from `start` through the tree, including
    /// `start` itself, sorted ascending.
    ///
    /// Traversal is iterative with an explicit worklist and visited set;
    /// a token listing itself as its own dependent is treated as a leaf
    /// instead of recursing forever.
    pub fn span(&self, start: TokenId) -> Vec<TokenId> {
        let mut visited = HashSet::new();
        let mut worklist = vec![start];
        let mut span = Vec::new();
        visited.insert(start);
        while let Some(id) = worklist.pop() {
            span.push(id);
            for &dependent in self.dependents(id) {
                if visited.insert(dependent) {
                    worklist.push(dependent);
                }
            }
        }
        span.sort_unstable();
        span
    }
}

/// Append one bracket column per predicate to the given rows, one row
/// per body token.
///
/// Per predicate column: every argument token expands to its tree span
/// (modal labels stay singletons), the label opens at the span's lowest
/// id and closes at its highest, and the predicate's own row renders
/// `(V*)`. An argument whose span comes back empty is silently skipped.
pub(crate) fn append_bracket_columns(
    sentence: &Sentence,
    rows: &mut [String],
) -> CorpusResult<()> {
    let tree = DepTree::from_sentence(sentence)?;

    for (j, predicate) in sentence.predicates.iter().enumerate() {
        let mut opens: HashMap<TokenId, &str> = HashMap::new();
        let mut closes: HashSet<TokenId> = HashSet::new();

        for argument in &sentence.arguments[j] {
            let span = if argument.label == MODAL_LABEL {
                vec![argument.id]
            } else {
                tree.span(argument.id)
            };
            if let (Some(&first), Some(&last)) = (span.first(), span.last()) {
                opens.insert(first, argument.label.as_str());
                closes.insert(last);
            }
        }

        for (i, row) in rows.iter_mut().enumerate() {
            let id = TokenId(i as u32 + 1);
            row.push('\t');
            if id == predicate.id {
                row.push_str("(V*)");
            } else if let Some(label) = opens.get(&id) {
                if closes.contains(&id) {
                    row.push('(');
                    row.push_str(label);
                    row.push_str("*)");
                } else {
                    row.push('(');
                    row.push_str(label);
                    row.push('*');
                }
            } else if closes.contains(&id) {
                row.push_str("*)");
            } else {
                row.push('*');
            }
        }
    }
    Ok(())
}
