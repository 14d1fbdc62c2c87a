//! Multiword token compression.
//!
//! Some corpora split a multi-part surface token into one real row
//! followed by placeholder rows that only carry lemma fragments. Word
//! based consumers expect one row per surface token, so compression
//! merges each placeholder run into the preceding real token and
//! renumbers every id-bearing structure to close the gap.

use crate::error::{CorpusError, CorpusResult};
use crate::schema::Field;
use crate::sentence::Sentence;
use crate::word::{TokenId, PLACEHOLDER};

/// A pure old-id to new-id mapping produced by removing a placeholder
/// run. Every structure that carries token ids is shifted through the
/// same mapping, which is what keeps words, heads, predicates and
/// arguments consistent with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renumbering {
    /// Id of the surviving merge target; ids at or below it are stable.
    skip: u32,
    /// How many tokens the merge removed.
    removed: u32,
}

impl Renumbering {
    pub fn new(skip: TokenId, removed: u32) -> Renumbering {
        Renumbering {
            skip: skip.0,
            removed,
        }
    }

    /// Map an old id to its post-removal value.
    pub fn map(&self, id: TokenId) -> TokenId {
        if id.0 > self.skip {
            TokenId(id.0 - self.removed)
        } else {
            id
        }
    }
}

/// A maximal placeholder run, by word-list index.
struct PlaceholderRun {
    /// Index of the first placeholder word.
    start: usize,
    /// Number of placeholder words.
    len: usize,
}

/// Merge every placeholder run in the sentence, renumbering ids, heads,
/// predicates and arguments after each merge. A sentence without runs is
/// left untouched, so the operation is idempotent.
pub fn compress_multiwords(sentence: &mut Sentence) -> CorpusResult<()> {
    while let Some(run) = find_placeholder_run(sentence)? {
        merge_run(sentence, run)?;
    }
    Ok(())
}

/// Find the first placeholder run among the body words.
fn find_placeholder_run(sentence: &Sentence) -> CorpusResult<Option<PlaceholderRun>> {
    let body = sentence.body_words();
    let mut start = None;
    for (i, word) in body.iter().enumerate() {
        let is_placeholder =
            word.field(Field::Form)? == PLACEHOLDER && word.field(Field::Gpos)? == PLACEHOLDER;
        match (start, is_placeholder) {
            (None, true) => {
                if i == 0 {
                    return Err(CorpusError::LeadingPlaceholderRun);
                }
                start = Some(i);
            }
            (Some(first), false) => {
                return Ok(Some(PlaceholderRun {
                    start: first,
                    len: i - first,
                }));
            }
            _ => {}
        }
    }
    Ok(start.map(|first| PlaceholderRun {
        start: first,
        len: body.len() - first,
    }))
}

fn merge_run(sentence: &mut Sentence, run: PlaceholderRun) -> CorpusResult<()> {
    // The surviving token sits just before the run; with ids equal to
    // their 1-based rank, its id equals the run's list index.
    let target = run.start - 1;
    let skip = run.start as u32;
    let size = run.len as u32 + 1;

    // Fold the lemma fragments onto the surviving token, in order.
    let mut lemma = sentence.words[target].field(Field::Lemma)?.to_string();
    for word in &sentence.words[run.start..run.start + run.len] {
        lemma.push_str(word.field(Field::Lemma)?);
    }
    sentence.words[target].set_field(Field::Lemma, lemma)?;

    // The merged token attaches wherever some token of the span pointed
    // outside it; without such a token the surviving head stays as-is.
    for i in target..run.start + run.len {
        let head = match sentence.words[i].head()? {
            Some(head) => head,
            None => continue,
        };
        if head.0 < skip || head.0 >= skip + size + 1 {
            let dep_rel = sentence.words[i].field(Field::DepRel)?.to_string();
            sentence.words[target].set_head(head)?;
            sentence.words[target].set_field(Field::DepRel, dep_rel)?;
            break;
        }
    }

    sentence.words.drain(run.start..run.start + run.len);

    let renumbering = Renumbering::new(TokenId(skip), size - 1);
    for word in &mut sentence.words {
        let id = word.id()?;
        word.set_id(renumbering.map(id))?;
        if let Some(head) = word.head()? {
            word.set_head(renumbering.map(head))?;
        }
    }
    for predicate in &mut sentence.predicates {
        predicate.id = renumbering.map(predicate.id);
    }
    for column in &mut sentence.arguments {
        for argument in column {
            argument.id = renumbering.map(argument.id);
        }
    }
    Ok(())
}
