//! Handling for dependency-annotated sentence corpora in the CoNLL-08
//! one-token-per-line format.
//!
//! The crate reads blank-line-delimited sentence chunks into
//! [`Sentence`] records (word rows plus the derived predicate/argument
//! structure), optionally merges multiword placeholder runs with
//! consistent renumbering ([`compress_multiwords`]), and renders
//! sentences into the related tabular dialects, including the
//! bracketed-span CoNLL-05 form reconstructed from the dependency tree.
//! A secondary module covers the TheBeast relational-facts format used
//! to feed logic-based inference engines.

mod beast;
mod compress;
mod display;
mod error;
mod reader;
mod schema;
mod sentence;
mod span;
mod word;

pub use beast::{quote_value, BeastCorpus, BeastInstance, BeastInstances, BeastSignature};
pub use compress::{compress_multiwords, Renumbering};
pub use display::SentenceDisplay;
pub use error::{CorpusError, CorpusResult};
pub use reader::{Chunk, ChunkReader, Conll08Corpus, Conll08Options, Sentences};
pub use schema::{Field, FieldSchema};
pub use sentence::{Argument, Predicate, Sentence};
pub use span::{DepTree, MODAL_LABEL};
pub use word::{TokenId, Word, PLACEHOLDER};
