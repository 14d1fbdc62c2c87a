//! Column schema for CoNLL-08 word records.
//!
//! The first fifteen columns of a record are fixed and addressed through
//! the closed [`Field`] enum. Corpora that carry further columns (for
//! example a reranked head/relation pair) declare them on a
//! [`FieldSchema`]; extending a schema derives a new value rather than
//! mutating shared state, so sentences read under different schemas never
//! interfere.

use crate::error::{CorpusError, CorpusResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The known CoNLL-08 columns, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    /// 1-based token position; `0` for the synthetic root.
    Id,
    /// Surface form.
    Form,
    /// Lemma.
    Lemma,
    /// Gold part of speech.
    Gpos,
    /// Predicted part of speech.
    Ppos,
    /// Split surface form.
    SForm,
    /// Split lemma.
    SLemma,
    /// Split part of speech.
    SPpos,
    /// Gold syntactic head.
    Head,
    /// Gold dependency relation.
    DepRel,
    /// CoNLL-03 named entity column.
    Ne03,
    /// BBN named entity column.
    NeBbn,
    /// WordNet supersense column.
    Wnet,
    /// Head reported by the side-channel parser.
    MaltHead,
    /// Dependency relation reported by the side-channel parser.
    MaltDepRel,
}

impl Field {
    /// Number of known columns.
    pub const COUNT: usize = 15;

    const ALL: [Field; Field::COUNT] = [
        Field::Id,
        Field::Form,
        Field::Lemma,
        Field::Gpos,
        Field::Ppos,
        Field::SForm,
        Field::SLemma,
        Field::SPpos,
        Field::Head,
        Field::DepRel,
        Field::Ne03,
        Field::NeBbn,
        Field::Wnet,
        Field::MaltHead,
        Field::MaltDepRel,
    ];

    /// Column index of this field.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name as it appears in schema declarations.
    pub fn name(self) -> &'static str {
        BASE_NAMES[self.index()]
    }

    /// Look up a known field by column name.
    pub fn from_name(name: &str) -> Option<Field> {
        BASE_INDEX.get(name).copied()
    }
}

const BASE_NAMES: [&str; Field::COUNT] = [
    "id",
    "form",
    "lemma",
    "gpos",
    "ppos",
    "s_form",
    "s_lemma",
    "s_ppos",
    "head",
    "dep_rel",
    "ne_03",
    "ne_bbn",
    "wnet",
    "malt_head",
    "malt_dep_rel",
];

static BASE_INDEX: Lazy<HashMap<&'static str, Field>> = Lazy::new(|| {
    BASE_NAMES
        .iter()
        .copied()
        .zip(Field::ALL.iter().copied())
        .collect()
});

/// An immutable column schema: the fifteen known columns plus any
/// declared extension columns, addressable by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    extensions: Vec<String>,
}

impl FieldSchema {
    /// Schema with only the known columns.
    pub fn new() -> FieldSchema {
        FieldSchema::default()
    }

    /// Derive a new schema with the given extension columns appended.
    pub fn extend<I, S>(&self, names: I) -> FieldSchema
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut extensions = self.extensions.clone();
        extensions.extend(names.into_iter().map(Into::into));
        FieldSchema { extensions }
    }

    /// Total number of declared columns.
    pub fn len(&self) -> usize {
        Field::COUNT + self.extensions.len()
    }

    /// True when no extension columns are declared.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Names of the declared extension columns.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Column index for a name, known or extension.
    pub fn index_of(&self, name: &str) -> CorpusResult<usize> {
        if let Some(field) = Field::from_name(name) {
            return Ok(field.index());
        }
        self.extensions
            .iter()
            .position(|ext| ext == name)
            .map(|pos| Field::COUNT + pos)
            .ok_or_else(|| CorpusError::UnknownField {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_fields_resolve_to_their_column() {
        assert_eq!(Field::from_name("id"), Some(Field::Id));
        assert_eq!(Field::from_name("dep_rel"), Some(Field::DepRel));
        assert_eq!(Field::DepRel.index(), 9);
        assert_eq!(Field::MaltDepRel.index(), 14);
        assert_eq!(Field::Head.name(), "head");
    }

    #[test]
    fn extension_columns_index_past_the_known_set() {
        let schema = FieldSchema::new().extend(vec!["mst_head", "mst_dep_rel"]);
        assert_eq!(schema.index_of("mst_head").unwrap(), 15);
        assert_eq!(schema.index_of("mst_dep_rel").unwrap(), 16);
        assert_eq!(schema.len(), 17);
    }

    #[test]
    fn extending_derives_a_new_schema() {
        let base = FieldSchema::new();
        let extended = base.extend(vec!["mst_head"]);
        assert!(base.index_of("mst_head").is_err());
        assert!(extended.index_of("mst_head").is_ok());
    }

    #[test]
    fn unknown_name_is_an_error() {
        let schema = FieldSchema::new();
        match schema.index_of("nope") {
            Err(CorpusError::UnknownField { name }) => assert_eq!(name, "nope"),
            other => panic!("expected UnknownField, got {:?}", other),
        }
    }
}
