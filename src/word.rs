//! A single word record: one tabular row of a CoNLL-08 sentence.

use crate::error::{CorpusError, CorpusResult};
use crate::schema::{Field, FieldSchema};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The placeholder value used for absent columns.
pub const PLACEHOLDER: &str = "_";

/// Quoted placeholder used when padding a record out to the extension
/// columns; downstream relational-facts output expects quoted values.
const QUOTED_PLACEHOLDER: &str = "\"_\"";

/// Opaque 1-based token id. `0` names the synthetic root.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TokenId(pub u32);

impl TokenId {
    /// Id of the synthetic root token.
    pub const ROOT: TokenId = TokenId(0);
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TokenId {
    type Err = CorpusError;

    fn from_str(s: &str) -> CorpusResult<TokenId> {
        s.parse::<u32>()
            .map(TokenId)
            .map_err(|_| CorpusError::BadTokenId {
                value: s.to_string(),
            })
    }
}

/// One token row: an ordered list of field values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    fields: Vec<String>,
}

impl Word {
    /// Parse a word from a whitespace-delimited line.
    ///
    /// Only the first ten columns are kept; the predicate and argument
    /// columns beyond them belong to the sentence, not the word. A line
    /// with exactly eight columns (a corpus that omits the head pair) is
    /// padded back up to ten with placeholders.
    pub fn parse(line: &str) -> Word {
        let mut fields: Vec<String> = line
            .split_whitespace()
            .take(10)
            .map(str::to_string)
            .collect();
        if fields.len() == 8 {
            fields.push(PLACEHOLDER.to_string());
            fields.push(PLACEHOLDER.to_string());
        }
        Word { fields }
    }

    /// Parse a word together with its side-channel line.
    ///
    /// The companion fields are appended after the primary ten. In
    /// gold-deps mode only the first three companion fields are kept and
    /// the primary head/relation pair is duplicated in place of the
    /// companion-reported one, so the gold syntactic structure wins.
    pub fn parse_with_companion(
        line: &str,
        companion: &str,
        gold_deps: bool,
    ) -> CorpusResult<Word> {
        let mut word = Word::parse(line);
        if gold_deps {
            let head = word.field(Field::Head)?.to_string();
            let dep_rel = word.field(Field::DepRel)?.to_string();
            word.fields
                .extend(companion.split_whitespace().take(3).map(str::to_string));
            word.fields.push(head);
            word.fields.push(dep_rel);
        } else {
            word.fields
                .extend(companion.split_whitespace().map(str::to_string));
        }
        Ok(word)
    }

    /// Number of columns this word carries.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the word has no columns at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Value of a known column.
    pub fn field(&self, field: Field) -> CorpusResult<&str> {
        self.fields
            .get(field.index())
            .map(String::as_str)
            .ok_or_else(|| CorpusError::MissingColumn {
                field: field.name().to_string(),
            })
    }

    /// Overwrite a known column.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> CorpusResult<()> {
        let slot = self
            .fields
            .get_mut(field.index())
            .ok_or_else(|| CorpusError::MissingColumn {
                field: field.name().to_string(),
            })?;
        *slot = value.into();
        Ok(())
    }

    /// Value of a column addressed by schema name.
    pub fn named(&self, schema: &FieldSchema, name: &str) -> CorpusResult<&str> {
        let index = schema.index_of(name)?;
        self.fields
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| CorpusError::MissingColumn {
                field: name.to_string(),
            })
    }

    /// Overwrite a column addressed by schema name.
    pub fn set_named(
        &mut self,
        schema: &FieldSchema,
        name: &str,
        value: impl Into<String>,
    ) -> CorpusResult<()> {
        let index = schema.index_of(name)?;
        let slot = self
            .fields
            .get_mut(index)
            .ok_or_else(|| CorpusError::MissingColumn {
                field: name.to_string(),
            })?;
        *slot = value.into();
        Ok(())
    }

    /// The token's own id.
    pub fn id(&self) -> CorpusResult<TokenId> {
        self.field(Field::Id)?.parse()
    }

    pub fn set_id(&mut self, id: TokenId) -> CorpusResult<()> {
        self.set_field(Field::Id, id.to_string())
    }

    /// The token's head, or `None` when the head column is a placeholder.
    pub fn head(&self) -> CorpusResult<Option<TokenId>> {
        let raw = self.field(Field::Head)?;
        if raw == PLACEHOLDER {
            return Ok(None);
        }
        raw.parse().map(Some)
    }

    pub fn set_head(&mut self, head: TokenId) -> CorpusResult<()> {
        self.set_field(Field::Head, head.to_string())
    }

    /// Append a batch of extension values.
    ///
    /// A record still at the ten-column boundary is first padded with
    /// quoted placeholders up to the full known-column width, so the
    /// appended values land in declared extension slots. Records already
    /// past the boundary are left alone, which makes repeated appends
    /// safe.
    pub fn append<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = String>,
    {
        if self.fields.len() == 10 {
            for _ in 10..Field::COUNT {
                self.fields.push(QUOTED_PLACEHOLDER.to_string());
            }
        }
        self.fields.extend(values);
    }

    /// The ten-column CoNLL-08 projection.
    pub fn render_conll08(&self) -> CorpusResult<String> {
        self.project(&[
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
        ])
    }

    /// CoNLL-08 layout with the side-channel head pair projected instead
    /// of the gold one.
    pub fn render_conll08_mst(&self) -> CorpusResult<String> {
        self.project(&[
            Field::Id,
            Field::Form,
            Field::Lemma,
            Field::Gpos,
            Field::Ppos,
            Field::SForm,
            Field::SLemma,
            Field::SPpos,
            Field::MaltHead,
            Field::MaltDepRel,
        ])
    }

    /// The flattened six-column CoNLL-05 projection.
    pub fn render_conll05(&self) -> CorpusResult<String> {
        let form = self.field(Field::Form)?;
        let ppos = self.field(Field::Ppos)?;
        Ok([form, PLACEHOLDER, ppos, PLACEHOLDER, PLACEHOLDER, PLACEHOLDER].join("\t"))
    }

    /// The CoNLL-06 dependency projection with the gold head pair.
    pub fn render_conll06(&self) -> CorpusResult<String> {
        self.render_conll06_pair(Field::Head, Field::DepRel)
    }

    /// The CoNLL-06 dependency projection with the side-channel head pair.
    pub fn render_conll06_mst(&self) -> CorpusResult<String> {
        self.render_conll06_pair(Field::MaltHead, Field::MaltDepRel)
    }

    fn render_conll06_pair(&self, head: Field, dep_rel: Field) -> CorpusResult<String> {
        let ppos = self.field(Field::Ppos)?;
        let coarse: String = ppos.chars().take(1).collect();
        let head = self.field(head)?;
        let dep_rel = self.field(dep_rel)?;
        Ok([
            self.field(Field::Id)?,
            self.field(Field::Form)?,
            self.field(Field::Lemma)?,
            coarse.as_str(),
            ppos,
            PLACEHOLDER,
            head,
            dep_rel,
            head,
            dep_rel,
        ]
        .join("\t"))
    }

    fn project(&self, fields: &[Field]) -> CorpusResult<String> {
        let mut parts = Vec::with_capacity(fields.len());
        for &field in fields {
            parts.push(self.field(field)?);
        }
        Ok(parts.join("\t"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_the_first_ten_columns() {
        let word = Word::parse("3\tcome\tcomer\tv\tv\tcome\tcomer\tv\t0\tROOT\tcomer.01\t_");
        assert_eq!(word.len(), 10);
        assert_eq!(word.field(Field::Form).unwrap(), "come");
        assert_eq!(word.id().unwrap(), TokenId(3));
        assert_eq!(word.head().unwrap(), Some(TokenId(0)));
    }

    #[test]
    fn parse_pads_eight_column_lines() {
        let word = Word::parse("1 El el d d El el d");
        assert_eq!(word.len(), 10);
        assert_eq!(word.field(Field::Head).unwrap(), PLACEHOLDER);
        assert_eq!(word.head().unwrap(), None);
    }

    #[test]
    fn companion_fields_are_appended() {
        let word = Word::parse_with_companion(
            "1 El el d d El el d 2 NMOD",
            "O O B-noun 2 NMOD",
            false,
        )
        .unwrap();
        assert_eq!(word.len(), 15);
        assert_eq!(word.field(Field::Ne03).unwrap(), "O");
        assert_eq!(word.field(Field::MaltHead).unwrap(), "2");
    }

    #[test]
    fn gold_deps_overrides_the_companion_head_pair() {
        let word = Word::parse_with_companion(
            "1 El el d d El el d 2 NMOD",
            "O O B-noun 5 OBJ",
            true,
        )
        .unwrap();
        assert_eq!(word.field(Field::MaltHead).unwrap(), "2");
        assert_eq!(word.field(Field::MaltDepRel).unwrap(), "NMOD");
    }

    #[test]
    fn append_pads_once_at_the_boundary() {
        let mut word = Word::parse("1 El el d d El el d 2 NMOD");
        word.append(vec!["x".to_string()]);
        assert_eq!(word.len(), 16);
        assert_eq!(word.field(Field::Ne03).unwrap(), "\"_\"");

        // A second append must not pad again.
        word.append(vec!["y".to_string()]);
        assert_eq!(word.len(), 17);
    }

    #[test]
    fn conll06_projects_the_coarse_pos_and_head_pair() {
        let word = Word::parse("2 gato gato n nc gato gato n 3 SBJ");
        assert_eq!(
            word.render_conll06().unwrap(),
            "2\tgato\tgato\tn\tnc\t_\t3\tSBJ\t3\tSBJ"
        );
    }

    #[test]
    fn mst_render_requires_the_companion_columns() {
        let word = Word::parse("2 gato gato n n gato gato n 3 SBJ");
        match word.render_conll06_mst() {
            Err(CorpusError::MissingColumn { field }) => assert_eq!(field, "malt_head"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn bad_id_reports_the_raw_value() {
        let word = Word::parse("x form lemma g p sf sl sp 0 ROOT");
        match word.id() {
            Err(CorpusError::BadTokenId { value }) => assert_eq!(value, "x"),
            other => panic!("expected BadTokenId, got {:?}", other),
        }
    }
}
