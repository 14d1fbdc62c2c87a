//! A sentence record: ordered word records plus the semantic-role
//! structure derived from the predicate and argument columns.

use crate::compress;
use crate::error::{CorpusError, CorpusResult};
use crate::reader::{Chunk, Conll08Options};
use crate::schema::{Field, FieldSchema};
use crate::span;
use crate::word::{TokenId, Word, PLACEHOLDER};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fixed row appended for the synthetic root token.
const ROOT_LINE: &str = "0\tROOT\tROOT\tROOT\tROOT\tROOT\tROOT\t0\t0\t_\t_";

/// Companion-side row for the synthetic root token.
const ROOT_COMPANION_LINE: &str = "0\t0\tROOT\tROOT\tROOT";

/// A predicate: the token heading a semantic-role frame and its sense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pub id: TokenId,
    pub sense: String,
}

/// One argument of a predicate: a token and its role label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub id: TokenId,
    pub label: String,
}

/// An ordered sequence of word records with the derived semantic-role
/// structure. When root insertion is on (the default), the last word is
/// the synthetic root with id `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub words: Vec<Word>,
    /// One entry per token carrying a non-empty predicate column.
    pub predicates: Vec<Predicate>,
    /// One inner list per predicate column, in column order.
    pub arguments: Vec<Vec<Argument>>,
    /// Schema this sentence was read under.
    pub schema: FieldSchema,
    /// Whether the trailing word is the synthetic root.
    pub has_root: bool,
}

impl Sentence {
    /// Build a sentence from one blank-line-delimited chunk.
    pub fn from_chunk(
        chunk: &Chunk,
        schema: FieldSchema,
        options: &Conll08Options,
    ) -> CorpusResult<Sentence> {
        if chunk.lines.is_empty() {
            return Err(CorpusError::MalformedLine {
                line: 0,
                message: "empty chunk".to_string(),
            });
        }
        let has_companion = !chunk.companion.is_empty();
        if has_companion && chunk.companion.len() != chunk.lines.len() {
            return Err(CorpusError::CompanionMismatch {
                line: chunk.companion.len() + 1,
            });
        }

        let mut lines: Vec<String> = chunk.lines.clone();
        let mut companion: Vec<String> = chunk.companion.clone();
        if options.insert_root {
            lines.push(root_line_for_width(&lines[0]));
            if has_companion {
                companion.push(ROOT_COMPANION_LINE.to_string());
            }
        }

        let mut words = Vec::with_capacity(lines.len());
        for (i, line) in lines.iter().enumerate() {
            let word = if has_companion {
                Word::parse_with_companion(line, &companion[i], options.gold_deps)?
            } else {
                Word::parse(line)
            };
            words.push(word);
        }

        // Predicate and argument columns start after the tenth column; the
        // first line decides how many argument columns the sentence has.
        let arg_columns = lines[0].split_whitespace().count().saturating_sub(11);
        let mut predicates = Vec::new();
        let mut arguments: Vec<Vec<Argument>> = vec![Vec::new(); arg_columns];
        for (line_no, line) in lines.iter().enumerate() {
            let columns: Vec<&str> = line.split_whitespace().collect();
            let id: TokenId = columns
                .first()
                .ok_or_else(|| CorpusError::MalformedLine {
                    line: line_no + 1,
                    message: "blank record line".to_string(),
                })?
                .parse()?;
            let srl: &[&str] = if columns.len() > 10 { &columns[10..] } else { &[] };
            if let Some(&sense) = srl.first() {
                if sense != PLACEHOLDER {
                    predicates.push(Predicate {
                        id,
                        sense: sense.to_string(),
                    });
                }
            }
            for (j, &label) in srl.iter().enumerate().skip(1) {
                if label == PLACEHOLDER {
                    continue;
                }
                let column = arguments.get_mut(j - 1).ok_or_else(|| {
                    CorpusError::MalformedLine {
                        line: line_no + 1,
                        message: format!("argument column {} not declared on the first line", j),
                    }
                })?;
                column.push(Argument {
                    id,
                    label: label.to_string(),
                });
            }
        }

        let mut sentence = Sentence {
            words,
            predicates,
            arguments,
            schema,
            has_root: options.insert_root,
        };
        if options.compress_multiwords {
            compress::compress_multiwords(&mut sentence)?;
        }
        Ok(sentence)
    }

    /// Words excluding the synthetic root.
    pub fn body_words(&self) -> &[Word] {
        let end = self.words.len() - self.has_root as usize;
        &self.words[..end]
    }

    /// Number of tokens excluding the synthetic root.
    pub fn body_len(&self) -> usize {
        self.words.len() - self.has_root as usize
    }

    /// The CoNLL-08 render: the ten-column echo per token with the
    /// predicate column and one argument column per predicate re-attached
    /// by token id. The synthetic root is omitted.
    pub fn render_conll08(&self) -> CorpusResult<String> {
        self.render_with_srl(Word::render_conll08)
    }

    /// CoNLL-08 layout projecting the side-channel head pair.
    pub fn render_conll08_mst(&self) -> CorpusResult<String> {
        self.render_with_srl(Word::render_conll08_mst)
    }

    fn render_with_srl(
        &self,
        render: fn(&Word) -> CorpusResult<String>,
    ) -> CorpusResult<String> {
        let senses: HashMap<TokenId, &str> = self
            .predicates
            .iter()
            .map(|p| (p.id, p.sense.as_str()))
            .collect();
        let labels: Vec<HashMap<TokenId, &str>> = self
            .arguments
            .iter()
            .map(|column| column.iter().map(|a| (a.id, a.label.as_str())).collect())
            .collect();

        let mut lines = Vec::with_capacity(self.body_len());
        for (i, word) in self.body_words().iter().enumerate() {
            let id = TokenId(i as u32 + 1);
            let mut line = render(word)?;
            line.push('\t');
            line.push_str(senses.get(&id).copied().unwrap_or(PLACEHOLDER));
            for column in &labels {
                line.push('\t');
                line.push_str(column.get(&id).copied().unwrap_or(PLACEHOLDER));
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }

    /// The CoNLL-06 dependency render with the gold head pair.
    pub fn render_conll06(&self) -> CorpusResult<String> {
        let mut lines = Vec::with_capacity(self.words.len());
        for word in &self.words {
            lines.push(word.render_conll06()?);
        }
        Ok(lines.join("\n"))
    }

    /// The CoNLL-06 dependency render with the side-channel head pair.
    pub fn render_conll06_mst(&self) -> CorpusResult<String> {
        let mut lines = Vec::with_capacity(self.words.len());
        for word in &self.words {
            lines.push(word.render_conll06_mst()?);
        }
        Ok(lines.join("\n"))
    }

    /// The bracketed-span CoNLL-05 render: the flattened six-column base,
    /// per-token predicate sense/lemma columns, then one bracket column
    /// per predicate reconstructed from the dependency tree.
    pub fn render_conll05(&self) -> CorpusResult<String> {
        let senses: HashMap<TokenId, &str> = self
            .predicates
            .iter()
            .map(|p| (p.id, p.sense.as_str()))
            .collect();

        let mut rows = Vec::with_capacity(self.body_len());
        for (i, word) in self.body_words().iter().enumerate() {
            let id = TokenId(i as u32 + 1);
            let mut row = word.render_conll05()?;
            match senses.get(&id) {
                Some(sense) => {
                    // A sense like `comer.01` splits into lemma and number.
                    let (lemma, number) = match sense.split_once('.') {
                        Some((lemma, number)) => (lemma, number),
                        None => (*sense, "-"),
                    };
                    row.push('\t');
                    row.push_str(number);
                    row.push('\t');
                    row.push_str(lemma);
                }
                None => row.push_str("\t-\t-"),
            }
            rows.push(row);
        }

        span::append_bracket_columns(self, &mut rows)?;
        Ok(rows.join("\n"))
    }

    /// Space-joined projection of one field over the body tokens, up to
    /// `limit` tokens when given.
    pub fn surface(&self, limit: Option<usize>, field: Field) -> CorpusResult<String> {
        let words = self.body_words();
        let end = limit.unwrap_or(words.len()).min(words.len());
        let mut parts = Vec::with_capacity(end);
        for word in &words[..end] {
            parts.push(word.field(field)?);
        }
        Ok(parts.join(" "))
    }

    /// Append one batch of extension values per word.
    pub fn append_columns(&mut self, rows: Vec<Vec<String>>) -> CorpusResult<()> {
        if rows.len() != self.words.len() {
            return Err(CorpusError::LengthMismatch {
                expected: self.words.len(),
                actual: rows.len(),
            });
        }
        for (word, row) in self.words.iter_mut().zip(rows) {
            word.append(row);
        }
        Ok(())
    }

    /// Replace one known column across all words.
    pub fn replace_column(&mut self, field: Field, values: &[String]) -> CorpusResult<()> {
        if values.len() != self.words.len() {
            return Err(CorpusError::LengthMismatch {
                expected: self.words.len(),
                actual: values.len(),
            });
        }
        for (word, value) in self.words.iter_mut().zip(values) {
            word.set_field(field, value.clone())?;
        }
        Ok(())
    }

    /// Replace a schema-named column across all words.
    pub fn replace_named(&mut self, name: &str, values: &[String]) -> CorpusResult<()> {
        if values.len() != self.words.len() {
            return Err(CorpusError::LengthMismatch {
                expected: self.words.len(),
                actual: values.len(),
            });
        }
        let schema = self.schema.clone();
        for (word, value) in self.words.iter_mut().zip(values) {
            word.set_named(&schema, name, value.clone())?;
        }
        Ok(())
    }
}

/// The root line padded with placeholder columns to the width detected
/// from the first real line.
fn root_line_for_width(first_line: &str) -> String {
    let columns = first_line.split_whitespace().count();
    let extra = columns.saturating_sub(11);
    if extra == 0 {
        return ROOT_LINE.to_string();
    }
    let mut line = String::from(ROOT_LINE);
    for _ in 0..extra {
        line.push('\t');
        line.push_str(PLACEHOLDER);
    }
    line
}
