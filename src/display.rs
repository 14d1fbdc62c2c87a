//! Aligned debug display for sentences.
//!
//! Renders the surface forms on one line and marks predicates and their
//! arguments underneath, each on its own line, anchored at the token the
//! annotation belongs to. Meant for tests and debugging, not for corpus
//! output.

use crate::schema::Field;
use crate::sentence::Sentence;
use crate::word::TokenId;
use std::fmt;
use unicode_width::UnicodeWidthStr;

// El  gato  come  pescado
//           ╰Pred(comer.01)
//     ╰Arg(A0)
//                 ╰Arg(A1)
pub struct SentenceDisplay<'a> {
    sentence: &'a Sentence,
}

impl<'a> SentenceDisplay<'a> {
    pub fn new(sentence: &'a Sentence) -> SentenceDisplay<'a> {
        SentenceDisplay { sentence }
    }
}

impl<'a> fmt::Display for SentenceDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SPACE_PADDING: usize = 2;

        let mut token_start_display_idx = Vec::new();
        let mut opening_line = String::new();
        for (i, word) in self.sentence.body_words().iter().enumerate() {
            if i > 0 {
                opening_line.extend(std::iter::repeat(' ').take(SPACE_PADDING));
            }
            token_start_display_idx.push(UnicodeWidthStr::width(&*opening_line));
            opening_line.push_str(word.field(Field::Form).unwrap_or("?"));
        }
        f.write_str(&opening_line)?;

        let marker = |f: &mut fmt::Formatter<'_>, id: TokenId, text: &str| -> fmt::Result {
            let index = match (id.0 as usize).checked_sub(1) {
                Some(index) if index < token_start_display_idx.len() => index,
                _ => return Ok(()),
            };
            f.write_str("\n")?;
            for _ in 0..token_start_display_idx[index] {
                f.write_str(" ")?;
            }
            write!(f, "╰{}", text)
        };

        for (j, predicate) in self.sentence.predicates.iter().enumerate() {
            marker(f, predicate.id, &format!("Pred({})", predicate.sense))?;
            if let Some(column) = self.sentence.arguments.get(j) {
                for argument in column {
                    marker(f, argument.id, &format!("Arg({})", argument.label))?;
                }
            }
        }
        Ok(())
    }
}
