//! Chunked corpus input: blank-line-delimited sentence chunks, with an
//! optional companion stream paired line by line, and the lazy sentence
//! iterator over a CoNLL-08 file.

use crate::error::{CorpusError, CorpusResult};
use crate::schema::FieldSchema;
use crate::sentence::Sentence;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// One blank-line-delimited group of stripped lines, with the companion
/// lines paired per ordinal position when a companion stream is present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chunk {
    pub lines: Vec<String>,
    pub companion: Vec<String>,
}

impl Chunk {
    /// Build a chunk directly from string lines. Handy in tests.
    pub fn from_lines(lines: &[&str]) -> Chunk {
        Chunk {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            companion: Vec::new(),
        }
    }

    /// Attach companion lines to this chunk.
    pub fn with_companion(mut self, lines: &[&str]) -> Chunk {
        self.companion = lines.iter().map(|l| l.to_string()).collect();
        self
    }
}

/// Splits a line stream into blank-line-delimited chunks.
///
/// The companion stream, when present, advances in lockstep: one
/// companion line per primary line. The sequence ends at the first empty
/// chunk, which covers both end of stream and a leading blank line.
pub struct ChunkReader<R> {
    reader: R,
    companion: Option<R>,
    line: usize,
}

impl<R: BufRead> ChunkReader<R> {
    pub fn new(reader: R) -> ChunkReader<R> {
        ChunkReader {
            reader,
            companion: None,
            line: 0,
        }
    }

    pub fn with_companion(reader: R, companion: R) -> ChunkReader<R> {
        ChunkReader {
            reader,
            companion: Some(companion),
            line: 0,
        }
    }

    /// Read the next chunk, or `None` once the stream is exhausted.
    pub fn next_chunk(&mut self) -> CorpusResult<Option<Chunk>> {
        let mut chunk = Chunk::default();
        loop {
            let mut line = String::new();
            let read = self
                .reader
                .read_line(&mut line)
                .map_err(|e| CorpusError::Read {
                    line: self.line + 1,
                    message: e.to_string(),
                })?;
            self.line += 1;

            let companion_line = match &mut self.companion {
                Some(companion) => {
                    let mut oline = String::new();
                    let oread = companion
                        .read_line(&mut oline)
                        .map_err(|e| CorpusError::Read {
                            line: self.line,
                            message: e.to_string(),
                        })?;
                    Some((oread, oline))
                }
                None => None,
            };

            let trimmed = line.trim();
            if read == 0 || trimmed.is_empty() {
                break;
            }
            chunk.lines.push(trimmed.to_string());

            if let Some((oread, oline)) = companion_line {
                if oread == 0 {
                    return Err(CorpusError::CompanionMismatch { line: self.line });
                }
                chunk.companion.push(oline.trim().to_string());
            }
        }
        if chunk.lines.is_empty() {
            Ok(None)
        } else {
            Ok(Some(chunk))
        }
    }
}

/// Reader behavior for a CoNLL-08 corpus.
#[derive(Debug, Clone)]
pub struct Conll08Options {
    /// Append the synthetic root row to every sentence.
    pub insert_root: bool,
    /// Merge multiword placeholder runs after construction.
    pub compress_multiwords: bool,
    /// Let the gold head pair override the companion-reported one.
    pub gold_deps: bool,
}

impl Default for Conll08Options {
    fn default() -> Conll08Options {
        Conll08Options {
            insert_root: true,
            compress_multiwords: false,
            gold_deps: false,
        }
    }
}

/// A CoNLL-08 corpus on disk: a primary file, an optional companion
/// file, and the options and schema sentences are read under.
///
/// The corpus itself holds no file handles; every call to [`iter`]
/// (or [`count_sentences`]) opens the files for one forward pass and
/// releases them when the returned iterator is exhausted or dropped.
///
/// [`iter`]: Conll08Corpus::iter
/// [`count_sentences`]: Conll08Corpus::count_sentences
#[derive(Debug, Clone)]
pub struct Conll08Corpus {
    path: PathBuf,
    companion_path: Option<PathBuf>,
    options: Conll08Options,
    schema: FieldSchema,
}

impl Conll08Corpus {
    pub fn new(path: impl Into<PathBuf>) -> Conll08Corpus {
        Conll08Corpus {
            path: path.into(),
            companion_path: None,
            options: Conll08Options::default(),
            schema: FieldSchema::new(),
        }
    }

    /// Pair every sentence with lines from a companion file.
    pub fn with_companion(mut self, path: impl Into<PathBuf>) -> Conll08Corpus {
        self.companion_path = Some(path.into());
        self
    }

    pub fn with_options(mut self, options: Conll08Options) -> Conll08Corpus {
        self.options = options;
        self
    }

    /// Read sentences under a schema with extension columns declared.
    pub fn with_schema(mut self, schema: FieldSchema) -> Conll08Corpus {
        self.schema = schema;
        self
    }

    /// Open the corpus for one lazy forward pass.
    pub fn iter(&self) -> CorpusResult<Sentences> {
        let reader = open(&self.path)?;
        let chunks = match &self.companion_path {
            Some(companion) => ChunkReader::with_companion(reader, open(companion)?),
            None => ChunkReader::new(reader),
        };
        Ok(Sentences {
            chunks,
            options: self.options.clone(),
            schema: self.schema.clone(),
        })
    }

    /// Scan the file once, counting sentences.
    pub fn count_sentences(&self) -> CorpusResult<usize> {
        let mut chunks = ChunkReader::new(open(&self.path)?);
        let mut count = 0;
        while chunks.next_chunk()?.is_some() {
            count += 1;
        }
        Ok(count)
    }
}

fn open(path: &Path) -> CorpusResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| CorpusError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

/// Lazy sentence iterator over one pass of a corpus file.
pub struct Sentences {
    chunks: ChunkReader<BufReader<File>>,
    options: Conll08Options,
    schema: FieldSchema,
}

impl Iterator for Sentences {
    type Item = CorpusResult<Sentence>;

    fn next(&mut self) -> Option<CorpusResult<Sentence>> {
        match self.chunks.next_chunk() {
            Ok(Some(chunk)) => Some(Sentence::from_chunk(
                &chunk,
                self.schema.clone(),
                &self.options,
            )),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
