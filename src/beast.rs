//! TheBeast relational-facts format.
//!
//! Instances are delimited by `>>`-prefixed lines; within an instance,
//! a line starting with `>` names a predicate and the following lines
//! are whitespace-split argument tuples. A companion signature registry
//! tracks the distinct values observed per type and the declared arity
//! of each predicate, and serializes the matching declaration file.

use crate::error::{CorpusError, CorpusResult};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Wrap a value in double quotes when quoting is enabled.
pub fn quote_value(value: &str, use_quotes: bool) -> String {
    if use_quotes {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}

/// One instance: a map from predicate name to its ground tuples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeastInstance {
    facts: BTreeMap<String, Vec<Vec<String>>>,
}

impl BeastInstance {
    pub fn new() -> BeastInstance {
        BeastInstance::default()
    }

    /// Parse an instance from the lines of one chunk.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> CorpusResult<BeastInstance> {
        let mut instance = BeastInstance::new();
        let mut current: Option<String> = None;
        for (line_no, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            if let Some(name) = line.strip_prefix('>') {
                instance.facts.entry(name.to_string()).or_default();
                current = Some(name.to_string());
            } else {
                let name = current.as_ref().ok_or_else(|| CorpusError::MalformedLine {
                    line: line_no + 1,
                    message: "tuple before any predicate header".to_string(),
                })?;
                let tuple: Vec<String> =
                    line.split_whitespace().map(str::to_string).collect();
                instance.add_tuple(name.clone(), tuple);
            }
        }
        Ok(instance)
    }

    /// Tuples recorded for a predicate.
    pub fn get(&self, name: &str) -> Option<&[Vec<String>]> {
        self.facts.get(name).map(Vec::as_slice)
    }

    /// Append one ground tuple for a predicate.
    pub fn add_tuple(&mut self, name: impl Into<String>, tuple: Vec<String>) {
        self.facts.entry(name.into()).or_default().push(tuple);
    }

    /// Names of all predicates with recorded tuples.
    pub fn predicates(&self) -> impl Iterator<Item = &str> {
        self.facts.keys().map(String::as_str)
    }
}

impl fmt::Display for BeastInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, tuples) in &self.facts {
            if !first {
                f.write_str("\n")?;
            }
            first = false;
            write!(f, ">{}", name)?;
            for tuple in tuples {
                write!(f, "\n{}", tuple.join("  "))?;
            }
        }
        Ok(())
    }
}

/// Registry of observed type values and declared predicate arities,
/// serializable as a TheBeast declaration file.
#[derive(Debug, Clone, Default)]
pub struct BeastSignature {
    strict: bool,
    types: BTreeMap<String, BTreeSet<String>>,
    defs: BTreeMap<String, Vec<String>>,
}

impl BeastSignature {
    pub fn new(strict: bool) -> BeastSignature {
        BeastSignature {
            strict,
            ..BeastSignature::default()
        }
    }

    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Record one observed value for a type.
    pub fn record_value(&mut self, type_name: impl Into<String>, value: impl Into<String>) {
        self.types
            .entry(type_name.into())
            .or_default()
            .insert(value.into());
    }

    /// Declare a predicate's argument types.
    pub fn declare(&mut self, name: impl Into<String>, arg_types: Vec<String>) {
        self.defs.insert(name.into(), arg_types);
    }

    /// Serialize `type NAME: v1,v2 ;` and `predicate NAME: T1 x T2 ;`
    /// declarations. Non-strict types carry a `...` continuation marker.
    pub fn write_declarations<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for (name, values) in &self.types {
            write!(writer, "type {}:", name)?;
            if !self.strict {
                write!(writer, " ...")?;
            }
            let values: Vec<&str> = values.iter().map(String::as_str).collect();
            writeln!(writer, " {} ;", values.join(","))?;
        }
        for (name, arg_types) in &self.defs {
            writeln!(writer, "predicate {}: {} ;", name, arg_types.join(" x "))?;
        }
        Ok(())
    }
}

/// A relational-facts corpus on disk, iterated instance by instance.
#[derive(Debug, Clone)]
pub struct BeastCorpus {
    path: PathBuf,
}

impl BeastCorpus {
    pub fn new(path: impl Into<PathBuf>) -> BeastCorpus {
        BeastCorpus { path: path.into() }
    }

    /// Open the corpus for one lazy forward pass.
    pub fn iter(&self) -> CorpusResult<BeastInstances> {
        Ok(BeastInstances {
            reader: open(&self.path)?,
            line: 0,
        })
    }

    /// Scan the file once, counting instances.
    pub fn count_instances(&self) -> CorpusResult<usize> {
        let mut count = 0;
        for instance in self.iter()? {
            instance?;
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

/// Lazy instance iterator over one pass of a relational-facts file.
pub struct BeastInstances {
    reader: BufReader<File>,
    line: usize,
}

impl BeastInstances {
    /// Accumulate stripped lines until a `>>` delimiter closes a
    /// non-empty group, or the stream ends.
    fn next_group(&mut self) -> CorpusResult<Option<Vec<String>>> {
        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            let read = self
                .reader
                .read_line(&mut line)
                .map_err(|e| CorpusError::Read {
                    line: self.line + 1,
                    message: e.to_string(),
                })?;
            if read == 0 {
                break;
            }
            self.line += 1;
            let trimmed = line.trim();
            if trimmed.starts_with(">>") {
                if !lines.is_empty() {
                    return Ok(Some(lines));
                }
            } else {
                lines.push(trimmed.to_string());
            }
        }
        if lines.is_empty() {
            Ok(None)
        } else {
            Ok(Some(lines))
        }
    }
}

impl Iterator for BeastInstances {
    type Item = CorpusResult<BeastInstance>;

    fn next(&mut self) -> Option<CorpusResult<BeastInstance>> {
        match self.next_group() {
            Ok(Some(lines)) => Some(BeastInstance::from_lines(&lines)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
