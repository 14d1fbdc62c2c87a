use crate::{Conll08Corpus, Conll08Options, Field, FieldSchema, Sentence, TokenId};
use std::io::Write;
use tempfile::NamedTempFile;

fn corpus_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const TWO_SENTENCES: &str = "\
1 El   el   d d El   el   d 2 NMOD _ _
2 gato gato n n gato gato n 0 ROOT _ _

1 come comer v v come comer v 0 ROOT comer.01 _
";

#[test]
fn iterates_one_sentence_per_chunk() {
    let file = corpus_file(TWO_SENTENCES);
    let corpus = Conll08Corpus::new(file.path());

    let sentences: Vec<Sentence> = corpus.iter().unwrap().map(Result::unwrap).collect();
    assert_eq!(sentences.len(), 2);
    assert_eq!(sentences[0].body_len(), 2);
    assert_eq!(sentences[1].body_len(), 1);
    assert_eq!(sentences[1].predicates[0].id, TokenId(1));
}

#[test]
fn count_scans_without_building_sentences() {
    let file = corpus_file(TWO_SENTENCES);
    let corpus = Conll08Corpus::new(file.path());
    assert_eq!(corpus.count_sentences().unwrap(), 2);
    // Counting does not consume anything; a later pass still works.
    assert_eq!(corpus.iter().unwrap().count(), 2);
}

#[test]
fn companion_file_extends_every_word() {
    let file = corpus_file("1 El el d d El el d 2 NMOD _ _\n");
    let companion = corpus_file("O O B-x 2 NMOD\n");
    let corpus = Conll08Corpus::new(file.path()).with_companion(companion.path());

    let sentence = corpus.iter().unwrap().next().unwrap().unwrap();
    let word = &sentence.body_words()[0];
    assert_eq!(word.len(), 15);
    assert_eq!(word.field(Field::MaltHead).unwrap(), "2");
    // The synthetic root got its own companion-side row.
    assert_eq!(sentence.words.last().unwrap().len(), 15);
}

#[test]
fn gold_deps_duplicates_the_primary_head_pair() {
    let file = corpus_file("1 El el d d El el d 2 NMOD _ _\n");
    let companion = corpus_file("O O B-x 7 WRONG\n");
    let corpus = Conll08Corpus::new(file.path())
        .with_companion(companion.path())
        .with_options(Conll08Options {
            gold_deps: true,
            ..Conll08Options::default()
        });

    let sentence = corpus.iter().unwrap().next().unwrap().unwrap();
    let word = &sentence.body_words()[0];
    assert_eq!(word.field(Field::MaltHead).unwrap(), "2");
    assert_eq!(word.field(Field::MaltDepRel).unwrap(), "NMOD");
}

#[test]
fn compression_option_applies_during_iteration() {
    let file = corpus_file(
        "\
1 a    a     s s a a s 0 ROOT _ _
2 _    pesar _ _ _ _ _ 1 MWE  _ _
3 todo todo  n n todo todo n 1 OBJ _ _
",
    );
    let corpus = Conll08Corpus::new(file.path()).with_options(Conll08Options {
        compress_multiwords: true,
        ..Conll08Options::default()
    });

    let sentence = corpus.iter().unwrap().next().unwrap().unwrap();
    assert_eq!(sentence.body_len(), 2);
    assert_eq!(
        sentence.body_words()[0].field(Field::Lemma).unwrap(),
        "apesar"
    );
    assert_eq!(sentence.body_words()[1].id().unwrap(), TokenId(2));
}

#[test]
fn schema_travels_with_the_corpus() {
    let file = corpus_file("1 El el d d El el d 2 NMOD _ _\n");
    let schema = FieldSchema::new().extend(vec!["mst_head", "mst_dep_rel"]);
    let corpus = Conll08Corpus::new(file.path()).with_schema(schema);

    let mut sentence = corpus.iter().unwrap().next().unwrap().unwrap();
    // Declared extension columns are addressable once values land there.
    let rows: Vec<Vec<String>> = (0..sentence.words.len())
        .map(|_| vec!["5".to_string(), "DEP".to_string()])
        .collect();
    sentence.append_columns(rows).unwrap();
    let word = &sentence.body_words()[0];
    assert_eq!(word.named(&sentence.schema, "mst_head").unwrap(), "5");
    assert_eq!(word.named(&sentence.schema, "mst_dep_rel").unwrap(), "DEP");
}

#[test]
fn missing_file_reports_the_path() {
    let corpus = Conll08Corpus::new("/nonexistent/corpus.conll08");
    let err = corpus.iter().err().unwrap();
    assert!(err.to_string().contains("/nonexistent/corpus.conll08"));
}
