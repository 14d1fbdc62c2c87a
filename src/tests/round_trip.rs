use crate::{Chunk, Conll08Options, FieldSchema, Sentence};

fn sentence(lines: &[&str]) -> Sentence {
    let chunk = Chunk::from_lines(lines);
    Sentence::from_chunk(&chunk, FieldSchema::new(), &Conll08Options::default()).unwrap()
}

#[test]
fn conll08_render_reparses_to_the_same_structure() {
    let original = sentence(&[
        "1 El      el      d d El      el      d 2 NMOD _        _  A0",
        "2 gato    gato    n n gato    gato    n 3 SBJ  _        A0 _",
        "3 come    comer   v v come    comer   v 0 ROOT comer.01 _  _",
        "4 pescado pescado n n pescado pescado n 3 OBJ  _        A1 _",
        "5 hoy     hoy     r r hoy     hoy     r 3 TMP  estar.01 _  AM-TMP",
    ]);

    let rendered = original.render_conll08().unwrap();
    let lines: Vec<&str> = rendered.lines().collect();
    let reparsed = sentence(&lines);

    assert_eq!(reparsed.predicates, original.predicates);
    assert_eq!(reparsed.arguments, original.arguments);
    assert_eq!(reparsed.body_len(), original.body_len());
}

#[test]
fn rendering_is_stable_across_a_round_trip() {
    let original = sentence(&[
        "1 gato gato n n gato gato n 2 SBJ  _        A0",
        "2 come comer v v come comer v 0 ROOT comer.01 _",
    ]);
    let rendered = original.render_conll08().unwrap();
    let lines: Vec<&str> = rendered.lines().collect();
    let reparsed = sentence(&lines);
    assert_eq!(reparsed.render_conll08().unwrap(), rendered);
}

#[test]
fn predicate_columns_survive_without_arguments() {
    // A predicate with an empty argument column still round-trips.
    let original = sentence(&[
        "1 llueve llover v v llueve llover v 0 ROOT llover.01 _",
    ]);
    let rendered = original.render_conll08().unwrap();
    assert_eq!(rendered, "1\tllueve\tllover\tv\tv\tllueve\tllover\tv\t0\tROOT\tllover.01\t_");
    let lines: Vec<&str> = rendered.lines().collect();
    let reparsed = sentence(&lines);
    assert_eq!(reparsed.predicates, original.predicates);
    assert_eq!(reparsed.arguments, original.arguments);
}
