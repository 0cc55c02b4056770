use rand::rngs::StdRng;
use rand::SeedableRng;
use scene_nlg::intent::{ContextLabel, IntentKind, Phrases};
use scene_nlg::kernel::NlgError;
use scene_nlg::outputs::{determiner, generate, TemplateRepository};
use scene_nlg::perception::Counted;
use std::fs;
use std::path::Path;

fn repo(label: ContextLabel, template: &str) -> TemplateRepository {
    TemplateRepository::from_sets(vec![(label, vec![template])])
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn counted(items: &[(&str, u32)]) -> Phrases {
    Phrases::Counted(items.iter().map(|(l, c)| Counted::new(*l, *c)).collect())
}

#[test]
fn test_determiner_by_count() {
    let ctx = ContextLabel::DESCRIPTION_COUNT;
    assert_eq!(determiner(&Counted::new("cup", 0), ctx), "no ");
    assert_eq!(determiner(&Counted::new("cup", 1), ctx), "a ");
    assert_eq!(determiner(&Counted::new("cup", 5), ctx), "5 ");

    for n in [0, 1, 5] {
        assert_eq!(
            determiner(&Counted::new("phrase", n), ContextLabel::CONFIDENCE_SOMETHING),
            "",
            "Confidence phrases carry their own quantity"
        );
    }
}

#[test]
fn test_generate_single_entry() {
    let templates = repo(ContextLabel::DESCRIPTION_ANSWER_P, "I can see *.");
    let text = generate(
        &templates,
        &counted(&[("cupleft", 2)]),
        ContextLabel::DESCRIPTION_ANSWER_P,
        &mut rng(),
    )
    .unwrap();
    assert_eq!(text, "I can see 2 cupleft.");
}

#[test]
fn test_generate_empty_returns_template() {
    let templates = repo(ContextLabel::DESCRIPTION_ANSWER_P, "I can see *.");
    let text = generate(&templates, &counted(&[]), ContextLabel::DESCRIPTION_ANSWER_P, &mut rng()).unwrap();
    assert_eq!(text, "I can see *.", "No substitution for an empty list");
}

#[test]
fn test_generate_list_joining() {
    let templates = repo(ContextLabel::DESCRIPTION_COUNT, "There are *.");
    let text = generate(
        &templates,
        &counted(&[("bottle", 1), ("cups", 3), ("phone", 0)]),
        ContextLabel::DESCRIPTION_COUNT,
        &mut rng(),
    )
    .unwrap();
    assert_eq!(text, "There are a bottle, 3 cups and no phone.");

    let two = generate(
        &templates,
        &counted(&[("bottle", 1), ("cup", 1)]),
        ContextLabel::DESCRIPTION_COUNT,
        &mut rng(),
    )
    .unwrap();
    assert_eq!(two, "There are a bottle and a cup.");
}

#[test]
fn test_generate_text_verbatim_first_placeholder_only() {
    let templates = repo(ContextLabel::READ_TEXT_POSITIVE, "It says: * (* marks)");
    let text = generate(
        &templates,
        &Phrases::Text("2 for 1".to_string()),
        ContextLabel::READ_TEXT_POSITIVE,
        &mut rng(),
    )
    .unwrap();
    assert_eq!(text, "It says: 2 for 1 (* marks)");
}

#[test]
fn test_generate_confidence_has_no_determiner() {
    let templates = repo(ContextLabel::CONFIDENCE_SOMETHING, "I am *.");
    let text = generate(
        &templates,
        &counted(&[("80% that there is 1 cup", 1), ("more than 50% that there is no phone", 0)]),
        ContextLabel::CONFIDENCE_SOMETHING,
        &mut rng(),
    )
    .unwrap();
    assert_eq!(text, "I am 80% that there is 1 cup and more than 50% that there is no phone.");
}

#[test]
fn test_generate_missing_template_set() {
    let templates = repo(ContextLabel::DESCRIPTION_ANSWER_S, "I can see *.");
    let err = generate(&templates, &counted(&[]), ContextLabel::COLOR_DETECTION, &mut rng()).unwrap_err();
    assert!(matches!(err, NlgError::MissingTemplateSet(ContextLabel::COLOR_DETECTION)));

    let empty_set = TemplateRepository::from_sets(vec![(ContextLabel::COLOR_DETECTION, Vec::<String>::new())]);
    assert!(generate(&empty_set, &counted(&[]), ContextLabel::COLOR_DETECTION, &mut rng()).is_err());
}

#[test]
fn test_generate_is_reproducible_with_seed() {
    let templates = TemplateRepository::from_sets(vec![(
        ContextLabel::DESCRIPTION_ANSWER_S,
        vec!["A *.", "B *.", "C *.", "D *."],
    )]);
    let objects = counted(&[("cup", 1)]);

    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..20)
            .map(|_| generate(&templates, &objects, ContextLabel::DESCRIPTION_ANSWER_S, &mut rng).unwrap())
            .collect::<Vec<_>>()
    };

    let first = run(42);
    assert_eq!(first, run(42), "Same seed, same picks");
    assert!(first.iter().all(|t| t.ends_with(" a cup.")));
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_load_dir_reads_one_file_per_label() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "DESCRIPTION_ANSWER_S", "  I can see *.  \n\nThere is *.\n");
    write(dir.path(), "CONFIDENCE_NOTHING", "Ask me something first.\n");
    write(dir.path(), "description_answer_p", "wrong case is ignored *\n");
    write(dir.path(), "README", "not a label\n");
    fs::create_dir(dir.path().join("NEGATIVE_ANSWER_S")).unwrap();

    assert!(TemplateRepository::default().is_empty());

    let templates = TemplateRepository::load_dir(dir.path()).unwrap();
    assert!(!templates.is_empty());
    assert_eq!(templates.len(), 2);
    assert_eq!(
        templates.get(ContextLabel::DESCRIPTION_ANSWER_S).unwrap(),
        &["I can see *.".to_string(), "There is *.".to_string()],
        "Lines trimmed, blanks dropped, order kept"
    );
    assert!(templates.get(ContextLabel::DESCRIPTION_ANSWER_P).is_none());
    assert!(templates.get(ContextLabel::NEGATIVE_ANSWER_S).is_none());
}

#[test]
fn test_load_dir_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let err = TemplateRepository::load_dir(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, NlgError::TemplateIo { .. }));
}

#[test]
fn test_validate_reports_every_gap() {
    let templates = TemplateRepository::from_sets(vec![
        (ContextLabel::DESCRIPTION_NOTHING, vec!["Nothing."]),
        (ContextLabel::DESCRIPTION_ANSWER_S, vec!["*."]),
        (ContextLabel::DESCRIPTION_ANSWER_P, vec![]),
    ]);

    let err = templates.validate(IntentKind::Identify.emitted_labels()).unwrap_err();
    match err {
        NlgError::Configuration { missing } => {
            assert_eq!(missing, vec![ContextLabel::DESCRIPTION_ANSWER_P]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_shipped_templates_cover_all_labels() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sentence_templates");
    let templates = TemplateRepository::load_dir(&dir).unwrap();
    templates
        .validate(&IntentKind::required_labels())
        .expect("shipped templates must cover every reachable label");

    for label in [
        ContextLabel::DESCRIPTION_NOTHING,
        ContextLabel::DESCRIPTION_UNKNOWN,
        ContextLabel::CONFIDENCE_NOTHING,
        ContextLabel::READ_TEXT_NEGATIVE,
    ] {
        for template in templates.get(label).unwrap() {
            assert!(!template.contains('*'), "{label} is rendered without objects: {template:?}");
        }
    }
}
