use gedtree_core::{extract_year, BiblicalNameFilter, FamilyTreeData, GedcomParser, Sex};

const GENESIS: &str = include_str!("fixtures/genesis.ged");

fn parse_genesis() -> FamilyTreeData {
    GedcomParser::new().parse(GENESIS)
}

#[test]
fn output_keys_match_individual_ids() {
    let data = parse_genesis();
    let ids: Vec<&str> = data.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["I1", "I2", "I3", "I4", "I5"]);
}

#[test]
fn biblical_filter_drops_modern_names() {
    let mut parser = GedcomParser::new().with_filter(Box::new(BiblicalNameFilter));
    let data = parser.parse(GENESIS);

    let ids: Vec<&str> = data.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["I1", "I2", "I3", "I5"]);
    // Filtered individuals still take part in relationship building.
    assert_eq!(parser.document().individuals.len(), 5);
}

#[test]
fn slash_surname_is_split_from_given_name() {
    let data = parse_genesis();
    let john = &data["I4"];
    assert_eq!(john.given_name, "John");
    assert_eq!(john.surname, "Smith");
    assert_eq!(john.name, "John Smith");
    assert_eq!(john.sex, Sex::M);
}

#[test]
fn family_links_parents_children_and_spouses_without_duplicates() {
    let data = parse_genesis();

    assert_eq!(data["I3"].parents, vec!["I1".to_string(), "I2".to_string()]);
    assert_eq!(data["I1"].children, vec!["I3".to_string()]);
    assert_eq!(data["I2"].children, vec!["I3".to_string()]);
    assert_eq!(data["I1"].spouse.as_deref(), Some("Eve"));
    assert_eq!(data["I2"].spouse.as_deref(), Some("Adam"));
    assert!(data["I4"].parents.is_empty());
    assert!(data["I4"].spouse.is_none());
}

#[test]
fn note_records_and_inline_notes_join_continuations() {
    let data = parse_genesis();
    assert_eq!(
        data["I1"].notes,
        vec!["Formed from the dust of the ground\nGenesis 2:7".to_string()]
    );
    assert_eq!(data["I5"].notes, vec!["Builder of the ark".to_string()]);
}

#[test]
fn bc_dates_give_positive_age_at_death() {
    let data = parse_genesis();
    let noah = &data["I5"];
    assert_eq!(noah.birth_year, "2948 BC");
    assert_eq!(noah.death_year, "1998 BC");
    assert_eq!(noah.age_at_death, "950 years");
    assert_eq!(noah.verses.len(), 2);
}

#[test]
fn missing_fields_fall_back_to_labels() {
    let data = parse_genesis();
    let adam = &data["I1"];
    assert_eq!(adam.title, "Gardener");
    assert_eq!(adam.description, "Biblical figure, gardener from Eden.");
    assert_eq!(adam.birth_year, "ABT 4004 BC");
    assert_eq!(adam.death_year, "Unknown");
    assert_eq!(adam.age_at_death, "Unknown");

    let seth = &data["I3"];
    assert_eq!(seth.title, "Biblical Figure");
    assert_eq!(seth.description, "Biblical figure.");
    assert!(seth.verses.is_empty());
}

#[test]
fn extract_year_reads_free_form_dates() {
    assert_eq!(extract_year("ABT 1400 BC"), Some(1400));
    assert_eq!(extract_year("1400"), Some(1400));
    assert_eq!(extract_year("Unknown"), None);
}

#[test]
fn repeated_parses_are_identical() {
    let mut parser = GedcomParser::new();
    let first = parser.parse(GENESIS);
    let second = parser.parse(GENESIS);
    assert_eq!(first, second);
    assert_eq!(first, GedcomParser::new().parse(GENESIS));
}

#[test]
fn malformed_input_degrades_to_empty_output() {
    let mut parser = GedcomParser::new();
    assert!(parser.parse("").is_empty());
    assert!(parser.parse("not gedcom at all\n@@@\n").is_empty());

    let data = parser.parse("0 @I1@ INDI\n1 FAMC @F9@\n0 @F1@ FAM\n1 HUSB @I7@\n1 CHIL @I1@");
    assert_eq!(data.len(), 1);
    assert!(data["I1"].parents.is_empty());
    assert_eq!(data["I1"].name, "Unknown");
}

#[test]
fn diagnostics_report_counts_roots_and_dangling_references() {
    let mut parser = GedcomParser::new();
    parser.parse(GENESIS);

    let stats = parser.statistics();
    assert_eq!(stats.individuals, 5);
    assert_eq!(stats.families, 1);
    assert_eq!(stats.males, 4);
    assert_eq!(stats.females, 1);

    let roots: Vec<&str> = parser
        .find_roots()
        .into_iter()
        .map(|individual| individual.id.as_str())
        .collect();
    assert_eq!(roots, vec!["I1", "I2", "I4", "I5"]);
    assert!(parser.validate().is_clean());

    parser.parse("0 @F1@ FAM\n1 WIFE @I2@");
    assert_eq!(
        parser.validate().errors,
        vec!["Missing wife individual: I2".to_string()]
    );
}

#[test]
fn json_uses_tree_viewer_field_names() {
    let data = parse_genesis();
    let value = serde_json::to_value(&data).expect("tree data should serialize");

    let john = &value["I4"];
    assert_eq!(john["givenName"], "John");
    assert_eq!(john["surname"], "Smith");
    assert_eq!(john["birth_year"], "Unknown");
    assert!(john["spouse"].is_null());

    let adam = &value["I1"];
    assert_eq!(adam["birthPlace"], "Eden");
    assert_eq!(adam["events"][0]["type"], "birth");
    assert_eq!(adam["verses"][0]["reference"], "Genesis 2:7");
}
