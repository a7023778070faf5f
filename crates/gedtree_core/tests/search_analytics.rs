use gedtree_core::{
    analyze, hits_to_csv, FamilyTreeData, Gender, GedcomParser, SearchError, SearchField,
    SearchIndex, SearchQuery,
};

const GENESIS: &str = include_str!("fixtures/genesis.ged");

fn genesis() -> FamilyTreeData {
    GedcomParser::new().parse(GENESIS)
}

#[test]
fn exact_name_outranks_verse_mentions() {
    let data = genesis();
    let index = SearchIndex::build(&data);
    assert_eq!(index.len(), 5);

    let hits = index.search(&SearchQuery::new("Adam")).unwrap();
    let ranked: Vec<(&str, u32)> = hits
        .iter()
        .map(|hit| (hit.person_id.as_str(), hit.score))
        .collect();
    // Adam: exact name (10) + verse text (1); Eve: verse text only.
    assert_eq!(ranked, vec![("I1", 11), ("I2", 1)]);
    assert_eq!(hits[0].name, "Adam");
}

#[test]
fn field_gender_and_limit_options_narrow_results() {
    let index = SearchIndex::build(&genesis());

    let mut by_name = SearchQuery::new("adam");
    by_name.fields = vec![SearchField::Name];
    let hits = index.search(&by_name).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].score, 10);

    let mut women = SearchQuery::new("adam");
    women.gender = Some(Gender::Female);
    let hits = index.search(&women).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].person_id, "I2");

    let mut partial = SearchQuery::new("o");
    partial.fields = vec![SearchField::Name];
    partial.limit = 2;
    let hits = index.search(&partial).unwrap();
    // John Smith, Noah: name substring, ordered by id.
    let ids: Vec<&str> = hits.iter().map(|hit| hit.person_id.as_str()).collect();
    assert_eq!(ids, vec!["I4", "I5"]);
}

#[test]
fn blank_queries_and_empty_fields() {
    let index = SearchIndex::build(&genesis());
    assert!(index.search(&SearchQuery::new("   ")).unwrap().is_empty());

    let mut none = SearchQuery::new("adam");
    none.fields.clear();
    assert_eq!(index.search(&none).unwrap_err(), SearchError::NoFields);
}

#[test]
fn csv_export_quotes_every_field() {
    let data = genesis();
    let hits = SearchIndex::build(&data)
        .search(&SearchQuery::new("noah"))
        .unwrap();
    let csv = hits_to_csv(&hits, &data).expect("csv should render");

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "\"Name\",\"Title\",\"Description\",\"Birth Year\",\"Death Year\""
    );
    assert_eq!(
        lines[1],
        "\"Noah\",\"Biblical Figure\",\"Biblical figure.\",\"2948 BC\",\"1998 BC\""
    );
}

#[test]
fn analytics_summarise_the_tree() {
    let analytics = analyze(&genesis());

    assert_eq!(analytics.total_persons, 5);
    assert_eq!(analytics.gender.male, 4);
    assert_eq!(analytics.gender.female, 1);

    assert_eq!(analytics.generations[&0].count, 4);
    assert_eq!(analytics.generations[&1].persons, vec!["I3".to_string()]);

    assert_eq!(analytics.family_structure.married_couples, 1);
    assert_eq!(analytics.family_structure.largest_family, 1);
    assert_eq!(analytics.relationships.parent_child, 2);
    assert_eq!(analytics.relationships.spouses, 1);

    let longest = analytics
        .lifespans
        .longest_lived
        .expect("noah has a lifespan");
    assert_eq!(longest.name, "Noah");
    assert_eq!(longest.years, 950);

    let births: Vec<u64> = analytics
        .timeline
        .iter()
        .map(|entry| entry.birth_year)
        .collect();
    assert_eq!(births, vec![4004, 2948]);
}
