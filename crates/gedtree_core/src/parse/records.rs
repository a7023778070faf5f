//! Record sub-parsers for `INDI`, `FAM`, `NOTE` and `SOUR`.
//!
//! # Invariants
//! - Each parser is called with the reader positioned just after the record
//!   header and returns with the reader on the next level-0 line (or at end).
//! - Unknown level-1 tags are skipped together with their subtree.
//! - Lines nested under tags that take no sub-structure are ignored.

use crate::model::family::{Family, Source};
use crate::model::individual::{Event, EventKind, Individual, Sex};
use crate::parse::line::{is_pointer, strip_pointer, LineRecord};
use crate::parse::reader::LineReader;

/// Parses the body of an `INDI` record.
pub fn parse_individual(reader: &mut LineReader<'_>, id: &str) -> Individual {
    let mut individual = Individual::new(id);

    while let Some(line) = reader.next_child(0) {
        if line.level != 1 {
            continue;
        }
        match line.tag.as_str() {
            "NAME" => parse_name(reader, &mut individual, line),
            "SEX" => individual.sex = Sex::parse(&line.value),
            "OCCU" => individual.occupation = line.value.clone(),
            "NOTE" => individual.notes.push(parse_note_reference(reader, line)),
            "FAMS" => individual.spouse_families.push(strip_pointer(&line.value)),
            "FAMC" => individual.child_families.push(strip_pointer(&line.value)),
            tag => match EventKind::from_tag(tag) {
                Some(kind) if is_individual_event(kind) => {
                    individual.events.push(parse_event(reader, kind, line.level));
                }
                _ => {
                    reader.skip_subtree(line.level);
                }
            },
        }
    }

    individual
}

/// Parses the body of a `FAM` record.
pub fn parse_family(reader: &mut LineReader<'_>, id: &str) -> Family {
    let mut family = Family::new(id);

    while let Some(line) = reader.next_child(0) {
        if line.level != 1 {
            continue;
        }
        match line.tag.as_str() {
            "HUSB" => family.husband = non_empty_pointer(&line.value),
            "WIFE" => family.wife = non_empty_pointer(&line.value),
            "CHIL" => {
                if let Some(child) = non_empty_pointer(&line.value) {
                    family.children.push(child);
                }
            }
            "MARR" => family
                .events
                .push(parse_event(reader, EventKind::Marriage, line.level)),
            "DIV" => family
                .events
                .push(parse_event(reader, EventKind::Divorce, line.level)),
            "NOTE" => family.notes.push(parse_note_reference(reader, line)),
            _ => {
                reader.skip_subtree(line.level);
            }
        }
    }

    family
}

/// Parses the body of a `NOTE` record whose header carried `header_text`.
pub fn parse_note(reader: &mut LineReader<'_>, header_text: &str) -> String {
    collect_continued_text(reader, header_text, 0)
}

/// Parses the body of a `SOUR` record.
pub fn parse_source(reader: &mut LineReader<'_>, id: &str) -> Source {
    let mut source = Source::new(id);

    while let Some(line) = reader.next_child(0) {
        if line.level != 1 {
            continue;
        }
        match line.tag.as_str() {
            "TITL" => source.title = line.value.clone(),
            "AUTH" => source.author = line.value.clone(),
            "PUBL" => source.publication = line.value.clone(),
            _ => {}
        }
    }

    source
}

/// Fills name fields from a `NAME` line and its `GIVN`/`SURN` children.
///
/// `Given /Surname/` splits on the slashes. Without a non-empty surname
/// between slashes the slashes are dropped and the text splits at the first
/// space. Explicit `GIVN`/`SURN` parts win over both.
pub fn parse_name(reader: &mut LineReader<'_>, individual: &mut Individual, line: &LineRecord) {
    let (given, surname) = split_name_value(&line.value);
    individual.given_name = given;
    individual.surname = surname;
    individual.name = format!("{} {}", individual.given_name, individual.surname)
        .trim()
        .to_string();

    while let Some(part) = reader.next_child(line.level) {
        if part.level != line.level + 1 {
            continue;
        }
        match part.tag.as_str() {
            "GIVN" => individual.given_name = part.value.clone(),
            "SURN" => individual.surname = part.value.clone(),
            _ => {}
        }
    }

    if !individual.given_name.is_empty() && !individual.surname.is_empty() {
        individual.name = format!("{} {}", individual.given_name, individual.surname);
    }
}

fn split_name_value(value: &str) -> (String, String) {
    if let Some((given, rest)) = value.split_once('/') {
        if let Some((surname, _)) = rest.split_once('/') {
            let surname = surname.trim();
            if !surname.is_empty() {
                return (given.trim().to_string(), surname.to_string());
            }
        }
    }

    let plain = value.replace('/', "");
    let plain = plain.trim();
    match plain.split_once(' ') {
        Some((given, surname)) => (given.to_string(), surname.trim().to_string()),
        None => (plain.to_string(), String::new()),
    }
}

/// Parses `DATE`/`PLAC` children of an event line at `level`.
pub fn parse_event(reader: &mut LineReader<'_>, kind: EventKind, level: u32) -> Event {
    let mut event = Event::new(kind);

    while let Some(line) = reader.next_child(level) {
        if line.level != level + 1 {
            continue;
        }
        match line.tag.as_str() {
            "DATE" => event.date = line.value.clone(),
            "PLAC" => event.place = line.value.clone(),
            _ => {}
        }
    }

    event
}

/// Returns a note record id for pointers, or the inline note text.
fn parse_note_reference(reader: &mut LineReader<'_>, line: &LineRecord) -> String {
    if is_pointer(&line.value) {
        reader.skip_subtree(line.level);
        return strip_pointer(&line.value);
    }
    collect_continued_text(reader, &line.value, line.level)
}

/// Joins `CONT` (new line) and `CONC` (no separator) children of `level`.
fn collect_continued_text(reader: &mut LineReader<'_>, initial: &str, level: u32) -> String {
    let mut text = initial.to_string();

    while let Some(line) = reader.next_child(level) {
        if line.level != level + 1 {
            continue;
        }
        match line.tag.as_str() {
            "CONT" => {
                text.push('\n');
                text.push_str(&line.value);
            }
            "CONC" => text.push_str(&line.value),
            _ => {}
        }
    }

    text.trim().to_string()
}

fn non_empty_pointer(value: &str) -> Option<String> {
    let id = strip_pointer(value);
    (!id.is_empty()).then_some(id)
}

fn is_individual_event(kind: EventKind) -> bool {
    !matches!(kind, EventKind::Marriage | EventKind::Divorce)
}

#[cfg(test)]
mod tests {
    use super::{parse_family, parse_individual, parse_note, parse_source, split_name_value};
    use crate::model::individual::{EventKind, Sex};
    use crate::parse::line::preprocess_lines;
    use crate::parse::reader::LineReader;

    fn body(text: &str) -> Vec<crate::parse::line::LineRecord> {
        preprocess_lines(text).lines
    }

    #[test]
    fn individual_reads_known_tags_and_stops_at_next_record() {
        let lines = body(
            "1 NAME Abram /Terah/\n\
             1 SEX M\n\
             1 OCCU Shepherd\n\
             1 BIRT\n\
             2 DATE 1948 AM\n\
             2 PLAC Ur of the Chaldees\n\
             1 FAMS @F2@\n\
             1 FAMC @F1@\n\
             0 @I2@ INDI",
        );
        let mut reader = LineReader::new(&lines);
        let individual = parse_individual(&mut reader, "I1");

        assert_eq!(individual.name, "Abram Terah");
        assert_eq!(individual.sex, Sex::M);
        assert_eq!(individual.occupation, "Shepherd");
        assert_eq!(individual.birth_date(), "1948 AM");
        assert_eq!(individual.birth_place(), "Ur of the Chaldees");
        assert_eq!(individual.spouse_families, vec!["F2".to_string()]);
        assert_eq!(individual.child_families, vec!["F1".to_string()]);
        assert_eq!(reader.peek().map(|line| line.tag.as_str()), Some("I2"));
    }

    #[test]
    fn unknown_tags_skip_their_subtree() {
        let lines = body(
            "1 _CUSTOM x\n\
             2 DATE 1000\n\
             2 NAME Not A Name\n\
             1 NAME Seth\n",
        );
        let mut reader = LineReader::new(&lines);
        let individual = parse_individual(&mut reader, "I3");

        assert_eq!(individual.name, "Seth");
        assert!(individual.events.is_empty());
        assert!(reader.at_end());
    }

    #[test]
    fn secondary_events_do_not_feed_birth_or_death() {
        let lines = body("1 BURI\n2 DATE 1998 BC\n2 PLAC Hebron\n1 DEAT\n2 DATE 2006 BC");
        let mut reader = LineReader::new(&lines);
        let individual = parse_individual(&mut reader, "I4");

        assert_eq!(individual.events.len(), 2);
        assert_eq!(individual.events[0].kind, EventKind::Burial);
        assert_eq!(individual.death_date(), "2006 BC");
        assert_eq!(individual.death_place(), "");
    }

    #[test]
    fn name_parts_override_and_rebuild_full_name() {
        let lines = body("1 NAME Jacob\n2 GIVN Israel\n2 SURN Ben Isaac\n1 SEX M");
        let mut reader = LineReader::new(&lines);
        let individual = parse_individual(&mut reader, "I5");

        assert_eq!(individual.given_name, "Israel");
        assert_eq!(individual.surname, "Ben Isaac");
        assert_eq!(individual.name, "Israel Ben Isaac");
        assert_eq!(individual.sex, Sex::M);
    }

    #[test]
    fn split_name_value_handles_slash_forms() {
        assert_eq!(
            split_name_value("John /Smith/"),
            ("John".to_string(), "Smith".to_string())
        );
        assert_eq!(split_name_value("Noah //"), ("Noah".to_string(), String::new()));
        assert_eq!(
            split_name_value("Mary Magdalene"),
            ("Mary".to_string(), "Magdalene".to_string())
        );
        assert_eq!(split_name_value("/Levi/"), (String::new(), "Levi".to_string()));
    }

    #[test]
    fn inline_and_pointer_notes_are_kept_in_order() {
        let lines = body(
            "1 NOTE @N1@\n\
             1 NOTE Builder of the a\n\
             2 CONC rk\n\
             2 CONT by faith",
        );
        let mut reader = LineReader::new(&lines);
        let individual = parse_individual(&mut reader, "I6");

        assert_eq!(
            individual.notes,
            vec!["N1".to_string(), "Builder of the ark\nby faith".to_string()]
        );
    }

    #[test]
    fn family_keeps_child_order_and_events() {
        let lines = body(
            "1 HUSB @I1@\n\
             1 WIFE @I2@\n\
             1 CHIL @I4@\n\
             1 CHIL @I3@\n\
             1 MARR\n\
             2 DATE 1400\n\
             2 PLAC Haran\n\
             1 DIV\n\
             2 DATE 1410\n\
             1 _UID abc\n\
             2 X y",
        );
        let mut reader = LineReader::new(&lines);
        let family = parse_family(&mut reader, "F1");

        assert_eq!(family.husband.as_deref(), Some("I1"));
        assert_eq!(family.wife.as_deref(), Some("I2"));
        assert_eq!(family.children, vec!["I4".to_string(), "I3".to_string()]);
        assert_eq!(family.marriage_date(), "1400");
        assert_eq!(family.marriage_place(), "Haran");
        assert_eq!(family.divorce_date(), "1410");
        assert!(reader.at_end());
    }

    #[test]
    fn note_record_joins_cont_and_conc() {
        let lines = body("1 CONC Noah found grace\n1 CONT in the ey\n1 CONC es of the LORD");
        let mut reader = LineReader::new(&lines);
        let text = parse_note(&mut reader, "");

        assert_eq!(text, "Noah found grace\nin the eyes of the LORD");
    }

    #[test]
    fn note_record_keeps_header_text_as_first_line() {
        let lines = body("1 CONT second line");
        let mut reader = LineReader::new(&lines);
        assert_eq!(parse_note(&mut reader, "first line"), "first line\nsecond line");
    }

    #[test]
    fn source_reads_title_author_publication() {
        let lines = body("1 TITL Holy Bible\n1 AUTH Various\n1 PUBL 1611\n1 REPO @R1@");
        let mut reader = LineReader::new(&lines);
        let source = parse_source(&mut reader, "S1");

        assert_eq!(source.id, "S1");
        assert_eq!(source.title, "Holy Bible");
        assert_eq!(source.author, "Various");
        assert_eq!(source.publication, "1611");
    }
}
