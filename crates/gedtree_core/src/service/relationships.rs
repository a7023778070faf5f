//! Relationship builder.
//!
//! # Invariants
//! - Families are processed in document order; the last family naming a
//!   spouse decides that individual's `spouse` name.
//! - Parent and child lists never hold duplicates.
//! - Ids missing from the individuals map are skipped.

use crate::model::document::GedcomDocument;
use log::debug;

/// Derives `parents`, `children`, `spouse` and `spouse_ids` from families.
pub fn build_relationships(document: &mut GedcomDocument) {
    let GedcomDocument {
        individuals,
        families,
        ..
    } = document;
    let mut links = 0usize;

    for family in families.iter() {
        let husband_id = family
            .husband
            .as_deref()
            .filter(|id| individuals.contains_key(*id));
        let wife_id = family
            .wife
            .as_deref()
            .filter(|id| individuals.contains_key(*id));

        if let (Some(husband_id), Some(wife_id)) = (husband_id, wife_id) {
            let husband_name = individuals[husband_id].name.clone();
            let wife_name = individuals[wife_id].name.clone();
            if let Some(husband) = individuals.get_mut(husband_id) {
                husband.spouse = Some(wife_name);
                push_unique(&mut husband.spouse_ids, wife_id);
            }
            if let Some(wife) = individuals.get_mut(wife_id) {
                wife.spouse = Some(husband_name);
                push_unique(&mut wife.spouse_ids, husband_id);
            }
        }

        let parent_ids: Vec<&str> = husband_id.into_iter().chain(wife_id).collect();
        for child_id in &family.children {
            let Some(child) = individuals.get_mut(child_id) else {
                continue;
            };
            child.children.get_or_insert_with(Vec::new);
            let parents = child.parents.get_or_insert_with(Vec::new);
            for parent_id in &parent_ids {
                push_unique(parents, parent_id);
            }

            for parent_id in &parent_ids {
                if let Some(parent) = individuals.get_mut(*parent_id) {
                    if push_unique(parent.children.get_or_insert_with(Vec::new), child_id) {
                        links += 1;
                    }
                }
            }
        }
    }

    debug!(
        "event=relationships_built module=service families={} parent_child_links={}",
        families.len(),
        links
    );
}

fn push_unique(list: &mut Vec<String>, id: &str) -> bool {
    if list.iter().any(|existing| existing == id) {
        return false;
    }
    list.push(id.to_string());
    true
}
