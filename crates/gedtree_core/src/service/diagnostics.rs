//! Parse diagnostics: counts, root detection and reference validation.

use crate::model::document::GedcomDocument;
use crate::model::individual::{Individual, Sex};
use serde::Serialize;

/// Record counts for one parsed document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub individuals: usize,
    pub families: usize,
    pub males: usize,
    pub females: usize,
    pub unknown: usize,
}

/// Dangling references (errors) and incomplete records (warnings).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

pub fn statistics(document: &GedcomDocument) -> Statistics {
    let mut stats = Statistics {
        individuals: document.individuals.len(),
        families: document.families.len(),
        ..Statistics::default()
    };

    for individual in document.individuals.values() {
        match individual.sex {
            Sex::M => stats.males += 1,
            Sex::F => stats.females += 1,
            Sex::U => stats.unknown += 1,
        }
    }

    stats
}

/// Individuals with no derived parents, in id order.
pub fn find_roots(document: &GedcomDocument) -> Vec<&Individual> {
    document
        .individuals
        .values()
        .filter(|individual| individual.is_root())
        .collect()
}

/// Reports family references to missing individuals and unnamed individuals.
pub fn validate(document: &GedcomDocument) -> ValidationReport {
    let mut report = ValidationReport::default();

    for family in &document.families {
        if let Some(husband) = &family.husband {
            if !document.individuals.contains_key(husband) {
                report
                    .errors
                    .push(format!("Missing husband individual: {husband}"));
            }
        }
        if let Some(wife) = &family.wife {
            if !document.individuals.contains_key(wife) {
                report.errors.push(format!("Missing wife individual: {wife}"));
            }
        }
        for child in &family.children {
            if !document.individuals.contains_key(child) {
                report.errors.push(format!("Missing child individual: {child}"));
            }
        }
    }

    for (id, individual) in &document.individuals {
        if individual.name.is_empty() {
            report.warnings.push(format!("Individual {id} has no name"));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::{find_roots, statistics, validate};
    use crate::model::document::GedcomDocument;
    use crate::model::family::Family;
    use crate::model::individual::{Individual, Sex};

    fn document() -> GedcomDocument {
        let mut document = GedcomDocument::new();
        let mut adam = Individual::new("I1");
        adam.name = "Adam".to_string();
        adam.sex = Sex::M;
        let mut eve = Individual::new("I2");
        eve.name = "Eve".to_string();
        eve.sex = Sex::F;
        let mut seth = Individual::new("I3");
        seth.parents = Some(vec!["I1".to_string(), "I2".to_string()]);
        document.insert_individual(adam);
        document.insert_individual(eve);
        document.insert_individual(seth);

        let mut family = Family::new("F1");
        family.husband = Some("I1".to_string());
        family.wife = Some("I9".to_string());
        family.children = vec!["I3".to_string(), "I8".to_string()];
        document.insert_family(family);
        document
    }

    #[test]
    fn statistics_count_sexes() {
        let stats = statistics(&document());
        assert_eq!(stats.individuals, 3);
        assert_eq!(stats.families, 1);
        assert_eq!(stats.males, 1);
        assert_eq!(stats.females, 1);
        assert_eq!(stats.unknown, 1);
    }

    #[test]
    fn roots_are_individuals_without_parents() {
        let document = document();
        let roots: Vec<&str> = find_roots(&document)
            .into_iter()
            .map(|individual| individual.id.as_str())
            .collect();
        assert_eq!(roots, vec!["I1", "I2"]);
    }

    #[test]
    fn validate_reports_dangling_ids_and_unnamed_individuals() {
        let report = validate(&document());
        assert_eq!(
            report.errors,
            vec![
                "Missing wife individual: I9".to_string(),
                "Missing child individual: I8".to_string()
            ]
        );
        assert_eq!(report.warnings, vec!["Individual I3 has no name".to_string()]);
        assert!(!report.is_clean());
    }
}
