//! Family-tree analytics over resolved person data.
//!
//! # Responsibility
//! - Summarise demographics, generations, family structure and lifespans.
//! - Produce a birth-ordered timeline.
//!
//! # Invariants
//! - Every person is assigned to at most one generation (first visit wins,
//!   walking from roots in id order).
//! - Averages are rounded to one decimal; empty inputs average to `0.0`.

use crate::classify::{guess_gender, Gender};
use crate::model::person::{FamilyTreeData, ResolvedPerson};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid number regex"));

const COMMON_NAME_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyAnalytics {
    pub total_persons: usize,
    pub gender: GenderDistribution,
    /// Generation index (roots are `0`) to its statistics.
    pub generations: BTreeMap<usize, GenerationStats>,
    pub family_structure: FamilyStructure,
    pub lifespans: LifespanSummary,
    pub relationships: RelationshipMetrics,
    pub names: NameAnalysis,
    pub timeline: Vec<TimelineEntry>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenderDistribution {
    pub male: usize,
    pub female: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub count: usize,
    pub persons: Vec<String>,
    pub total_lifespan: u64,
    pub lifespan_count: usize,
    pub total_children: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FamilyStructure {
    pub married_couples: usize,
    pub single_parents: usize,
    pub childless_couples: usize,
    pub largest_family: usize,
    pub family_sizes: Vec<usize>,
    pub average_children: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedLifespan {
    pub name: String,
    pub years: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LifespanSummary {
    pub lifespans: Vec<NamedLifespan>,
    pub average_lifespan: f64,
    pub longest_lived: Option<NamedLifespan>,
    pub shortest_lived: Option<NamedLifespan>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RelationshipMetrics {
    pub parent_child: usize,
    /// Couples, counted once per pair.
    pub spouses: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NameAnalysis {
    /// Lower-cased name parts longer than two characters.
    pub name_components: BTreeMap<String, usize>,
    pub common_names: Vec<NameCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub name: String,
    pub birth_year: u64,
    pub death_year: Option<u64>,
    pub lifespan: Option<i64>,
}

/// Computes every analytics section for `data`.
pub fn analyze(data: &FamilyTreeData) -> FamilyAnalytics {
    FamilyAnalytics {
        total_persons: data.len(),
        gender: gender_distribution(data),
        generations: generation_data(data),
        family_structure: family_structure(data),
        lifespans: lifespan_summary(data),
        relationships: relationship_metrics(data),
        names: name_analysis(data),
        timeline: timeline(data),
    }
}

pub fn gender_distribution(data: &FamilyTreeData) -> GenderDistribution {
    let mut distribution = GenderDistribution::default();
    for person in data.values() {
        match guess_gender(person) {
            Gender::Male => distribution.male += 1,
            Gender::Female => distribution.female += 1,
        }
    }
    distribution
}

/// Assigns generations depth-first from every root along child links.
pub fn generation_data(data: &FamilyTreeData) -> BTreeMap<usize, GenerationStats> {
    let mut generations: BTreeMap<usize, GenerationStats> = BTreeMap::new();
    let mut visited: HashSet<&str> = HashSet::new();

    for (root_id, root) in data {
        if !root.parents.is_empty() {
            continue;
        }

        let mut stack: Vec<(&str, usize)> = vec![(root_id.as_str(), 0)];
        while let Some((person_id, generation)) = stack.pop() {
            if !visited.insert(person_id) {
                continue;
            }
            let Some(person) = data.get(person_id) else {
                continue;
            };

            let stats = generations.entry(generation).or_default();
            stats.count += 1;
            stats.persons.push(person_id.to_string());
            stats.total_children += person.children.len();
            let years = lifespan(person);
            if years > 0 {
                stats.total_lifespan = stats.total_lifespan.saturating_add(years);
                stats.lifespan_count += 1;
            }

            for child_id in person.children.iter().rev() {
                stack.push((child_id.as_str(), generation + 1));
            }
        }
    }

    generations
}

pub fn family_structure(data: &FamilyTreeData) -> FamilyStructure {
    let mut structure = FamilyStructure::default();
    let mut married_parents = 0;
    let mut childless_spouses = 0;

    for person in data.values() {
        let children = person.children.len();
        if children > 0 {
            structure.family_sizes.push(children);
            structure.largest_family = structure.largest_family.max(children);
            if person.spouse.is_some() {
                married_parents += 1;
            } else {
                structure.single_parents += 1;
            }
        } else if person.spouse.is_some() {
            childless_spouses += 1;
        }
    }

    structure.married_couples = married_parents / 2;
    structure.childless_couples = childless_spouses / 2;
    let total: usize = structure.family_sizes.iter().sum();
    structure.average_children = average(total as f64, structure.family_sizes.len());
    structure
}

pub fn lifespan_summary(data: &FamilyTreeData) -> LifespanSummary {
    let mut summary = LifespanSummary::default();
    let mut total = 0u64;

    for person in data.values() {
        let years = lifespan(person);
        if years == 0 {
            continue;
        }
        let entry = NamedLifespan {
            name: person.name.clone(),
            years,
        };
        total = total.saturating_add(years);

        if summary
            .longest_lived
            .as_ref()
            .map_or(true, |longest| years > longest.years)
        {
            summary.longest_lived = Some(entry.clone());
        }
        if summary
            .shortest_lived
            .as_ref()
            .map_or(true, |shortest| years < shortest.years)
        {
            summary.shortest_lived = Some(entry.clone());
        }
        summary.lifespans.push(entry);
    }

    summary.average_lifespan = average(total as f64, summary.lifespans.len());
    summary
}

pub fn relationship_metrics(data: &FamilyTreeData) -> RelationshipMetrics {
    let parent_child = data.values().map(|person| person.children.len()).sum();
    let married = data
        .values()
        .filter(|person| person.spouse.is_some())
        .count();
    RelationshipMetrics {
        parent_child,
        spouses: married / 2,
    }
}

pub fn name_analysis(data: &FamilyTreeData) -> NameAnalysis {
    let mut frequency: BTreeMap<String, usize> = BTreeMap::new();
    let mut analysis = NameAnalysis::default();

    for person in data.values() {
        let name = person.name.to_lowercase();
        for part in name.split(' ').filter(|part| part.chars().count() > 2) {
            *analysis.name_components.entry(part.to_string()).or_default() += 1;
        }
        *frequency.entry(name).or_default() += 1;
    }

    let mut ranked: Vec<(String, usize)> = frequency.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    analysis.common_names = ranked
        .into_iter()
        .take(COMMON_NAME_LIMIT)
        .map(|(name, count)| NameCount { name, count })
        .collect();
    analysis
}

/// Persons with a known birth year, latest birth first.
pub fn timeline(data: &FamilyTreeData) -> Vec<TimelineEntry> {
    let mut entries: Vec<TimelineEntry> = data
        .values()
        .filter_map(|person| {
            let birth_year = leading_number(&person.birth_year)?;
            let death_year = leading_number(&person.death_year);
            Some(TimelineEntry {
                name: person.name.clone(),
                birth_year,
                death_year,
                lifespan: death_year.and_then(|death| signed_difference(death, birth_year)),
            })
        })
        .collect();
    entries.sort_by(|a, b| b.birth_year.cmp(&a.birth_year));
    entries
}

/// Lifespan from birth/death years, falling back to `age_at_death`; `0` if unknown.
pub fn lifespan(person: &ResolvedPerson) -> u64 {
    if let (Some(birth), Some(death)) = (
        leading_number(&person.birth_year),
        leading_number(&person.death_year),
    ) {
        if death > birth {
            return death - birth;
        }
    }
    leading_number(&person.age_at_death).unwrap_or(0)
}

fn leading_number(value: &str) -> Option<u64> {
    let number: u64 = NUMBER_RE.find(value)?.as_str().parse().ok()?;
    (number > 0).then_some(number)
}

fn signed_difference(to: u64, from: u64) -> Option<i64> {
    i64::try_from(to).ok()?.checked_sub(i64::try_from(from).ok()?)
}

fn average(total: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (total / count as f64 * 10.0).round() / 10.0
}
