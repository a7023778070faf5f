//! Heuristic biblical-name filter.
//!
//! A name is rejected when it carries a common modern surname; otherwise it is
//! accepted when it overlaps an entry of the biblical first-name list or its
//! first word ends in a Hebrew-style suffix. The suffix rule has no
//! authoritative source and both false positives and false negatives occur.

use crate::classify::PersonFilter;
use crate::model::individual::Individual;
use once_cell::sync::Lazy;
use regex::Regex;

static MODERN_SURNAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:smith|johnson|williams|brown|jones|miller|davis|garcia|rodriguez|wilson|martinez|anderson|taylor|hernandez|moore|martin|jackson|thompson|white|lopez|gonzalez|harris|clark|lewis|robinson|walker|perez|young|allen|wright|scott|green|baker|nelson|carter|mitchell|roberts|turner|phillips|campbell|parker|evans|edwards|collins|stewart|morris|murphy|cook|rogers)\b",
    )
    .expect("valid modern surname regex")
});

static HEBREW_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:iah|jah|iel|ael|uel|ezer|azar|ai|ath|ith|oth|im|ah)$")
        .expect("valid hebrew suffix regex")
});

const BIBLICAL_NAMES: &[&str] = &[
    "aaron", "abednego", "abel", "abigail", "abimelech", "abner", "abraham", "abram", "absalom",
    "adah", "adam", "ahab", "amos", "andrew", "anna", "arphaxad", "asa", "asher", "barnabas",
    "bartholomew", "bathsheba", "benjamin", "bethuel", "bilhah", "boaz", "cain", "caleb",
    "cainan", "cush", "dan", "daniel", "david", "deborah", "delilah", "dinah", "eber", "eli",
    "eliezer", "elijah", "elisha", "elizabeth", "enoch", "enos", "ephraim", "esau", "esther",
    "eve", "ezekiel", "ezra", "gad", "gideon", "gomer", "hagar", "ham", "hannah", "heber",
    "hezekiah", "hosea", "isaac", "isaiah", "ishmael", "israel", "issachar", "jacob", "japheth",
    "jared", "jephthah", "jeremiah", "jesse", "jesus", "jethro", "jezebel", "joab", "job",
    "jochebed", "joel", "john", "jonah", "jonathan", "joseph", "joshua", "josiah", "jubal",
    "judah", "judas", "keturah", "kohath", "laban", "lamech", "leah", "levi", "lot", "luke",
    "mahalalel", "manasseh", "mark", "martha", "mary", "matthew", "melchizedek", "merari",
    "methuselah", "micah", "milcah", "miriam", "moses", "nahor", "naomi", "naphtali", "nathan",
    "nehemiah", "noah", "obed", "paul", "peleg", "peter", "pharaoh", "rachel", "rebekah",
    "reu", "reuben", "ruth", "salah", "samson", "samuel", "sarah", "sarai", "saul", "serug",
    "seth", "shem", "simeon", "solomon", "tamar", "terah", "thomas", "timothy", "tubal",
    "uriah", "zebulun", "zechariah", "zillah", "zilpah", "zipporah",
];

/// Returns whether `name` looks like a biblical name.
pub fn is_biblical_name(name: &str) -> bool {
    let lower = name.trim().to_lowercase();
    if lower.is_empty() {
        return false;
    }
    if MODERN_SURNAME_RE.is_match(&lower) {
        return false;
    }

    let listed = BIBLICAL_NAMES.iter().any(|biblical| {
        lower.contains(biblical) || (lower.chars().count() >= 3 && biblical.contains(&lower))
    });
    if listed {
        return true;
    }

    lower
        .split_whitespace()
        .next()
        .is_some_and(|first| HEBREW_SUFFIX_RE.is_match(first))
}

/// Emits only individuals whose name passes [`is_biblical_name`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BiblicalNameFilter;

impl PersonFilter for BiblicalNameFilter {
    fn id(&self) -> &'static str {
        "biblical_name"
    }

    fn accepts(&self, individual: &Individual) -> bool {
        is_biblical_name(&individual.name)
    }
}

#[cfg(test)]
mod tests {
    use super::{is_biblical_name, BiblicalNameFilter};
    use crate::classify::PersonFilter;
    use crate::model::individual::Individual;

    #[test]
    fn accepts_listed_names_and_name_fragments() {
        assert!(is_biblical_name("Noah"));
        assert!(is_biblical_name("Abraham ben Terah"));
        assert!(is_biblical_name("Meth"));
    }

    #[test]
    fn modern_surnames_are_rejected_even_with_biblical_given_name() {
        assert!(!is_biblical_name("John Smith"));
        assert!(!is_biblical_name("Sarah Johnson"));
    }

    #[test]
    fn hebrew_suffix_accepts_unlisted_names() {
        assert!(is_biblical_name("Adonijah"));
        assert!(is_biblical_name("Obadiah Zelophehad"));
    }

    #[test]
    fn rejects_blank_and_clearly_modern_names() {
        assert!(!is_biblical_name("   "));
        assert!(!is_biblical_name("Kevin"));
        assert!(!is_biblical_name("Tyler"));
    }

    #[test]
    fn filter_uses_individual_name() {
        let mut noah = Individual::new("I1");
        noah.name = "Noah".to_string();
        let unnamed = Individual::new("I2");

        assert!(BiblicalNameFilter.accepts(&noah));
        assert!(!BiblicalNameFilter.accepts(&unnamed));
    }
}
