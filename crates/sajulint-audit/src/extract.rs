//! Record extraction from the two embedded table literal schemas.
//!
//! Each schema is an explicit grammar: a key token restricted to the
//! stem/branch alphabets, then a bounded-delimiter field pattern. Both
//! extractors are total: an entry that fails its schema falls under the
//! named fallback policy instead of erroring. Duplicate keys keep the last
//! occurrence in document order, matching sequential map construction in
//! the generators that produced the tables.

use regex::{Captures, Regex};
use sajulint_kernel::ganji::{BRANCHES, Ganji, STEMS};
use std::collections::BTreeMap;

/// Generation-side record embedded per key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptRecord {
    pub trait_text: String,
    pub description: String,
    pub spouse: String,
}

/// What to do with an entry that does not satisfy its schema.
///
/// Malformed entries deliberately degrade to "key absent" so that the
/// coverage checks, not the parser, report the gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FallbackPolicy {
    OmitOnMismatch,
}

/// One embedded table literal schema: key alternation followed by a
/// bounded field-list pattern.
struct TableSchema {
    field_pattern: &'static str,
    policy: FallbackPolicy,
}

/// Prompt table entries: `'<key>': {t:'…',d:'…',s:'…'}`.
const PROMPT_SCHEMA: TableSchema = TableSchema {
    field_pattern: r"\{t:'([^']*)',d:'([^']*)',s:'([^']*)'\}",
    policy: FallbackPolicy::OmitOnMismatch,
};

/// Display table entries: `'<key>': { …, name: '…', … }`. The non-greedy
/// gap is bounded by the record's closing delimiter, so a `name` field in
/// the following record is never captured.
const DISPLAY_SCHEMA: TableSchema = TableSchema {
    field_pattern: r"\{[^}]*?name\s*:\s*'([^']+)'",
    policy: FallbackPolicy::OmitOnMismatch,
};

impl TableSchema {
    fn compile(&self) -> Regex {
        let stems: String = STEMS.iter().collect();
        let branches: String = BRANCHES.iter().collect();
        let pattern = format!(
            r"'([{stems}][{branches}])'\s*:\s*{fields}",
            fields = self.field_pattern
        );
        Regex::new(&pattern).expect("table schema regex")
    }

    /// Scan the document and feed each well-formed entry to `insert`.
    /// Keys that pass the alphabet but are not cycle members (mismatched
    /// stem/branch parity) fall under the fallback policy.
    fn scan(&self, doc: &str, mut insert: impl FnMut(Ganji, &Captures<'_>)) {
        let re = self.compile();
        for caps in re.captures_iter(doc) {
            let Some(ganji) = Ganji::parse(&caps[1]) else {
                match self.policy {
                    FallbackPolicy::OmitOnMismatch => continue,
                }
            };
            insert(ganji, &caps);
        }
    }
}

/// Harvest the prompt table into typed records.
pub fn extract_prompt_records(doc: &str) -> BTreeMap<Ganji, PromptRecord> {
    let mut out = BTreeMap::new();
    PROMPT_SCHEMA.scan(doc, |ganji, caps| {
        out.insert(
            ganji,
            PromptRecord {
                trait_text: caps[2].to_string(),
                description: caps[3].to_string(),
                spouse: caps[4].to_string(),
            },
        );
    });
    out
}

/// Harvest the display table, tolerating unrelated fields between the key
/// and the name inside one record body.
pub fn extract_display_names(doc: &str) -> BTreeMap<Ganji, String> {
    let mut out = BTreeMap::new();
    DISPLAY_SCHEMA.scan(doc, |ganji, caps| {
        out.insert(ganji, caps[2].to_string());
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_records_capture_all_three_fields() {
        let doc = "const DB = { '甲子':{t:'기둥',d:'설명',s:'배우자'}, '乙丑':{t:'a',d:'b',s:'c'} };";
        let records = extract_prompt_records(doc);
        assert_eq!(records.len(), 2);
        let record = &records[&Ganji::parse("甲子").expect("cycle member")];
        assert_eq!(record.trait_text, "기둥");
        assert_eq!(record.description, "설명");
        assert_eq!(record.spouse, "배우자");
    }

    #[test]
    fn malformed_prompt_entries_are_omitted() {
        // missing s field, foreign key token, and a non-cycle pairing
        let doc = "'甲子':{t:'x',d:'y'} '모자':{t:'a',d:'b',s:'c'} '甲丑':{t:'a',d:'b',s:'c'}";
        assert!(extract_prompt_records(doc).is_empty());
    }

    #[test]
    fn duplicate_prompt_keys_keep_the_last_occurrence() {
        let doc = "'丙寅':{t:'old',d:'old',s:'old'} … '丙寅':{t:'new',d:'new',s:'new'}";
        let records = extract_prompt_records(doc);
        let record = &records[&Ganji::parse("丙寅").expect("cycle member")];
        assert_eq!(record.trait_text, "new");
    }

    #[test]
    fn display_names_tolerate_intervening_fields() {
        let doc = "'庚午':{hanja:'庚午',element:'metal',name:'백마',desc:'…'}";
        let names = extract_display_names(doc);
        assert_eq!(names[&Ganji::parse("庚午").expect("cycle member")], "백마");
    }

    #[test]
    fn display_match_stops_at_the_record_boundary() {
        // the name in the following record must not be attributed to 庚午
        let doc = "'庚午':{hanja:'庚午'} '辛未':{name:'양'}";
        let names = extract_display_names(doc);
        assert_eq!(names.len(), 1);
        assert_eq!(names[&Ganji::parse("辛未").expect("cycle member")], "양");
    }

    #[test]
    fn extraction_is_total_on_arbitrary_text() {
        assert!(extract_prompt_records("").is_empty());
        assert!(extract_display_names("no tables here { name: 'x' }").is_empty());
    }
}
