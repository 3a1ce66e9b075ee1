//! Exact and fuzzy deduplication of generated question/answer pairs.

use std::collections::HashSet;

use crate::models::QaRecord;
use crate::similarity::token_set_ratio;

/// True when two questions meet the fuzzy similarity threshold (0–100),
/// compared case-insensitively.
pub fn is_fuzzy_duplicate(q1: &str, q2: &str, threshold: u32) -> bool {
    token_set_ratio(&q1.to_lowercase(), &q2.to_lowercase()) >= threshold as f64
}

/// Removes duplicate pairs, keeping the first occurrence and input order.
///
/// A record is dropped when its (lowercased trimmed question, lowercased
/// trimmed answer) key was already seen, or when its question is fuzzy-similar
/// (>= `threshold`) to any question already accepted into the output. The
/// exact key is registered before the fuzzy check, so a later identical pair
/// is dropped as an exact duplicate even if its first occurrence lost the
/// fuzzy comparison. Every candidate is compared only against accepted
/// records, never pairwise across the whole input.
pub fn deduplicate(records: &[QaRecord], threshold: u32) -> Vec<QaRecord> {
    let mut seen_exact: HashSet<(String, String)> = HashSet::new();
    let mut kept: Vec<QaRecord> = Vec::new();

    for record in records {
        let question = record.question.trim();
        let answer = record.answer.trim();

        let key = (question.to_lowercase(), answer.to_lowercase());
        if seen_exact.contains(&key) {
            continue;
        }
        seen_exact.insert(key);

        let fuzzy = kept
            .iter()
            .any(|other| is_fuzzy_duplicate(question, &other.question, threshold));
        if !fuzzy {
            kept.push(record.clone());
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, question: &str, answer: &str) -> QaRecord {
        QaRecord {
            chunk_index: index,
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }

    #[test]
    fn exact_duplicates_keep_first_occurrence() {
        let records = vec![
            record(0, "What is CCS?", "A connector standard."),
            record(1, "what is ccs?", "a connector standard."),
        ];
        let kept = deduplicate(&records, 90);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].chunk_index, 0);
        assert_eq!(kept[0].question, "What is CCS?");
    }

    #[test]
    fn fuzzy_duplicate_question_is_dropped() {
        let records = vec![
            record(0, "What voltage does a Level 2 charger use?", "240 volts."),
            record(1, "What voltage do Level 2 chargers use?", "They use 240 volts."),
        ];
        let kept = deduplicate(&records, 90);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].question, "What voltage does a Level 2 charger use?");
    }

    #[test]
    fn distinct_records_survive_in_input_order() {
        let records = vec![
            record(0, "What is CHAdeMO?", "A fast-charging standard."),
            record(1, "How long does charging take?", "Depends on the charger."),
            record(2, "Where are most stations located?", "Urban areas."),
        ];
        let kept = deduplicate(&records, 90);
        assert_eq!(kept, records);
    }

    #[test]
    fn deduplicate_is_idempotent() {
        let records = vec![
            record(0, "What voltage does a Level 2 charger use?", "240 volts."),
            record(1, "What voltage do Level 2 chargers use?", "They use 240 volts."),
            record(2, "What voltage does a Level 2 charger use?", "240 volts."),
            record(3, "How fast is DC charging?", "Up to 350 kW."),
        ];
        let once = deduplicate(&records, 90);
        let twice = deduplicate(&once, 90);
        assert_eq!(once, twice);
    }

    #[test]
    fn exact_key_registers_even_when_fuzzy_drops_the_record() {
        // The second record loses the fuzzy check, but its exact key is still
        // remembered, so the third (its exact twin) is dropped too.
        let records = vec![
            record(0, "What voltage does a Level 2 charger use?", "240 volts."),
            record(1, "What voltage do Level 2 chargers use?", "Also 240 volts."),
            record(2, "What voltage do Level 2 chargers use?", "Also 240 volts."),
        ];
        let kept = deduplicate(&records, 90);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn same_question_different_answer_still_fuzzy_dropped() {
        let records = vec![
            record(0, "What is the typical charging cost?", "About $0.30/kWh."),
            record(1, "What is the typical charging cost?", "Roughly thirty cents."),
        ];
        let kept = deduplicate(&records, 90);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].answer, "About $0.30/kWh.");
    }

    #[test]
    fn empty_fields_are_tolerated() {
        let records = vec![record(0, "", ""), record(1, "", "")];
        let kept = deduplicate(&records, 90);
        assert_eq!(kept.len(), 1);
    }
}
