use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::quiz::{Answer, Question};

struct ConceptItem {
    question: &'static str,
    correct: &'static str,
    wrong: [&'static str; 3],
}

const CONCEPT_BANK: [ConceptItem; 3] = [
    ConceptItem {
        question: "When a metal is added to a solution of another metal's nitrate, a displacement reaction occurs if and only if:",
        correct: "The added metal is more reactive than the metal ion in solution.",
        wrong: [
            "The added metal is less reactive than the metal ion in solution.",
            "Both metals have the same reactivity.",
            "The nitrate ion acts as a reducing agent.",
        ],
    },
    ConceptItem {
        question: "If metal X displaces metal Y from its nitrate solution, which statement is true?",
        correct: "Metal X is more reactive than metal Y.",
        wrong: [
            "Metal X is less reactive than metal Y.",
            "Metal X and metal Y have the same reactivity.",
            "Metal Y is a stronger reducing agent than metal X.",
        ],
    },
    ConceptItem {
        question: "Which statement best describes a displacement reaction between metals in nitrate solutions?",
        correct: "A more reactive metal will replace a less reactive metal ion in solution.",
        wrong: [
            "A less reactive metal will replace a more reactive metal ion in solution.",
            "Both metals stay in solution and only the nitrate ions swap places.",
            "The reaction happens for any pair of metals, whatever their reactivity.",
        ],
    },
];

/// Picks one conceptual question from the bank and shuffles its options.
/// Called once per attempt; question and shuffle are stored with the session
/// so re-prompting shows the exact same thing.
pub fn pick_concept_question() -> Question {
    // Safe to unwrap: the bank is a non-empty const
    let item = CONCEPT_BANK.choose(&mut thread_rng()).unwrap();

    let answers = {
        let mut shuffled_answers = vec![Answer::new(item.correct.to_string(), true)];
        shuffled_answers.extend(
            item.wrong
                .iter()
                .map(|wrong| Answer::new(wrong.to_string(), false)),
        );
        shuffled_answers.shuffle(&mut thread_rng());
        // returns
        shuffled_answers
    };

    Question::new(item.question.to_string(), answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_bank_item_has_distinct_options() {
        for item in CONCEPT_BANK.iter() {
            let mut options = item.wrong.to_vec();
            options.push(item.correct);
            let before = options.len();
            options.sort_unstable();
            options.dedup();
            assert_eq!(options.len(), before);
        }
    }

    #[test]
    fn picked_question_comes_from_the_bank_with_one_correct_option() {
        for _ in 0..20 {
            let question = pick_concept_question();
            assert!(CONCEPT_BANK.iter().any(|item| item.question == question.text));
            assert_eq!(question.answers.len(), 4);
            assert_eq!(
                question.answers.iter().filter(|a| a.is_correct).count(),
                1
            );

            let item = CONCEPT_BANK
                .iter()
                .find(|item| item.question == question.text)
                .expect("question text matches a bank item");
            let correct = question.correct_answer().expect("one correct option");
            assert_eq!(correct.text, item.correct);
        }
    }
}
