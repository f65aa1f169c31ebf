use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::quiz::reactivity::{ReactivityRanks, METALS};
use crate::quiz::{Answer, Question};

const EQUATION_PROMPT: &str =
    "Which equation shows a displacement reaction that actually takes place?";

/// The reaction written as if `added`, dropped into a nitrate solution of
/// `in_solution`, displaced it. Whether that actually happens is up to the
/// hidden ranks.
pub fn displacement_equation(added: &str, in_solution: &str) -> String {
    format!("{added}(s) + {in_solution}NO₃(aq) → {added}NO₃(aq) + {in_solution}(s)")
}

// State symbols swapped on the product side, so the equation is wrong no
// matter what the ranks are
fn malformed_equation(added: &str, in_solution: &str) -> String {
    format!("{added}(s) + {in_solution}NO₃(aq) → {added}NO₃(s) + {in_solution}(aq)")
}

/// Builds the equation-identification question for one attempt: a real
/// displacement, the same pair written backwards, a pair that doesn't react
/// at all, and a malformed equation. Options come back shuffled and are
/// stored with the session.
pub fn generate_question(ranks: &ReactivityRanks) -> Question {
    let mut displacing = Vec::new();
    let mut non_displacing = Vec::new();
    for added in METALS.iter() {
        for in_solution in METALS.iter() {
            if added == in_solution {
                continue;
            }
            if ranks.displaces(added, in_solution) {
                displacing.push((*added, *in_solution));
            } else {
                non_displacing.push((*added, *in_solution));
            }
        }
    }

    // Safe to unwrap: with at least two metals some pair always displaces
    let (added, in_solution) = *displacing.choose(&mut thread_rng()).unwrap();
    let correct = displacement_equation(added, in_solution);

    // Same pair written backwards: the less reactive metal can't push out
    // the more reactive one
    let reversed = displacement_equation(in_solution, added);

    // A different non-reacting pair, written as if it reacted. The reversed
    // pair is excluded so the two distractors never collide.
    let spare: Vec<(&str, &str)> = non_displacing
        .iter()
        .copied()
        .filter(|&(a, s)| !(a == in_solution && s == added))
        .collect();
    let invalid_pair = match spare.choose(&mut thread_rng()) {
        Some(&(a, s)) => displacement_equation(a, s),
        // Fewer than three metals leave no spare non-reacting pair
        None => malformed_equation(in_solution, added),
    };

    let malformed = malformed_equation(added, in_solution);

    let answers = {
        let mut shuffled_answers = vec![
            Answer::new(correct, true),
            Answer::new(reversed, false),
            Answer::new(invalid_pair, false),
            Answer::new(malformed, false),
        ];
        shuffled_answers.shuffle(&mut thread_rng());
        // returns
        shuffled_answers
    };

    Question::new(EQUATION_PROMPT.to_string(), answers)
}
