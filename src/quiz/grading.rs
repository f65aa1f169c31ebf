use crate::quiz::reactivity::METALS;
use crate::quiz::{Question, QuizSession};

/// Raw answers collected from the user over one attempt.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Submission {
    pub ranking: Vec<String>,
    pub extremal: String,
    pub concept: String,
    pub equation: String,
}

/// Outcome of grading one attempt: a feedback line per question plus the
/// total score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizReport {
    pub lines: Vec<String>,
    pub score: usize,
    pub total: usize,
}

impl QuizReport {
    pub fn summary(&self) -> String {
        format!("You got {} out of {} right.", self.score, self.total)
    }
}

/// A ranking can only be graded when it names each metal exactly once.
pub fn is_valid_ranking(ranking: &[String]) -> bool {
    ranking.len() == METALS.len()
        && METALS.iter().all(|metal| {
            ranking.iter().filter(|pick| pick.as_str() == *metal).count() == 1
        })
}

/// Grades one attempt against the session it was generated from. Pure: the
/// same session and submission always come back with the same report.
pub fn grade(session: &QuizSession, submission: &Submission) -> QuizReport {
    let mut lines = Vec::new();
    let mut score = 0;

    // 1. Ranking: all-or-nothing. A submission that doesn't name every metal
    // exactly once isn't wrong, it just isn't scored.
    let expected_ranking = session.ranks.ranking();
    if !is_valid_ranking(&submission.ranking) {
        lines.push(
            "1. Ranking: you must pick every metal exactly once, so this one wasn't scored."
                .to_string(),
        );
    } else if submission.ranking == expected_ranking {
        score += 1;
        lines.push("1. Ranking: correct!".to_string());
    } else {
        lines.push(format!(
            "1. Ranking: wrong — the order was {}.",
            expected_ranking.join(" > ")
        ));
    }

    // 2. Extremal agent
    let expected_extremal = session.extremal_answer();
    if submission.extremal == expected_extremal {
        score += 1;
        lines.push(format!(
            "2. Correct, the {} is {}.",
            session.extremal.agent_name(),
            expected_extremal
        ));
    } else {
        lines.push(format!(
            "2. Wrong — the {} is {}.",
            session.extremal.agent_name(),
            expected_extremal
        ));
    }

    score += grade_choice(&mut lines, 3, "Concept", &session.concept, &submission.concept);
    score += grade_choice(&mut lines, 4, "Equation", &session.equation, &submission.equation);

    QuizReport {
        lines,
        score,
        total: 4,
    }
}

fn grade_choice(
    lines: &mut Vec<String>,
    number: usize,
    label: &str,
    question: &Question,
    submitted: &str,
) -> usize {
    let correct = match question.correct_answer() {
        Some(answer) => answer,
        // A question without a correct option can't be scored
        None => {
            lines.push(format!("{number}. {label}: not scored."));
            return 0;
        }
    };

    if submitted == correct.text {
        lines.push(format!("{number}. {label}: correct!"));
        1
    } else {
        lines.push(format!(
            "{number}. {label}: wrong — the answer was \"{}\".",
            correct.text
        ));
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::equation::displacement_equation;
    use crate::quiz::reactivity::ReactivityRanks;
    use crate::quiz::{Answer, ExtremalKind};

    // A=3, B=1, C=4, D=2; reducing agent B, oxidising agent C
    fn fixed_session() -> QuizSession {
        let ranks = ReactivityRanks::from_order(&["B", "D", "A", "C"]);
        let concept = Question::new(
            "concept?".to_string(),
            vec![
                Answer::new("right".to_string(), true),
                Answer::new("wrong".to_string(), false),
            ],
        );
        let equation = Question::new(
            "equation?".to_string(),
            vec![
                Answer::new(displacement_equation("B", "C"), true),
                Answer::new(displacement_equation("C", "B"), false),
            ],
        );
        QuizSession {
            ranks,
            extremal: ExtremalKind::Reducing,
            concept,
            equation,
        }
    }

    fn perfect_submission() -> Submission {
        Submission {
            ranking: vec!["B", "D", "A", "C"].into_iter().map(String::from).collect(),
            extremal: "B".to_string(),
            concept: "right".to_string(),
            equation: displacement_equation("B", "C"),
        }
    }

    #[test]
    fn perfect_submission_gets_full_credit() {
        let report = grade(&fixed_session(), &perfect_submission());
        assert_eq!(report.score, 4);
        assert_eq!(report.total, 4);
    }

    #[test]
    fn grading_is_deterministic() {
        let session = fixed_session();
        let submission = perfect_submission();
        assert_eq!(grade(&session, &submission), grade(&session, &submission));
    }

    #[test]
    fn any_misplaced_ranking_scores_zero_for_the_item() {
        let session = fixed_session();
        let mut submission = perfect_submission();
        // D and A swapped, everything else right
        submission.ranking = vec!["B", "A", "D", "C"].into_iter().map(String::from).collect();

        let report = grade(&session, &submission);
        assert_eq!(report.score, 3);
        assert!(report.lines[0].contains("wrong"));
    }

    #[test]
    fn duplicate_ranking_is_reported_but_not_counted_as_wrong() {
        let session = fixed_session();
        let mut submission = perfect_submission();
        submission.ranking = vec!["B", "B", "A", "C"].into_iter().map(String::from).collect();

        let report = grade(&session, &submission);
        assert_eq!(report.score, 3);
        assert!(report.lines[0].contains("exactly once"));
        assert!(!report.lines[0].contains("wrong"));
    }

    #[test]
    fn reversed_equation_grades_as_incorrect() {
        let session = fixed_session();
        let mut submission = perfect_submission();
        submission.equation = displacement_equation("C", "B");

        let report = grade(&session, &submission);
        assert_eq!(report.score, 3);
        assert!(report.lines[3].contains("wrong"));
    }

    #[test]
    fn wrong_extremal_agent_grades_as_incorrect() {
        let session = fixed_session();
        let mut submission = perfect_submission();
        submission.extremal = "C".to_string();

        let report = grade(&session, &submission);
        assert_eq!(report.score, 3);
        assert!(report.lines[1].contains("Wrong"));
    }

    #[test]
    fn ranking_validation_cases() {
        let ok: Vec<String> = vec!["A", "B", "C", "D"].into_iter().map(String::from).collect();
        let dup: Vec<String> = vec!["A", "A", "C", "D"].into_iter().map(String::from).collect();
        let short: Vec<String> = vec!["A", "B", "C"].into_iter().map(String::from).collect();
        let unknown: Vec<String> = vec!["A", "B", "C", "E"].into_iter().map(String::from).collect();

        assert!(is_valid_ranking(&ok));
        assert!(!is_valid_ranking(&dup));
        assert!(!is_valid_ranking(&short));
        assert!(!is_valid_ranking(&unknown));
    }
}
