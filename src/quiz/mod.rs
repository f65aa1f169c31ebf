pub mod concept;
pub mod equation;
pub mod grading;
pub mod reactivity;

use rand::Rng;

use reactivity::ReactivityRanks;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub text: String,
    pub answers: Vec<Answer>,
}
impl Question {
    pub fn new(text: String, answers: Vec<Answer>) -> Self {
        Self { text, answers }
    }

    pub fn correct_answer(&self) -> Option<&Answer> {
        self.answers.iter().find(|a| a.is_correct)
    }

    pub fn has_option(&self, text: &str) -> bool {
        self.answers.iter().any(|a| a.text == text)
    }
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Answer {
    pub text: String,
    pub is_correct: bool,
}
impl Answer {
    pub fn new(text: String, is_correct: bool) -> Self {
        Self { text, is_correct }
    }
}

/// Which end of the reactivity series the extremal question asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ExtremalKind {
    Reducing,
    Oxidising,
}

impl ExtremalKind {
    pub fn pick_random() -> Self {
        if rand::thread_rng().gen_bool(0.5) {
            ExtremalKind::Reducing
        } else {
            ExtremalKind::Oxidising
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            ExtremalKind::Reducing => "Which metal is the strongest reducing agent?",
            ExtremalKind::Oxidising => "Which metal is the strongest oxidising agent?",
        }
    }

    pub fn agent_name(&self) -> &'static str {
        match self {
            ExtremalKind::Reducing => "strongest reducing agent",
            ExtremalKind::Oxidising => "strongest oxidising agent",
        }
    }
}

/// Everything random about one attempt, rolled in one go and then kept
/// unchanged until the attempt is over. Handlers that re-ask a question must
/// read from here instead of rolling new values, otherwise the hidden
/// ordering would drift between prompts.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct QuizSession {
    pub ranks: ReactivityRanks,
    pub extremal: ExtremalKind,
    pub concept: Question,
    pub equation: Question,
}

impl QuizSession {
    pub fn generate() -> Self {
        let ranks = ReactivityRanks::random();
        let extremal = ExtremalKind::pick_random();
        let concept = concept::pick_concept_question();
        let equation = equation::generate_question(&ranks);

        Self {
            ranks,
            extremal,
            concept,
            equation,
        }
    }

    /// The metal the extremal question is about. The strongest reducing agent
    /// sits at rank 1, the strongest oxidising agent at rank N.
    pub fn extremal_answer(&self) -> &str {
        match self.extremal {
            ExtremalKind::Reducing => self.ranks.strongest_reducing_agent(),
            ExtremalKind::Oxidising => self.ranks.strongest_oxidising_agent(),
        }
    }
}
