use rand::seq::SliceRandom;
use rand::thread_rng;

/// The metals of the test. Neutral labels, so the hidden ordering can't be
/// guessed from real chemistry.
pub const METALS: [&str; 4] = ["A", "B", "C", "D"];

// Cell labels for the displacement table
const SAME_METAL: &str = "—";
const REACTION: &str = "R";
const NO_REACTION: &str = "·";

/// A randomly assigned reactivity series: every metal gets a rank 1..=N,
/// lower rank means more reactive (1 = most reactive).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ReactivityRanks {
    ranks: Vec<(String, usize)>,
}

impl ReactivityRanks {
    /// Shuffles the metals into a fresh hidden ordering. Called once per
    /// attempt; the result lives in the dialogue state afterwards.
    pub fn random() -> Self {
        let mut order = METALS.to_vec();
        order.shuffle(&mut thread_rng());
        Self::from_order(&order)
    }

    /// Builds the ranks from an explicit order, most reactive metal first.
    pub fn from_order(order: &[&str]) -> Self {
        let ranks = order
            .iter()
            .enumerate()
            .map(|(position, metal)| (metal.to_string(), position + 1))
            .collect();
        Self { ranks }
    }

    pub fn rank(&self, metal: &str) -> Option<usize> {
        self.ranks
            .iter()
            .find(|(known, _)| known == metal)
            .map(|(_, rank)| *rank)
    }

    /// The one comparison the whole test hangs on: the added metal pushes the
    /// solution metal out of its nitrate iff the added metal is more reactive.
    /// Both the table and the grader go through here, so they can't disagree.
    pub fn displaces(&self, added: &str, in_solution: &str) -> bool {
        match (self.rank(added), self.rank(in_solution)) {
            (Some(added_rank), Some(solution_rank)) => added_rank < solution_rank,
            _ => false,
        }
    }

    /// All metals sorted from most to least reactive.
    pub fn ranking(&self) -> Vec<String> {
        let mut by_rank = self.ranks.clone();
        by_rank.sort_by_key(|(_, rank)| *rank);
        by_rank.into_iter().map(|(metal, _)| metal).collect()
    }

    pub fn strongest_reducing_agent(&self) -> &str {
        // Safe to unwrap: the ranks always hold every metal
        let (metal, _) = self.ranks.iter().min_by_key(|(_, rank)| *rank).unwrap();
        metal
    }

    pub fn strongest_oxidising_agent(&self) -> &str {
        let (metal, _) = self.ranks.iter().max_by_key(|(_, rank)| *rank).unwrap();
        metal
    }

    /// Monospace displacement table for the quiz intro. Rows are the added
    /// metal, columns the metal whose nitrate solution it is dropped into.
    pub fn render_table(&self) -> String {
        let header = METALS
            .iter()
            .map(|metal| format!("{}NO₃", metal))
            .collect::<Vec<_>>()
            .join("  ");
        let mut lines = vec![format!("      {}", header)];

        for added in METALS.iter() {
            let cells = METALS
                .iter()
                .map(|in_solution| {
                    if added == in_solution {
                        SAME_METAL
                    } else if self.displaces(added, in_solution) {
                        REACTION
                    } else {
                        NO_REACTION
                    }
                })
                .map(|cell| format!("{:^6}", cell))
                .collect::<Vec<_>>()
                .join("");
            lines.push(format!("{:<6}{}", added, cells));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ranks_are_a_permutation() {
        for _ in 0..50 {
            let ranks = ReactivityRanks::random();
            let mut seen: Vec<usize> = METALS
                .iter()
                .map(|metal| ranks.rank(metal).expect("every metal is ranked"))
                .collect();
            seen.sort_unstable();
            assert_eq!(seen, vec![1, 2, 3, 4]);
        }
    }

    #[test]
    fn displacement_is_antisymmetric_off_the_diagonal() {
        for _ in 0..50 {
            let ranks = ReactivityRanks::random();
            for x in METALS.iter() {
                for y in METALS.iter() {
                    if x == y {
                        assert!(!ranks.displaces(x, y));
                    } else {
                        assert_ne!(ranks.displaces(x, y), ranks.displaces(y, x));
                    }
                }
            }
        }
    }

    #[test]
    fn worked_example_ranks() {
        // A=3, B=1, C=4, D=2
        let ranks = ReactivityRanks::from_order(&["B", "D", "A", "C"]);
        assert_eq!(ranks.rank("A"), Some(3));
        assert_eq!(ranks.rank("B"), Some(1));
        assert_eq!(ranks.rank("C"), Some(4));
        assert_eq!(ranks.rank("D"), Some(2));
        assert_eq!(ranks.ranking(), vec!["B", "D", "A", "C"]);
        assert_eq!(ranks.strongest_reducing_agent(), "B");
        assert_eq!(ranks.strongest_oxidising_agent(), "C");
    }

    #[test]
    fn unknown_metal_never_displaces() {
        let ranks = ReactivityRanks::from_order(&["B", "D", "A", "C"]);
        assert_eq!(ranks.rank("E"), None);
        assert!(!ranks.displaces("E", "A"));
        assert!(!ranks.displaces("A", "E"));
    }

    #[test]
    fn table_has_a_sentinel_diagonal() {
        let ranks = ReactivityRanks::from_order(&["B", "D", "A", "C"]);
        let table = ranks.render_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), METALS.len() + 1);
        assert_eq!(table.matches(SAME_METAL).count(), METALS.len());
    }
}
