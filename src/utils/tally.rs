use serde::{Deserialize, Serialize};

use crate::models::poll_models::PollOption;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OptionTally {
    pub id: String,
    pub text: String,
    pub votes: u32,
    pub percentage: f64,
}

pub fn total_votes(options: &[PollOption]) -> u64 {
    options.iter().map(|option| u64::from(option.votes)).sum()
}

/// Share of `votes` in `total` as a percentage with one decimal; 0 when no
/// votes have been cast.
pub fn percentage(votes: u32, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (f64::from(votes) / total as f64 * 1000.0).round() / 10.0
}

pub fn tally(options: &[PollOption]) -> Vec<OptionTally> {
    let total = total_votes(options);
    options
        .iter()
        .map(|option| OptionTally {
            id: option.id.clone(),
            text: option.text.clone(),
            votes: option.votes,
            percentage: percentage(option.votes, total),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(id: &str, votes: u32) -> PollOption {
        PollOption {
            id: id.to_string(),
            text: format!("option {id}"),
            votes,
        }
    }

    #[test]
    fn no_votes_means_zero_percent() {
        let rows = tally(&[option("1", 0), option("2", 0)]);
        assert!(rows.iter().all(|row| row.percentage == 0.0));
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(1, 8), 12.5);
        assert_eq!(percentage(4, 4), 100.0);
    }

    #[test]
    fn tally_uses_the_sum_of_all_options() {
        let rows = tally(&[option("1", 3), option("2", 1)]);
        assert_eq!(total_votes(&[option("1", 3), option("2", 1)]), 4);
        assert_eq!(rows[0].percentage, 75.0);
        assert_eq!(rows[1].percentage, 25.0);
    }
}
