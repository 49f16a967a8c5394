//! Running match score

use std::fmt;

use chess_core::MatchOutcome;

/// Wins for the engine, draws, wins for the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub engine_wins: u32,
    pub draws: u32,
    pub model_wins: u32,
}

impl Tally {
    pub fn record(&mut self, outcome: MatchOutcome) {
        match outcome {
            MatchOutcome::EngineWin => self.engine_wins += 1,
            MatchOutcome::Draw => self.draws += 1,
            MatchOutcome::ModelWin => self.model_wins += 1,
        }
    }

    /// Games folded into the tally so far
    pub fn games(&self) -> u32 {
        self.engine_wins + self.draws + self.model_wins
    }

    /// Progress line such as `Leela 3 Draw 1 GPT 0`
    pub fn display<'a>(&'a self, engine_name: &'a str, model_name: &'a str) -> TallyLine<'a> {
        TallyLine {
            tally: self,
            engine_name,
            model_name,
        }
    }
}

pub struct TallyLine<'a> {
    tally: &'a Tally,
    engine_name: &'a str,
    model_name: &'a str,
}

impl fmt::Display for TallyLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} Draw {} {} {}",
            self.engine_name,
            self.tally.engine_wins,
            self.tally.draws,
            self.model_name,
            self.tally.model_wins
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_sum() {
        let mut tally = Tally::default();
        let outcomes = [
            MatchOutcome::EngineWin,
            MatchOutcome::Draw,
            MatchOutcome::EngineWin,
            MatchOutcome::ModelWin,
        ];
        for (i, outcome) in outcomes.into_iter().enumerate() {
            tally.record(outcome);
            assert_eq!(tally.games(), i as u32 + 1);
        }
        assert_eq!(tally.engine_wins, 2);
        assert_eq!(tally.draws, 1);
        assert_eq!(tally.model_wins, 1);
    }

    #[test]
    fn test_display() {
        let tally = Tally {
            engine_wins: 3,
            draws: 1,
            model_wins: 0,
        };
        assert_eq!(tally.display("Leela", "GPT").to_string(), "Leela 3 Draw 1 GPT 0");
    }
}
