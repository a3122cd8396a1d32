//! Single-elimination bracket construction.
//!
//! Fields that are not a power of two get a preliminary round: the lowest
//! seeds play in while the top seeds take byes straight into the main
//! bracket.

use log::debug;

use super::models::{Bracket, BracketConfig, BracketRound, RoundName};
use crate::errors::{TournamentError, TournamentResult};
use crate::matches::{
    Entrant, EntrantId, Link, Match, MatchFormat, MatchId, Role, Side, Slot, ensure_unique,
};

/// What occupies a slot of the next round while building
#[derive(Debug, Clone, Copy)]
enum Feed {
    Seed(EntrantId),
    WinnerOf(MatchId),
}

struct BracketBuilder {
    format: MatchFormat,
    matches: Vec<Match>,
    rounds: Vec<BracketRound>,
}

impl BracketBuilder {
    fn new(format: MatchFormat) -> Self {
        Self {
            format,
            matches: Vec::new(),
            rounds: Vec::new(),
        }
    }

    fn open_round(&mut self, name: RoundName) -> u32 {
        let index = self.rounds.len() as u32;
        self.rounds.push(BracketRound {
            index,
            name,
            matches: Vec::new(),
        });
        index
    }

    /// Add a match to the most recently opened round and wire its feeds
    fn push_match(&mut self, round: u32, a: Feed, b: Feed) -> MatchId {
        let id = self.matches.len();
        let slot_a = self.slot_for(
            a,
            Link {
                match_id: id,
                side: Side::A,
            },
        );
        let slot_b = self.slot_for(
            b,
            Link {
                match_id: id,
                side: Side::B,
            },
        );
        self.matches
            .push(Match::new(id, round, slot_a, slot_b, self.format));
        if let Some(current) = self.rounds.last_mut() {
            current.matches.push(id);
        }
        id
    }

    fn slot_for(&mut self, feed: Feed, destination: Link) -> Slot {
        match feed {
            Feed::Seed(entrant) => Slot::Resolved(entrant),
            Feed::WinnerOf(source) => self.link(source, Role::Winner, destination),
        }
    }

    fn link(&mut self, source: MatchId, role: Role, destination: Link) -> Slot {
        let m = &mut self.matches[source];
        match role {
            Role::Winner => m.winner_to = Some(destination),
            Role::Loser => m.loser_to = Some(destination),
        }
        Slot::Placeholder { source, role }
    }
}

/// Build a bracket from entrants ordered best to worst
///
/// # Arguments
///
/// * `entrants` - Entrants in seed order
/// * `config` - Match format and third-place setting
///
/// # Returns
///
/// * `TournamentResult<Bracket>` - Every match with its slots and links
///
/// # Errors
///
/// * `TournamentError::InvalidEntrantCount` - fewer than 2 entrants
/// * `TournamentError::DuplicateEntrant` - an entrant listed twice
/// * `TournamentError::InvalidFormat` - bad match format
pub fn build_bracket(entrants: &[Entrant], config: &BracketConfig) -> TournamentResult<Bracket> {
    let count = entrants.len();
    if count < 2 {
        return Err(TournamentError::InvalidEntrantCount(count));
    }
    ensure_unique(entrants)?;
    config.format.validate()?;

    let total_slots = count.next_power_of_two();
    let byes = total_slots - count;
    let preliminary = (count - byes) / 2;
    debug!(
        "Building bracket: {count} entrants, {total_slots} slots, {byes} byes, {preliminary} preliminary matches"
    );

    let mut builder = BracketBuilder::new(config.format);

    // Opening round: lowest seeds play in. Without byes this is simply the
    // first round of the bracket.
    let opening_name = if byes > 0 {
        RoundName::Preliminary
    } else {
        RoundName::for_size(total_slots)
    };
    let opening = builder.open_round(opening_name);
    let mut feeds: Vec<Feed> = entrants[..byes]
        .iter()
        .map(|entrant| Feed::Seed(entrant.id))
        .collect();
    for i in 0..preliminary {
        let id = builder.push_match(
            opening,
            Feed::Seed(entrants[byes + i].id),
            Feed::Seed(entrants[count - 1 - i].id),
        );
        feeds.push(Feed::WinnerOf(id));
    }

    // Main bracket: strongest feed meets weakest, then adjacent winners.
    let mut pairs: Vec<(Feed, Feed)> = (0..feeds.len() / 2)
        .map(|i| (feeds[i], feeds[feeds.len() - 1 - i]))
        .collect();
    while !pairs.is_empty() {
        let round = builder.open_round(RoundName::for_size(pairs.len() * 2));
        let ids: Vec<MatchId> = pairs
            .iter()
            .map(|&(a, b)| builder.push_match(round, a, b))
            .collect();
        pairs = ids
            .chunks_exact(2)
            .map(|pair| (Feed::WinnerOf(pair[0]), Feed::WinnerOf(pair[1])))
            .collect();
    }

    if config.third_place_match {
        let semifinals: Vec<MatchId> = builder
            .rounds
            .iter()
            .find(|round| round.name == RoundName::Semifinal)
            .map(|round| round.matches.clone())
            .unwrap_or_default();

        if let [first, second] = semifinals[..] {
            let round = builder.open_round(RoundName::ThirdPlace);
            let id = builder.matches.len();
            let slot_a = builder.link(
                first,
                Role::Loser,
                Link {
                    match_id: id,
                    side: Side::A,
                },
            );
            let slot_b = builder.link(
                second,
                Role::Loser,
                Link {
                    match_id: id,
                    side: Side::B,
                },
            );
            builder
                .matches
                .push(Match::new(id, round, slot_a, slot_b, config.format));
            if let Some(current) = builder.rounds.last_mut() {
                current.matches.push(id);
            }
        }
    }

    Ok(Bracket {
        entrants: entrants.to_vec(),
        matches: builder.matches,
        rounds: builder.rounds,
        total_slots,
        byes,
    })
}
