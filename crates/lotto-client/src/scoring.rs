//! Ticket scoring and ranking against the drawing hash.

use std::cmp::Ordering;

use crate::state::{ScoringSummary, TicketRecord, TicketScore};

/// Index of the first non-zero nibble; the full length when the string is
/// all zeros (nothing to compare).
pub fn first_non_zero_index(hex: &str) -> usize {
    hex.bytes()
        .position(|b| b != b'0')
        .unwrap_or(hex.len())
}

/// Numeric value of one hex character; non-hex characters count as 0.
fn nibble_value(c: char) -> u64 {
    c.to_digit(16).map(u64::from).unwrap_or(0)
}

/// Compute the match/score pair for one playing number.
///
/// Leading zeros of the drawing hash are never compared; positions there
/// contribute nothing even when the playing number also holds a zero.
/// Comparison walks both strings in lock-step to the shorter length.
pub fn compute_ticket_score(playing_number: &str, drawing_hash: &str) -> TicketScore {
    let start = first_non_zero_index(drawing_hash);
    let mut result = TicketScore::default();

    for (drawing_nibble, ticket_nibble) in drawing_hash
        .chars()
        .zip(playing_number.chars())
        .skip(start)
    {
        if drawing_nibble == ticket_nibble {
            result.matches += 1;
            result.score += nibble_value(drawing_nibble);
        }
    }

    result
}

/// Total order over scored tickets: matches descending, score descending,
/// index ascending. Index uniqueness makes the order strict.
pub fn ticket_order(a: &TicketRecord, b: &TicketRecord) -> Ordering {
    b.matches
        .cmp(&a.matches)
        .then_with(|| b.score.cmp(&a.score))
        .then_with(|| a.index.cmp(&b.index))
}

/// Sort tickets into winning order.
pub fn rank_tickets(mut tickets: Vec<TicketRecord>) -> Vec<TicketRecord> {
    tickets.sort_by(ticket_order);
    tickets
}

/// Tickets meeting the winner requirements, in the order given.
pub fn filter_winning_tickets(
    tickets: &[TicketRecord],
    required_matches: u64,
    sold_only: bool,
) -> Vec<TicketRecord> {
    tickets
        .iter()
        .filter(|ticket| ticket.matches >= required_matches)
        .filter(|ticket| !sold_only || ticket.sold)
        .cloned()
        .collect()
}

/// Best qualifying ticket, or `None` when nothing meets the requirements.
pub fn top_winner(
    tickets: &[TicketRecord],
    required_matches: u64,
    sold_only: bool,
) -> Option<TicketRecord> {
    let ranked = rank_tickets(tickets.to_vec());
    filter_winning_tickets(&ranked, required_matches, sold_only)
        .into_iter()
        .next()
}

/// Aggregate statistics over a scored ticket set.
pub fn scoring_summary(tickets: &[TicketRecord], required_matches: u64) -> ScoringSummary {
    let sold = tickets.iter().filter(|t| t.sold).count() as u64;
    let qualified = |t: &&TicketRecord| t.matches >= required_matches;

    ScoringSummary {
        total_tickets: tickets.len() as u64,
        sold_tickets: sold,
        unsold_tickets: tickets.len() as u64 - sold,
        highest_matches: tickets.iter().map(|t| t.matches).max().unwrap_or(0),
        highest_score: tickets.iter().map(|t| t.score).max().unwrap_or(0),
        qualified_winners: tickets.iter().filter(qualified).count() as u64,
        sold_qualified_winners: tickets
            .iter()
            .filter(|t| t.sold)
            .filter(qualified)
            .count() as u64,
    }
}
