//! Custody-based ticket status classification.

use tracing::warn;

use crate::constants::{GRAVEYARD_ADDRESS_MAINNET, GRAVEYARD_ADDRESS_TESTNET};
use crate::state::TicketStatus;

/// Network variant a chain selector resolves to.
///
/// The graveyard address is the only network-specific constant the client
/// needs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Network {
    Testnet,
    Mainnet,
}

impl Network {
    /// Resolve a chain selector. An absent selector and the test-chain
    /// name both map to the test network; anything else is production.
    pub fn from_chain(chain: Option<&str>) -> Self {
        match chain {
            None => Network::Testnet,
            Some(name) if name.eq_ignore_ascii_case("vrsctest") => Network::Testnet,
            Some(_) => Network::Mainnet,
        }
    }

    /// Fixed address discarded tickets are sent to on this network.
    pub fn graveyard_address(self) -> &'static str {
        match self {
            Network::Testnet => GRAVEYARD_ADDRESS_TESTNET,
            Network::Mainnet => GRAVEYARD_ADDRESS_MAINNET,
        }
    }
}

/// Derive sold/discarded/claimed flags from a ticket's current primary
/// custody address.
///
/// The three predicates are evaluated independently:
/// - claimed: address equals the ledger's claimed-tickets address
///   (only checked when the ledger published one),
/// - discarded: address equals the network's graveyard address,
/// - sold: address is neither the graveyard nor the unsold-ticket address.
///
/// A missing primary address yields all-false. Overlapping results are
/// possible when the reference addresses themselves collide; that is an
/// upstream data inconsistency and is logged, not rejected.
pub fn classify(
    primary_address: Option<&str>,
    network: Network,
    r_address_for_tickets: &str,
    claimed_tickets_address: &str,
) -> TicketStatus {
    let Some(address) = primary_address else {
        return TicketStatus::default();
    };

    let graveyard = network.graveyard_address();
    let status = TicketStatus {
        sold: address != graveyard && address != r_address_for_tickets,
        discarded: address == graveyard,
        claimed: !claimed_tickets_address.is_empty() && address == claimed_tickets_address,
    };

    if status.discarded && status.claimed {
        warn!(
            address,
            "ticket custody address matches both the graveyard and the claimed-tickets address"
        );
    }

    status
}

#[cfg(test)]
mod tests {
    use super::*;

    const R_ADDRESS: &str = "RUnsoldTickets1111111111111111111";
    const CLAIMED: &str = "RClaimedTickets111111111111111111";
    const BUYER: &str = "RSomeBuyer11111111111111111111111";

    #[test]
    fn chain_selector_resolves_network() {
        assert_eq!(Network::from_chain(None), Network::Testnet);
        assert_eq!(Network::from_chain(Some("vrsctest")), Network::Testnet);
        assert_eq!(Network::from_chain(Some("VRSCTEST")), Network::Testnet);
        assert_eq!(Network::from_chain(Some("vrsc")), Network::Mainnet);
        assert_eq!(Network::from_chain(Some("varrr")), Network::Mainnet);
    }

    #[test]
    fn graveyard_addresses_differ_per_network() {
        assert_ne!(
            Network::Testnet.graveyard_address(),
            Network::Mainnet.graveyard_address()
        );
    }

    #[test]
    fn unsold_ticket_is_neither_sold_nor_discarded() {
        let status = classify(Some(R_ADDRESS), Network::Testnet, R_ADDRESS, CLAIMED);
        assert_eq!(status, TicketStatus::default());
    }

    #[test]
    fn graveyard_custody_means_discarded() {
        let graveyard = Network::Testnet.graveyard_address();
        let status = classify(Some(graveyard), Network::Testnet, R_ADDRESS, CLAIMED);
        assert!(status.discarded);
        assert!(!status.sold);
        assert!(!status.claimed);
    }

    #[test]
    fn foreign_custody_means_sold() {
        let status = classify(Some(BUYER), Network::Testnet, R_ADDRESS, CLAIMED);
        assert!(status.sold);
        assert!(!status.discarded);
        assert!(!status.claimed);
    }

    #[test]
    fn claimed_custody_is_also_sold() {
        // The claim address differs from both reference addresses, so the
        // independent predicates both hold.
        let status = classify(Some(CLAIMED), Network::Testnet, R_ADDRESS, CLAIMED);
        assert!(status.claimed);
        assert!(status.sold);
        assert!(!status.discarded);
    }

    #[test]
    fn empty_claim_address_never_claims() {
        let status = classify(Some(BUYER), Network::Testnet, R_ADDRESS, "");
        assert!(!status.claimed);
    }

    #[test]
    fn missing_primary_address_yields_all_false() {
        let status = classify(None, Network::Testnet, R_ADDRESS, CLAIMED);
        assert_eq!(status, TicketStatus::default());
    }

    #[test]
    fn colliding_reference_addresses_stay_permissive() {
        // Upstream inconsistency: the ledger published the graveyard as its
        // claim address. Both flags are reported.
        let graveyard = Network::Testnet.graveyard_address();
        let status = classify(Some(graveyard), Network::Testnet, R_ADDRESS, graveyard);
        assert!(status.discarded);
        assert!(status.claimed);
    }
}
