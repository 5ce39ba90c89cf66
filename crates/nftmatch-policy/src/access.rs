//! Access policy — allowlist membership and the payment-token registry.
//!
//! The allowlist itself is an external contract; the policy only issues
//! membership queries against it through the [`Membership`] capability.
//! The payment-token registry is engine state, administered through
//! owner-gated transitions.

use std::collections::BTreeSet;

use nftmatch_types::Address;

/// Membership capability of an external allowlist contract.
///
/// `list` is the allowlist contract address the query is issued against;
/// the marketplace owner can repoint it at runtime.
pub trait Membership {
    fn is_member(&self, list: Address, address: Address) -> bool;
}

/// Who may trade, and what they may pay with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    /// Payment tokens approved for use. Native currency is implicitly
    /// allowed and never appears here.
    allowed_tokens: BTreeSet<Address>,
}

impl AccessPolicy {
    /// Policy with an empty registry (native currency only).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the allowlist admits `address`.
    pub fn is_allowed(&self, host: &impl Membership, list: Address, address: Address) -> bool {
        host.is_member(list, address)
    }

    /// Whether `token` may be used as a payment token. The zero address is
    /// the native-currency sentinel and is always allowed.
    #[must_use]
    pub fn is_allowed_payment_token(&self, token: Address) -> bool {
        token.is_zero() || self.allowed_tokens.contains(&token)
    }

    /// Add a token to the registry. Returns `false` if already present.
    pub fn allow_payment_token(&mut self, token: Address) -> bool {
        self.allowed_tokens.insert(token)
    }

    /// Remove a token from the registry. Returns `false` if absent.
    pub fn revoke_payment_token(&mut self, token: Address) -> bool {
        self.allowed_tokens.remove(&token)
    }

    /// Approved tokens in address order.
    pub fn allowed_tokens(&self) -> impl Iterator<Item = &Address> {
        self.allowed_tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedList {
        list: Address,
        members: Vec<Address>,
    }

    impl Membership for FixedList {
        fn is_member(&self, list: Address, address: Address) -> bool {
            list == self.list && self.members.contains(&address)
        }
    }

    fn addr(b: u8) -> Address {
        Address([b; 20])
    }

    #[test]
    fn native_is_always_allowed() {
        let policy = AccessPolicy::new();
        assert!(policy.is_allowed_payment_token(Address::ZERO));
    }

    #[test]
    fn unregistered_token_rejected() {
        let policy = AccessPolicy::new();
        assert!(!policy.is_allowed_payment_token(addr(9)));
    }

    #[test]
    fn allow_and_revoke_token() {
        let mut policy = AccessPolicy::new();
        assert!(policy.allow_payment_token(addr(9)));
        assert!(policy.is_allowed_payment_token(addr(9)));
        // Second insert is a no-op
        assert!(!policy.allow_payment_token(addr(9)));

        assert!(policy.revoke_payment_token(addr(9)));
        assert!(!policy.is_allowed_payment_token(addr(9)));
        assert!(!policy.revoke_payment_token(addr(9)));
    }

    #[test]
    fn membership_goes_through_capability() {
        let policy = AccessPolicy::new();
        let host = FixedList {
            list: addr(1),
            members: vec![addr(5)],
        };
        assert!(policy.is_allowed(&host, addr(1), addr(5)));
        assert!(!policy.is_allowed(&host, addr(1), addr(6)));
        // Queries against a different list address see nothing
        assert!(!policy.is_allowed(&host, addr(2), addr(5)));
    }

    #[test]
    fn allowed_tokens_iterate_in_order() {
        let mut policy = AccessPolicy::new();
        policy.allow_payment_token(addr(9));
        policy.allow_payment_token(addr(3));
        let tokens: Vec<Address> = policy.allowed_tokens().copied().collect();
        assert_eq!(tokens, vec![addr(3), addr(9)]);
    }
}
