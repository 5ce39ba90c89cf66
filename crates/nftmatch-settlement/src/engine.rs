//! The settlement engine — one owned state object, all mutation funneled
//! through its public transitions.
//!
//! Guard-then-mutate discipline: every transition runs its full validation
//! sequence against immutable state first, so a rejection needs no rollback
//! machinery. Mutation plus effect emission happens in one uninterrupted
//! tail.

use nftmatch_book::OrderBook;
use nftmatch_policy::{AccessPolicy, EscrowLedger};
use nftmatch_types::{
    Address, Amount, BlockHeight, Effect, FeeSchedule, FeeSplit, MarketError, MarketEvent,
    MarketplaceConfig, Order, OrderKey, OrderSide, Result, TokenId, TransitionReceipt,
};
use tracing::debug;

use crate::capability::{MarketHost, RoyaltyInfo};

/// The fixed-price marketplace engine.
///
/// Owns the order book, escrow ledger, and access policy. External actors
/// mutate state only through the transition methods and read it only
/// through the query methods — the single-writer model.
#[derive(Debug)]
pub struct SettlementEngine {
    config: MarketplaceConfig,
    book: OrderBook,
    policy: AccessPolicy,
    escrow: EscrowLedger,
}

/// Per-request call context: who calls, what native value rides along, and
/// the chain height the host stamped the request with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CallContext {
    pub caller: Address,
    /// Native currency attached to the call. Zero for token-paid requests.
    pub attached: Amount,
    /// Height at which the host serialized this request.
    pub height: BlockHeight,
}

impl SettlementEngine {
    /// Create an engine with an empty book and registry.
    #[must_use]
    pub fn new(config: MarketplaceConfig) -> Self {
        Self {
            config,
            book: OrderBook::new(),
            policy: AccessPolicy::new(),
            escrow: EscrowLedger::new(),
        }
    }

    // =================================================================
    // Trading transitions
    // =================================================================

    /// Create a fresh order, or update the expiration of the caller's
    /// existing order at the same key.
    pub fn set_order(
        &mut self,
        ctx: &CallContext,
        host: &impl MarketHost,
        key: OrderKey,
        side: OrderSide,
        expiration: BlockHeight,
    ) -> Result<TransitionReceipt> {
        if !self.policy.is_allowed(host, self.config.allowlist, ctx.caller) {
            return Err(MarketError::NotAllowedUser(ctx.caller));
        }
        if !self.policy.is_allowed_payment_token(key.payment_token) {
            return Err(MarketError::NotAllowedPaymentToken(key.payment_token));
        }
        if key.price == 0 {
            return Err(MarketError::ZeroPrice);
        }

        let owner = host
            .owner_of(key.collection, key.token_id)
            .ok_or(MarketError::UnknownAsset {
                collection: key.collection,
                token_id: key.token_id,
            })?;
        match side {
            OrderSide::Sell if ctx.caller != owner => {
                return Err(MarketError::NotTokenOwner(ctx.caller));
            }
            OrderSide::Buy if ctx.caller == owner => {
                return Err(MarketError::TokenOwner(ctx.caller));
            }
            _ => {}
        }

        let is_update = match self.book.get(side, &key) {
            Some(existing) if existing.maker != ctx.caller => {
                return Err(MarketError::NotSelf { key });
            }
            Some(_) => true,
            None => false,
        };

        // Only a fresh native buy order carries value; its escrow was
        // already taken on creation, so updates attach nothing.
        let escrows_now = !is_update && side == OrderSide::Buy && key.is_native();
        let required = if escrows_now { key.price } else { 0 };
        if ctx.attached != required {
            return Err(MarketError::NotEqualAmount {
                attached: ctx.attached,
                required,
            });
        }

        if escrows_now {
            self.escrow.deposit(key, key.price);
        }
        self.book.put(side, key, Order::new(ctx.caller, expiration));

        let mut receipt = TransitionReceipt::new();
        receipt.emit(MarketEvent::SetOrder {
            maker: ctx.caller,
            side,
            key,
            expiration,
        });
        debug!(caller = %ctx.caller.short(), %side, %key, update = is_update, "set order");
        Ok(receipt)
    }

    /// Remove the caller's order, refunding escrow if it was a native buy.
    pub fn cancel_order(
        &mut self,
        ctx: &CallContext,
        key: OrderKey,
        side: OrderSide,
    ) -> Result<TransitionReceipt> {
        let order = match self.book.get(side, &key) {
            Some(order) if order.maker == ctx.caller => *order,
            _ => return Err(MarketError::NotAllowedToCancelOrder { key }),
        };

        // Escrow release is the only fallible step; it precedes the book
        // removal so a breach leaves the book untouched.
        let refund = if side == OrderSide::Buy && key.is_native() {
            Some(self.escrow.release(&key)?)
        } else {
            None
        };
        let _ = self.book.remove(side, &key);

        let mut receipt = TransitionReceipt::new();
        receipt.emit(MarketEvent::CancelOrder {
            maker: order.maker,
            side,
            key,
        });
        if let Some(amount) = refund {
            receipt.push_effect(Effect::NativeTransfer {
                to: order.maker,
                amount,
            });
        }
        debug!(caller = %ctx.caller.short(), %side, %key, refund = ?refund, "cancel order");
        Ok(receipt)
    }

    /// Fulfill an order as the taker: settle payment three ways and move
    /// the asset. The opposite-side order at the same key is untouched.
    #[allow(clippy::too_many_lines)]
    pub fn fulfill_order(
        &mut self,
        ctx: &CallContext,
        host: &impl MarketHost,
        key: OrderKey,
        side: OrderSide,
        dest: Address,
    ) -> Result<TransitionReceipt> {
        if !self.policy.is_allowed(host, self.config.allowlist, ctx.caller) {
            return Err(MarketError::NotAllowedUser(ctx.caller));
        }
        if dest.is_zero() {
            return Err(MarketError::ZeroAddressDestination);
        }
        if dest == self.config.marketplace {
            return Err(MarketError::ThisAddressDestination);
        }

        let order = match self.book.get(side, &key) {
            Some(order) => *order,
            None => {
                return Err(match side {
                    OrderSide::Sell => MarketError::SellOrderNotFound { key },
                    OrderSide::Buy => MarketError::BuyOrderNotFound { key },
                });
            }
        };
        if order.maker == ctx.caller {
            return Err(MarketError::SelfTrade(ctx.caller));
        }
        if order.is_expired_at(ctx.height) {
            return Err(MarketError::Expired { key });
        }

        // Roles: a sell order's maker is the seller and the taker buys;
        // a buy order's maker is the buyer and the taker sells. `dest`
        // receives the asset on the sell path, the proceeds on the buy path.
        let (seller, buyer, asset_recipient, payment_recipient) = match side {
            OrderSide::Sell => (order.maker, ctx.caller, dest, order.maker),
            OrderSide::Buy => (ctx.caller, order.maker, order.maker, dest),
        };

        let royalty = host.royalty_info(key.collection);
        let schedule = FeeSchedule::new(royalty.bps, self.config.service_fee_bps)?;
        let split = schedule.split(key.price)?;

        // Payment-path guards. Native sell is the only transition that
        // accepts attached value at fulfillment; buy-side escrow was funded
        // at SetOrder and token paths are pull-payments.
        let payer = match (side, key.is_native()) {
            (OrderSide::Sell, true) => {
                if ctx.attached != key.price {
                    return Err(MarketError::NotEqualAmount {
                        attached: ctx.attached,
                        required: key.price,
                    });
                }
                None
            }
            (OrderSide::Buy, true) => {
                require_no_attached(ctx)?;
                None
            }
            (OrderSide::Sell, false) => {
                require_no_attached(ctx)?;
                Some(self.require_allowance(host, &key, ctx.caller)?)
            }
            (OrderSide::Buy, false) => {
                require_no_attached(ctx)?;
                Some(self.require_allowance(host, &key, order.maker)?)
            }
        };

        // All guards passed: mutate. Escrow disbursal first — its failure
        // is an invariant breach and must leave the book untouched.
        if side == OrderSide::Buy && key.is_native() {
            self.escrow.disburse(&key)?;
        }
        let _ = self.book.remove(side, &key);

        let mut receipt = TransitionReceipt::new();
        receipt.emit(MarketEvent::FulfillOrder {
            taker: ctx.caller,
            side,
            key,
            seller,
            buyer,
            asset_recipient,
            payment_recipient,
            royalty_recipient: royalty.recipient,
            royalty_amount: split.royalty,
            service_fee: split.service,
        });
        self.push_payment_effects(&mut receipt, &key, payer, &royalty, &split, payment_recipient);
        receipt.push_effect(Effect::AssetTransfer {
            collection: key.collection,
            token_id: key.token_id,
            from: seller,
            to: asset_recipient,
        });

        debug!(
            taker = %ctx.caller.short(),
            %side,
            %key,
            royalty = split.royalty,
            service = split.service,
            net = split.seller_net,
            "fulfill order"
        );
        Ok(receipt)
    }

    // =================================================================
    // Administration (owner-gated)
    // =================================================================

    /// Approve a payment token for use in new orders.
    pub fn allow_payment_token(
        &mut self,
        ctx: &CallContext,
        token: Address,
    ) -> Result<TransitionReceipt> {
        self.require_owner(ctx)?;
        self.policy.allow_payment_token(token);

        let mut receipt = TransitionReceipt::new();
        receipt.emit(MarketEvent::PaymentTokenAllowed { token });
        Ok(receipt)
    }

    /// Remove a payment token from the registry. Outstanding orders priced
    /// in it stay cancellable and fulfillable; new listings are blocked.
    pub fn revoke_payment_token(
        &mut self,
        ctx: &CallContext,
        token: Address,
    ) -> Result<TransitionReceipt> {
        self.require_owner(ctx)?;
        self.policy.revoke_payment_token(token);

        let mut receipt = TransitionReceipt::new();
        receipt.emit(MarketEvent::PaymentTokenRevoked { token });
        Ok(receipt)
    }

    /// Repoint membership checks at a different allowlist contract.
    pub fn set_allowlist(
        &mut self,
        ctx: &CallContext,
        allowlist: Address,
    ) -> Result<TransitionReceipt> {
        self.require_owner(ctx)?;
        self.config.allowlist = allowlist;

        let mut receipt = TransitionReceipt::new();
        receipt.emit(MarketEvent::AllowlistChanged { allowlist });
        Ok(receipt)
    }

    // =================================================================
    // Read-only queries
    // =================================================================

    /// The sell order at a key, if any.
    #[must_use]
    pub fn sell_order(&self, key: &OrderKey) -> Option<&Order> {
        self.book.get(OrderSide::Sell, key)
    }

    /// The buy order at a key, if any.
    #[must_use]
    pub fn buy_order(&self, key: &OrderKey) -> Option<&Order> {
        self.book.get(OrderSide::Buy, key)
    }

    /// All listings for one asset on one side, across prices and tokens.
    pub fn listings_for(
        &self,
        side: OrderSide,
        collection: Address,
        token_id: TokenId,
    ) -> impl Iterator<Item = (&OrderKey, &Order)> {
        self.book.listings_for(side, collection, token_id)
    }

    /// Whether a token may be used to price new orders.
    #[must_use]
    pub fn is_allowed_payment_token(&self, token: Address) -> bool {
        self.policy.is_allowed_payment_token(token)
    }

    /// Native funds currently in marketplace custody.
    #[must_use]
    pub fn escrow_total(&self) -> Amount {
        self.escrow.total()
    }

    /// The engine's static configuration.
    #[must_use]
    pub fn config(&self) -> &MarketplaceConfig {
        &self.config
    }

    // =================================================================
    // Internals
    // =================================================================

    fn require_owner(&self, ctx: &CallContext) -> Result<()> {
        if ctx.caller != self.config.owner {
            return Err(MarketError::NotContractOwner(ctx.caller));
        }
        Ok(())
    }

    /// Check the payer granted the marketplace enough allowance; returns
    /// the payer for the pull-transfer legs.
    fn require_allowance(
        &self,
        host: &impl MarketHost,
        key: &OrderKey,
        payer: Address,
    ) -> Result<Address> {
        let allowance = host.allowance(key.payment_token, payer, self.config.marketplace);
        if allowance < key.price {
            return Err(MarketError::InsufficientAllowance {
                allowance,
                required: key.price,
            });
        }
        Ok(payer)
    }

    /// Emit the three payment legs. `None` payer means native settlement
    /// (push transfers out of marketplace custody or attached value);
    /// `Some(payer)` means token pull-transfers from that account.
    /// Zero-amount legs are elided.
    fn push_payment_effects(
        &self,
        receipt: &mut TransitionReceipt,
        key: &OrderKey,
        payer: Option<Address>,
        royalty: &RoyaltyInfo,
        split: &FeeSplit,
        payment_recipient: Address,
    ) {
        let legs = [
            (royalty.recipient, split.royalty),
            (self.config.owner, split.service),
            (payment_recipient, split.seller_net),
        ];
        for (to, amount) in legs {
            if amount == 0 {
                continue;
            }
            match payer {
                None => receipt.push_effect(Effect::NativeTransfer { to, amount }),
                Some(from) => receipt.push_effect(Effect::TokenTransfer {
                    token: key.payment_token,
                    from,
                    to,
                    amount,
                }),
            }
        }
    }
}

/// Transitions that settle without attached value must receive none.
fn require_no_attached(ctx: &CallContext) -> Result<()> {
    if ctx.attached != 0 {
        return Err(MarketError::NotEqualAmount {
            attached: ctx.attached,
            required: 0,
        });
    }
    Ok(())
}
