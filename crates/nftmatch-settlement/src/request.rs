//! Serialized request surface — one decoded request per transition.
//!
//! Hosts that drive the engine as a service decode each incoming call into
//! a [`Request`] and hand it to [`SettlementEngine::apply`] together with
//! its [`CallContext`]. Library users can call the transition methods
//! directly; `apply` adds nothing but dispatch and rejection logging.

use nftmatch_types::{
    Address, Amount, BlockHeight, OrderKey, OrderSide, Result, TokenId, TransitionReceipt,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::capability::MarketHost;
use crate::engine::{CallContext, SettlementEngine};

/// One decoded marketplace request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    SetOrder {
        collection: Address,
        token_id: TokenId,
        payment_token: Address,
        price: Amount,
        side: OrderSide,
        expiration: BlockHeight,
    },
    CancelOrder {
        collection: Address,
        token_id: TokenId,
        payment_token: Address,
        price: Amount,
        side: OrderSide,
    },
    FulfillOrder {
        collection: Address,
        token_id: TokenId,
        payment_token: Address,
        price: Amount,
        side: OrderSide,
        dest: Address,
    },
    AllowPaymentToken {
        token: Address,
    },
    RevokePaymentToken {
        token: Address,
    },
    SetAllowlist {
        allowlist: Address,
    },
}

impl SettlementEngine {
    /// Dispatch one decoded request. Rejections are logged with their wire
    /// code and returned unchanged.
    pub fn apply(
        &mut self,
        ctx: &CallContext,
        host: &impl MarketHost,
        request: Request,
    ) -> Result<TransitionReceipt> {
        let result = match request {
            Request::SetOrder {
                collection,
                token_id,
                payment_token,
                price,
                side,
                expiration,
            } => self.set_order(
                ctx,
                host,
                OrderKey::new(collection, token_id, payment_token, price),
                side,
                expiration,
            ),
            Request::CancelOrder {
                collection,
                token_id,
                payment_token,
                price,
                side,
            } => self.cancel_order(
                ctx,
                OrderKey::new(collection, token_id, payment_token, price),
                side,
            ),
            Request::FulfillOrder {
                collection,
                token_id,
                payment_token,
                price,
                side,
                dest,
            } => self.fulfill_order(
                ctx,
                host,
                OrderKey::new(collection, token_id, payment_token, price),
                side,
                dest,
            ),
            Request::AllowPaymentToken { token } => self.allow_payment_token(ctx, token),
            Request::RevokePaymentToken { token } => self.revoke_payment_token(ctx, token),
            Request::SetAllowlist { allowlist } => self.set_allowlist(ctx, allowlist),
        };

        if let Err(err) = &result {
            warn!(caller = %ctx.caller.short(), code = err.code(), %err, "request rejected");
        }
        result
    }
}
