//! ParaSwap v5 API provider
//!
//! Prices come from `GET prices` as a `priceRoute` object. Building a swap
//! posts that route, unmodified, to `POST transactions/{chainId}`. The build
//! always fetches a fresh route so the transaction matches current prices.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn, Instrument};

use super::{
    address_field, amount_field, request_failed, transaction_instruction, ProviderInstruction,
    Quote, QuoteRequest, SwapAmount, SwapQuoteProvider,
};
use crate::config::ParaSwapConfig;
use crate::errors::QuoteError;
use crate::spans;
use crate::transport::{endpoint, NetworkClient, RequestParams, ResponseCache, TransportError};
use crate::types::tokens::normalize_native;

const PROVIDER: &str = "paraswap";

/// DEX names excluded from routing (RFQ and one-time market makers)
const EXCLUDED_DEXS: &str = "0xRFQt,OMM1";

/// Message fragments ParaSwap uses when no route is viable
const LIQUIDITY_MARKERS: [&str; 2] = ["liquidity", "estimated_loss_greater_than_max_impact"];

/// ParaSwap aggregator
#[derive(Clone)]
pub struct ParaSwapProvider {
    client: Arc<dyn NetworkClient>,
    config: ParaSwapConfig,
    price_cache: Arc<ResponseCache>,
}

impl ParaSwapProvider {
    pub fn new(client: Arc<dyn NetworkClient>, config: ParaSwapConfig) -> Self {
        let price_cache = Arc::new(ResponseCache::new(
            config.price_cache_ttl,
            config.price_cache_entries,
        ));
        Self {
            client,
            config,
            price_cache,
        }
    }

    fn price_params(&self, chain_id: u64, request: &QuoteRequest) -> RequestParams {
        RequestParams::new()
            .query("srcToken", normalize_native(request.sell_token))
            .query("srcDecimals", request.sell_decimals.as_u8())
            .query("destToken", normalize_native(request.buy_token))
            .query("destDecimals", request.buy_decimals.as_u8())
            .query("amount", request.amount.value())
            .query("side", request.amount.side().as_str())
            .query("network", chain_id)
            .query("excludeDEXS", EXCLUDED_DEXS)
            .query("maxImpact", self.config.max_impact)
    }

    fn transaction_body(request: &QuoteRequest, price_route: &Value) -> Value {
        let mut body = json!({
            "srcToken": normalize_native(request.sell_token),
            "srcDecimals": request.sell_decimals.as_u8(),
            "destToken": normalize_native(request.buy_token),
            "destDecimals": request.buy_decimals.as_u8(),
            "slippage": request.slippage.to_bps(),
            "userAddress": request.taker,
            "priceRoute": price_route,
            "excludeDEXS": EXCLUDED_DEXS,
        });
        // Only the fixed side is sent; the router derives the other from slippage
        let key = match request.amount {
            SwapAmount::Sell(_) => "srcAmount",
            SwapAmount::Buy(_) => "destAmount",
        };
        body[key] = price_route.get(key).cloned().unwrap_or(Value::Null);
        if let Some(receiver) = request.receiver {
            body["receiver"] = json!(receiver);
        }
        body
    }

    fn parse_price_route(body: &Value) -> Result<Quote, QuoteError> {
        let route = body
            .get("priceRoute")
            .ok_or_else(|| QuoteError::malformed(PROVIDER, "missing `priceRoute`"))?;
        let sell_amount = amount_field(PROVIDER, route, "srcAmount")?;
        let buy_amount = amount_field(PROVIDER, route, "destAmount")?;
        let spender = address_field(PROVIDER, route, "tokenTransferProxy")?;
        Ok(Quote::new(sell_amount, buy_amount, spender, route.clone()))
    }

    async fn fetch_price_route(
        &self,
        chain_id: u64,
        request: &QuoteRequest,
        cached: bool,
    ) -> Result<Quote, QuoteError> {
        let url = endpoint(&self.config.base_url, "prices");
        let params = self.price_params(chain_id, request);
        let body = if cached {
            self.price_cache
                .get_or_fetch(self.client.as_ref(), &url, &params)
                .await
        } else {
            self.client.get(&url, &params).await
        }
        .map_err(map_error)?;
        Self::parse_price_route(&body)
    }
}

/// Classify a failed ParaSwap request
fn map_error(error: TransportError) -> QuoteError {
    let message = error.describe();
    let lowered = message.to_lowercase();
    if LIQUIDITY_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        return QuoteError::InsufficientLiquidity {
            provider: PROVIDER,
            message,
        };
    }

    warn!(status = ?error.status, error = %message, "ParaSwap request failed");
    request_failed(PROVIDER, &error)
}

#[async_trait]
impl SwapQuoteProvider for ParaSwapProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn supports_receiver(&self) -> bool {
        true
    }

    async fn get_price(&self, chain_id: u64, request: &QuoteRequest) -> Result<Quote, QuoteError> {
        async move {
            let quote = self.fetch_price_route(chain_id, request, true).await?;
            debug!(
                sell_amount = %quote.sell_amount,
                buy_amount = %quote.buy_amount,
                "Received ParaSwap price route"
            );
            Ok(quote)
        }
        .instrument(spans::get_price(PROVIDER, chain_id))
        .await
    }

    async fn build_swap_instruction(
        &self,
        chain_id: u64,
        request: &QuoteRequest,
    ) -> Result<ProviderInstruction, QuoteError> {
        async move {
            let quote = self.fetch_price_route(chain_id, request, false).await?;

            let url = endpoint(&self.config.base_url, &format!("transactions/{chain_id}"));
            let params = RequestParams::new().query("ignoreChecks", true);
            let body = Self::transaction_body(request, &quote.payload);
            let response = self
                .client
                .post(&url, &params, &body)
                .await
                .map_err(map_error)?;

            let instruction = transaction_instruction(PROVIDER, &response)?;
            debug!(
                to = %instruction.to,
                spender = %quote.allowance_target,
                "Built ParaSwap swap"
            );
            Ok(ProviderInstruction { instruction, quote })
        }
        .instrument(spans::build_swap_instruction(PROVIDER, chain_id))
        .await
    }
}

impl std::fmt::Debug for ParaSwapProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParaSwapProvider")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}
