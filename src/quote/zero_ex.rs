//! 0x swap API provider
//!
//! Talks to `swap/v1/price` for indicative quotes and `swap/v1/quote` for
//! executable swaps. Request-for-quote liquidity from 0x's own market makers
//! is excluded: RFQ orders can expire during smart-wallet signing.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn, Instrument};

use super::{
    address_field, amount_field, request_failed, transaction_instruction, ProviderInstruction,
    Quote, QuoteRequest, SwapAmount, SwapQuoteProvider,
};
use crate::config::ZeroExConfig;
use crate::errors::QuoteError;
use crate::spans;
use crate::transport::{endpoint, NetworkClient, RequestParams, ResponseCache, TransportError};
use crate::types::tokens::normalize_native;

const PROVIDER: &str = "0x";

/// Liquidity source names excluded from routing
const EXCLUDED_SOURCES: &str = "0x";

/// `validationErrors[].reason` reported when no route is deep enough
const INSUFFICIENT_LIQUIDITY_REASON: &str = "INSUFFICIENT_ASSET_LIQUIDITY";

/// 0x aggregator
#[derive(Clone)]
pub struct ZeroExProvider {
    client: Arc<dyn NetworkClient>,
    config: ZeroExConfig,
    price_cache: Arc<ResponseCache>,
}

impl ZeroExProvider {
    pub fn new(client: Arc<dyn NetworkClient>, config: ZeroExConfig) -> Self {
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

    fn base_url(&self, chain_id: u64) -> Result<&str, QuoteError> {
        self.config
            .base_urls
            .get(&chain_id)
            .map(String::as_str)
            .ok_or(QuoteError::UnsupportedChain {
                provider: PROVIDER,
                chain_id,
            })
    }

    fn params(&self, request: &QuoteRequest) -> RequestParams {
        let (amount_key, amount) = match request.amount {
            SwapAmount::Sell(amount) => ("sellAmount", amount),
            SwapAmount::Buy(amount) => ("buyAmount", amount),
        };

        let params = RequestParams::new()
            .query("sellToken", normalize_native(request.sell_token))
            .query("buyToken", normalize_native(request.buy_token))
            .query(amount_key, amount)
            .query("slippagePercentage", request.slippage.to_fraction_string())
            .query("takerAddress", request.taker)
            .query("excludedSources", EXCLUDED_SOURCES);

        match &self.config.api_key {
            Some(key) => params.header("0x-api-key", key.as_str()),
            None => params,
        }
    }

    fn parse_quote(body: Value) -> Result<Quote, QuoteError> {
        let sell_amount = amount_field(PROVIDER, &body, "sellAmount")?;
        let buy_amount = amount_field(PROVIDER, &body, "buyAmount")?;
        // Price responses may omit the spender; it is only needed when building
        let allowance_target = match body.get("allowanceTarget") {
            Some(Value::String(_)) => address_field(PROVIDER, &body, "allowanceTarget")?,
            _ => Default::default(),
        };
        Ok(Quote::new(sell_amount, buy_amount, allowance_target, body))
    }
}

/// Classify a failed 0x request
fn map_error(error: TransportError) -> QuoteError {
    let reason = error
        .body
        .as_ref()
        .and_then(|body| body.pointer("/validationErrors/0/reason"))
        .and_then(Value::as_str);

    if reason == Some(INSUFFICIENT_LIQUIDITY_REASON) {
        return QuoteError::InsufficientLiquidity {
            provider: PROVIDER,
            message: "no liquidity pools with it or too low liquidity".to_string(),
        };
    }

    warn!(status = ?error.status, error = %error, "0x request failed");
    request_failed(PROVIDER, &error)
}

#[async_trait]
impl SwapQuoteProvider for ZeroExProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn supports_receiver(&self) -> bool {
        false
    }

    async fn get_price(&self, chain_id: u64, request: &QuoteRequest) -> Result<Quote, QuoteError> {
        async move {
            let url = endpoint(self.base_url(chain_id)?, "swap/v1/price");
            let body = self
                .price_cache
                .get_or_fetch(self.client.as_ref(), &url, &self.params(request))
                .await
                .map_err(map_error)?;

            let quote = Self::parse_quote(body)?;
            debug!(
                sell_amount = %quote.sell_amount,
                buy_amount = %quote.buy_amount,
                "Received 0x price"
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
            let url = endpoint(self.base_url(chain_id)?, "swap/v1/quote");
            let body = self
                .client
                .get(&url, &self.params(request))
                .await
                .map_err(map_error)?;

            let instruction = transaction_instruction(PROVIDER, &body)?;
            let quote = Self::parse_quote(body)?;
            debug!(
                to = %instruction.to,
                spender = %quote.allowance_target,
                "Built 0x swap"
            );
            Ok(ProviderInstruction { instruction, quote })
        }
        .instrument(spans::build_swap_instruction(PROVIDER, chain_id))
        .await
    }
}

impl std::fmt::Debug for ZeroExProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZeroExProvider")
            .field("base_urls", &self.config.base_urls)
            .finish_non_exhaustive()
    }
}
