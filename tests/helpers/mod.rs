// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for relayswap integration tests
//!
//! Provides mock implementations of the quote provider, chain client and
//! network client traits so orchestration can be tested without aggregator
//! APIs or chain nodes.

#![allow(dead_code)]

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use alloy_primitives::{address, Address, Bytes, U256};
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use relayswap::config::constants::{hub_bridge, wrapped_native};
use relayswap::quote::{ProviderInstruction, Quote, QuoteRequest, SwapAmount, SwapQuoteProvider};
use relayswap::transport::{NetworkClient, RequestParams, TransportError};
use relayswap::{
    ChainClient, ChainConfig, ChainError, Instruction, QuoteError, RelayRewardParams,
    RelaySwapConfig, RelaySwapConfigBuilder, TokenDecimals,
};
use serde_json::Value;

/// BNB Smart Chain
pub const BSC: u64 = 56;

/// USDT on BNB Smart Chain (18 decimals)
pub const USDT: Address = address!("55d398326f99059ff775485246999027b3197955");

/// BUSD on BNB Smart Chain (18 decimals)
pub const BUSD: Address = address!("e9e7cea3dedca5984780bafc599bd69add087d56");

pub const WBNB: Address = wrapped_native::BSC_WBNB;

pub const BRIDGE: Address = hub_bridge::BSC_HUB_BRIDGE;

pub const WALLET: Address = address!("1111111111111111111111111111111111111111");

pub const RECEIVER: Address = address!("2222222222222222222222222222222222222222");

pub const BROADCASTER: Address = address!("3333333333333333333333333333333333333333");

/// Aggregator router the mock provider builds swaps against
pub const ROUTER: Address = address!("def1c0ded9bec7f1a1670819833240f027b25eff");

/// Spender the mock provider asks approvals for
pub const SPENDER: Address = address!("216b4b4ba9f3e719726886d34a177484278bfcae");

/// `approve(address,uint256)`
pub const APPROVE_SELECTOR: [u8; 4] = [0x09, 0x5e, 0xa7, 0xb3];

/// `transfer(address,uint256)`
pub const TRANSFER_SELECTOR: [u8; 4] = [0xa9, 0x05, 0x9c, 0xbb];

/// `withdraw(uint256)`
pub const WITHDRAW_SELECTOR: [u8; 4] = [0x2e, 0x1a, 0x7d, 0x4d];

/// Calldata the mock provider puts in built swaps
pub const SWAP_CALLDATA: [u8; 4] = [0xd9, 0x62, 0x7a, 0xa4];

/// Config with only BNB Smart Chain and a known broadcaster
///
/// BSC keeps its fixed 5 gwei gas price.
pub fn bsc_config() -> RelaySwapConfig {
    RelaySwapConfigBuilder::new()
        .chain(ChainConfig {
            chain_id: BSC,
            rpc_endpoint: "http://localhost:8545".to_string(),
            bridge_contract: BRIDGE,
            wrapped_native: WBNB,
            gas_price_override_gwei: Some(BigDecimal::from(5)),
        })
        .broadcaster(BROADCASTER)
        .build()
}

/// Relay inputs for the test wallet on BSC
pub fn relay_params(gas_token: Address, complexity: u64, wallet_exists: bool) -> RelayRewardParams {
    RelayRewardParams {
        chain_id: BSC,
        gas_price_gwei: BigDecimal::from(5),
        gas_token,
        gas_token_decimals: TokenDecimals::STANDARD,
        complexity,
        wallet_exists,
        wallet: WALLET,
    }
}

pub fn decimal(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).unwrap()
}

/// `value × 10^18`
pub fn ether(value: &str) -> U256 {
    relayswap::to_minimal_units(value, TokenDecimals::STANDARD).unwrap()
}

/// Mock SwapQuoteProvider quoting at a fixed rate
///
/// `buy = sell × numerator / denominator` for exact input, and the inverse
/// (rounded down) for exact output. Every request is recorded.
///
/// # Example
///
/// ```rust,ignore
/// // 1 USDT buys 0.0025 BNB
/// let provider = Arc::new(MockQuoteProvider::new().with_rate(1, 400));
/// let estimator = RelayRewardEstimator::new(&config, provider.clone(), chain);
/// estimator.estimate(&params).await?;
/// assert_eq!(provider.price_calls(), 1);
/// ```
pub struct MockQuoteProvider {
    numerator: u64,
    denominator: u64,
    supports_receiver: bool,
    failure: Option<QuoteError>,
    delays: Mutex<Vec<Duration>>,
    price_calls: AtomicUsize,
    build_calls: AtomicUsize,
    requests: Mutex<Vec<QuoteRequest>>,
}

impl Default for MockQuoteProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockQuoteProvider {
    /// One-to-one rate, no receiver support
    pub fn new() -> Self {
        Self {
            numerator: 1,
            denominator: 1,
            supports_receiver: false,
            failure: None,
            delays: Mutex::new(Vec::new()),
            price_calls: AtomicUsize::new(0),
            build_calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_rate(mut self, numerator: u64, denominator: u64) -> Self {
        self.numerator = numerator;
        self.denominator = denominator;
        self
    }

    pub fn with_receiver_support(mut self) -> Self {
        self.supports_receiver = true;
        self
    }

    /// Fail every price and build call with `error`
    pub fn failing(mut self, error: QuoteError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Sleep before answering; the n-th call takes the n-th delay
    pub fn with_delays(self, delays: Vec<Duration>) -> Self {
        *self.delays.lock().unwrap() = delays.into_iter().rev().collect();
        self
    }

    pub fn price_calls(&self) -> usize {
        self.price_calls.load(Ordering::SeqCst)
    }

    pub fn build_calls(&self) -> usize {
        self.build_calls.load(Ordering::SeqCst)
    }

    /// All requests seen so far, price and build alike
    pub fn requests(&self) -> Vec<QuoteRequest> {
        self.requests.lock().unwrap().clone()
    }

    async fn answer(&self, request: &QuoteRequest) -> Result<Quote, QuoteError> {
        self.requests.lock().unwrap().push(request.clone());
        let delay = self.delays.lock().unwrap().pop();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let numerator = U256::from(self.numerator);
        let denominator = U256::from(self.denominator);
        let (sell_amount, buy_amount) = match request.amount {
            SwapAmount::Sell(sell) => (sell, sell * numerator / denominator),
            SwapAmount::Buy(buy) => (buy * denominator / numerator, buy),
        };
        Ok(Quote::new(sell_amount, buy_amount, SPENDER, Value::Null))
    }
}

#[async_trait]
impl SwapQuoteProvider for MockQuoteProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn supports_receiver(&self) -> bool {
        self.supports_receiver
    }

    async fn get_price(&self, _chain_id: u64, request: &QuoteRequest) -> Result<Quote, QuoteError> {
        self.price_calls.fetch_add(1, Ordering::SeqCst);
        self.answer(request).await
    }

    async fn build_swap_instruction(
        &self,
        _chain_id: u64,
        request: &QuoteRequest,
    ) -> Result<ProviderInstruction, QuoteError> {
        self.build_calls.fetch_add(1, Ordering::SeqCst);
        let quote = self.answer(request).await?;
        Ok(ProviderInstruction {
            instruction: Instruction::call(ROUTER, Bytes::from(SWAP_CALLDATA.to_vec())),
            quote,
        })
    }
}

/// Mock ChainClient backed by in-memory allowances and decimals
///
/// Unknown allowances are zero; unknown decimals are 18.
#[derive(Default)]
pub struct MockChainClient {
    allowances: HashMap<(Address, Address), U256>,
    decimals: HashMap<Address, u8>,
    fail_allowance: bool,
    allowance_calls: AtomicUsize,
}

impl MockChainClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allowance of `token` granted by the wallet to `spender`
    pub fn with_allowance(mut self, token: Address, spender: Address, amount: U256) -> Self {
        self.allowances.insert((token, spender), amount);
        self
    }

    pub fn with_decimals(mut self, token: Address, decimals: u8) -> Self {
        self.decimals.insert(token, decimals);
        self
    }

    pub fn failing_allowance(mut self) -> Self {
        self.fail_allowance = true;
        self
    }

    pub fn allowance_calls(&self) -> usize {
        self.allowance_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn allowance(
        &self,
        _chain_id: u64,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, ChainError> {
        self.allowance_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_allowance {
            return Err(ChainError::allowance_query_failed(
                token,
                owner,
                spender,
                std::io::Error::new(std::io::ErrorKind::TimedOut, "node timed out"),
            ));
        }
        Ok(self
            .allowances
            .get(&(token, spender))
            .copied()
            .unwrap_or(U256::ZERO))
    }

    async fn token_decimals(
        &self,
        _chain_id: u64,
        token: Address,
    ) -> Result<TokenDecimals, ChainError> {
        Ok(TokenDecimals::new(
            self.decimals.get(&token).copied().unwrap_or(18),
        ))
    }
}

/// A request seen by [`MockNetworkClient`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub params: RequestParams,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn query(&self, key: &str) -> Option<&str> {
        self.params
            .query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.params
            .headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Mock NetworkClient returning canned JSON per URL
///
/// URLs without a canned response fail with a 404.
#[derive(Default)]
pub struct MockNetworkClient {
    responses: Mutex<HashMap<String, Result<Value, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockNetworkClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, url: &str, body: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Ok(body));
        self
    }

    pub fn fail(self, url: &str, status: u16, body: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Err(TransportError::status(status, Some(body))));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url == url)
            .count()
    }

    fn answer(
        &self,
        method: &'static str,
        url: &str,
        params: &RequestParams,
        body: Option<Value>,
    ) -> Result<Value, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.to_string(),
            params: params.clone(),
            body,
        });
        self.responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(TransportError::status(404, None)))
    }
}

#[async_trait]
impl NetworkClient for MockNetworkClient {
    async fn get(&self, url: &str, params: &RequestParams) -> Result<Value, TransportError> {
        self.answer("GET", url, params, None)
    }

    async fn post(
        &self,
        url: &str,
        params: &RequestParams,
        body: &Value,
    ) -> Result<Value, TransportError> {
        self.answer("POST", url, params, Some(body.clone()))
    }
}

/// Install a test subscriber so `RUST_LOG`-style output shows up with
/// `--nocapture`. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
