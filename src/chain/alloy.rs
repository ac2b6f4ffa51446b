//! [`ChainClient`] backed by alloy HTTP providers

use std::collections::HashMap;

use alloy_network::AnyNetwork;
use alloy_primitives::{Address, U256};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_client::ClientBuilder;
use async_trait::async_trait;
use tracing::{debug, info};

use super::ChainClient;
use crate::config::RelaySwapConfig;
use crate::contracts::IERC20;
use crate::errors::ChainError;
use crate::types::tokens::TokenDecimals;

/// Type alias for an HTTP provider using AnyNetwork
pub type AnyHttpProvider = alloy_provider::RootProvider<AnyNetwork>;

/// One provider per chain id
#[derive(Debug, Clone)]
pub struct AlloyChainClient<P> {
    providers: HashMap<u64, P>,
}

impl AlloyChainClient<AnyHttpProvider> {
    /// Connect to every chain in the configuration
    ///
    /// Connection is lazy; this only validates the endpoint URLs.
    pub fn from_config(config: &RelaySwapConfig) -> Result<Self, ChainError> {
        let mut providers = HashMap::new();
        for chain in config.chains.values() {
            let url: url::Url = chain
                .rpc_endpoint
                .parse()
                .map_err(|e| ChainError::ProviderUrlInvalid(format!("{e}")))?;

            let client = ClientBuilder::default().http(url);
            let provider = ProviderBuilder::new()
                .disable_recommended_fillers()
                .network::<AnyNetwork>()
                .connect_client(client);

            info!(chain_id = chain.chain_id, "Configured chain provider");
            providers.insert(chain.chain_id, provider);
        }
        Ok(Self { providers })
    }
}

impl<P> AlloyChainClient<P> {
    /// Use pre-built providers
    pub fn new(providers: HashMap<u64, P>) -> Self {
        Self { providers }
    }

    fn provider(&self, chain_id: u64) -> Result<&P, ChainError> {
        self.providers
            .get(&chain_id)
            .ok_or(ChainError::UnknownChain(chain_id))
    }
}

#[async_trait]
impl<P> ChainClient for AlloyChainClient<P>
where
    P: Provider<AnyNetwork> + Clone + Send + Sync + 'static,
{
    async fn allowance(
        &self,
        chain_id: u64,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, ChainError> {
        let contract = IERC20::new(token, self.provider(chain_id)?.clone());
        let allowance = contract
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|e| ChainError::allowance_query_failed(token, owner, spender, e))?;

        debug!(chain_id, ?token, ?owner, ?spender, %allowance, "Read allowance");
        Ok(allowance)
    }

    async fn token_decimals(
        &self,
        chain_id: u64,
        token: Address,
    ) -> Result<TokenDecimals, ChainError> {
        let contract = IERC20::new(token, self.provider(chain_id)?.clone());
        let decimals = contract
            .decimals()
            .call()
            .await
            .map_err(|e| ChainError::decimals_query_failed(token, e))?;

        debug!(chain_id, ?token, decimals, "Read token decimals");
        Ok(TokenDecimals::new(decimals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChainConfig, RelaySwapConfigBuilder};

    #[test]
    fn test_from_config_rejects_invalid_url() {
        let config = RelaySwapConfigBuilder::new()
            .chain(ChainConfig {
                chain_id: 56,
                rpc_endpoint: "not a url".to_string(),
                bridge_contract: Address::ZERO,
                wrapped_native: Address::ZERO,
                gas_price_override_gwei: None,
            })
            .build();

        let result = AlloyChainClient::from_config(&config);
        assert!(matches!(result, Err(ChainError::ProviderUrlInvalid(_))));
    }

    #[tokio::test]
    async fn test_unknown_chain() {
        let config = RelaySwapConfig::default();
        let client = AlloyChainClient::from_config(&config).unwrap();

        let result = client.token_decimals(10, Address::ZERO).await;
        assert!(matches!(result, Err(ChainError::UnknownChain(10))));
    }
}
