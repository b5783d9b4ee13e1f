//! Main REST client implementation

use coindcx_auth::{Credentials, RequestParams};
use coindcx_types::ApiResult;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::{ClientConfig, DEFAULT_USER_AGENT};
use crate::endpoints::{AccountEndpoints, BaseUrl, Endpoint, MarketEndpoints};
use crate::error::RestResult;
use crate::normalizer::{normalize, request_failure, transport_failure};
use crate::request::RequestBuilder;
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::CandleInterval;

/// CoinDCX REST API client
///
/// Provides access to both public and private endpoints. Every call returns
/// an [`ApiResult`]; failures are reported as data, never as panics.
///
/// # Credentials
///
/// Credentials can be replaced at any time with [`set_credentials`]. Each
/// call takes a snapshot of the credentials when it starts, so a
/// replacement only affects calls started afterwards.
///
/// [`set_credentials`]: CoinDcxClient::set_credentials
///
/// # Example
///
/// ```no_run
/// use coindcx_rest::{CoinDcxClient, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = CoinDcxClient::new()?;
///     let ticker = client.ticker().await?;
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = CoinDcxClient::with_credentials(creds)?;
///     let balances = auth_client.balances().await?;
///
///     Ok(())
/// }
/// ```
pub struct CoinDcxClient<T = ReqwestTransport> {
    transport: T,
    api_url: String,
    public_url: String,
    credentials: RwLock<Option<Arc<Credentials>>>,
}

impl CoinDcxClient<ReqwestTransport> {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client configured from the environment
    pub fn from_env() -> RestResult<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::default().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let transport = ReqwestTransport::new(
            Duration::from_secs(config.timeout_secs),
            config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT),
        )?;

        Self::with_transport(config, transport)
    }
}

impl<T: HttpTransport> CoinDcxClient<T> {
    /// Create a new client on top of a custom transport
    pub fn with_transport(config: ClientConfig, transport: T) -> RestResult<Self> {
        config.validate()?;

        info!(
            api_url = %config.api_url,
            public_url = %config.public_url,
            has_credentials = config.credentials.is_some(),
            "Created CoinDCX REST client"
        );

        Ok(Self {
            transport,
            api_url: config.api_url,
            public_url: config.public_url,
            credentials: RwLock::new(config.credentials.map(Arc::new)),
        })
    }

    /// Replace the credentials used for private endpoints
    pub fn set_credentials(&self, credentials: Credentials) {
        *self.credentials.write() = Some(Arc::new(credentials));
        debug!("Credentials updated");
    }

    /// Remove credentials; private endpoints will fail until new ones are set
    pub fn clear_credentials(&self) {
        *self.credentials.write() = None;
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.read().is_some()
    }

    /// Snapshot of the current credentials
    pub fn credentials(&self) -> Option<Arc<Credentials>> {
        self.credentials.read().clone()
    }

    /// General API root
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Public market-data root
    pub fn public_url(&self) -> &str {
        &self.public_url
    }

    /// Root URL for an endpoint class
    pub fn base_url(&self, base: BaseUrl) -> &str {
        match base {
            BaseUrl::Api => &self.api_url,
            BaseUrl::Public => &self.public_url,
        }
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build, sign (if private), send and normalize one call
    #[instrument(skip_all, fields(path = endpoint.path))]
    pub async fn execute(&self, endpoint: &Endpoint, params: RequestParams) -> ApiResult {
        let credentials = self.credentials();
        let builder = RequestBuilder::new(&self.api_url, &self.public_url);

        let request = match builder.build(endpoint, params, credentials.as_deref()) {
            Ok(request) => request,
            Err(e) => {
                let failure = request_failure(&e);
                warn!(error = %e, kind = %failure.kind, "Could not build request");
                return Err(failure);
            }
        };

        let base_url = request.base_url.clone();
        debug!(method = %request.method, url = %request.url, "Sending request");

        match self.transport.send(request.into_http()).await {
            Ok(response) => normalize(&response),
            Err(error) => Err(transport_failure(&error, &base_url)),
        }
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_, T> {
        MarketEndpoints::new(self)
    }

    /// Get tickers for every market
    pub async fn ticker(&self) -> ApiResult {
        self.market().ticker().await
    }

    /// Get the list of market symbols
    pub async fn markets(&self) -> ApiResult {
        self.market().markets().await
    }

    /// Get trading rules for every market
    pub async fn markets_details(&self) -> ApiResult {
        self.market().markets_details().await
    }

    /// Get the most recent public trades (default limit 30)
    pub async fn market_trades(&self, pair: &str, limit: Option<u16>) -> ApiResult {
        self.market().market_trades(pair, limit).await
    }

    /// Get bids and asks for a pair
    pub async fn order_book(&self, pair: &str) -> ApiResult {
        self.market().order_book(pair).await
    }

    /// Get candles for a pair (default interval 5m)
    pub async fn candles(
        &self,
        pair: &str,
        interval: Option<CandleInterval>,
        start_time: Option<u64>,
        end_time: Option<u64>,
    ) -> ApiResult {
        self.market()
            .candles(pair, interval, start_time, end_time)
            .await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints
    pub fn account(&self) -> AccountEndpoints<'_, T> {
        AccountEndpoints::new(self)
    }

    /// Get account profile information
    pub async fn account_info(&self) -> ApiResult {
        self.account().account_info().await
    }

    /// Get balances for every currency
    pub async fn balances(&self) -> ApiResult {
        self.account().balances().await
    }

    /// Get the account trade history
    pub async fn trade_history(&self) -> ApiResult {
        self.account().trade_history().await
    }

    /// Get currently open orders
    pub async fn active_orders(&self) -> ApiResult {
        self.account().active_orders().await
    }
}

impl<T> std::fmt::Debug for CoinDcxClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinDcxClient")
            .field("api_url", &self.api_url)
            .field("public_url", &self.public_url)
            .field("has_credentials", &self.credentials.read().is_some())
            .finish()
    }
}
