//! Private account endpoints
//!
//! These endpoints require authentication. Calling them on a client without
//! credentials yields an `InvalidCredentials` failure without any network
//! traffic.

use coindcx_auth::RequestParams;
use coindcx_types::ApiResult;
use tracing::instrument;

use super::{ACCOUNT_INFO, ACTIVE_ORDERS, BALANCES, TRADE_HISTORY};
use crate::client::CoinDcxClient;
use crate::transport::HttpTransport;

/// Private account endpoints
pub struct AccountEndpoints<'a, T> {
    client: &'a CoinDcxClient<T>,
}

impl<'a, T: HttpTransport> AccountEndpoints<'a, T> {
    pub fn new(client: &'a CoinDcxClient<T>) -> Self {
        Self { client }
    }

    /// Get account profile information
    #[instrument(skip(self))]
    pub async fn account_info(&self) -> ApiResult {
        self.client.execute(&ACCOUNT_INFO, RequestParams::new()).await
    }

    /// Get balances for every currency
    #[instrument(skip(self))]
    pub async fn balances(&self) -> ApiResult {
        self.client.execute(&BALANCES, RequestParams::new()).await
    }

    /// Get the account trade history
    #[instrument(skip(self))]
    pub async fn trade_history(&self) -> ApiResult {
        self.client.execute(&TRADE_HISTORY, RequestParams::new()).await
    }

    /// Get currently open orders
    #[instrument(skip(self))]
    pub async fn active_orders(&self) -> ApiResult {
        self.client.execute(&ACTIVE_ORDERS, RequestParams::new()).await
    }
}
