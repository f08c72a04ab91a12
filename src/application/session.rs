use crate::domain::ports::WalletProviderBox;
use crate::error::{BillPayError, Result};
use alloy_primitives::Address;
use tracing::{debug, info};

/// An authorized connection to the user's wallet.
///
/// Holds the provider for the lifetime of the run and the account every transaction is sent
/// from.
pub struct WalletSession {
    provider: WalletProviderBox,
    signer: Address,
}

impl WalletSession {
    /// Establishes the session.
    ///
    /// `None` means no wallet is installed in the host, which is terminal for the run. Otherwise
    /// asks for permission and takes the first listed account as signer. Nothing is retried.
    pub async fn connect(provider: Option<WalletProviderBox>) -> Result<Self> {
        let provider = provider.ok_or(BillPayError::WalletUnavailable)?;

        debug!("requesting wallet permission");
        provider.enable().await?;

        let signer = provider
            .accounts()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| BillPayError::WalletError("no accounts available".to_string()))?;

        info!(%signer, "wallet session established");
        Ok(Self { provider, signer })
    }

    /// The account selected at connection time.
    pub fn signer(&self) -> Address {
        self.signer
    }

    /// The injected provider, used to obtain contract handles.
    pub fn provider(&self) -> &WalletProviderBox {
        &self.provider
    }
}
