//! Server platform extension points.
//!
//! # Toyota Way: Standardized Work (標準作業)
//! The host persistence runtime drives every platform through the same
//! contract, whatever supplies the services behind it.

use std::sync::Arc;

use enlace_core::{ManagementEndpoint, Task};

use crate::error::Result;
use crate::transaction::TransactionController;
use crate::types::SessionId;

/// How the host looks up its data-source connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorLookup {
    /// No naming-service lookup; connections come from elsewhere.
    Undefined,
    /// Connections are looked up by name in a naming service.
    NamingService,
}

/// Extension points the host persistence runtime calls into.
///
/// Every method that reports a missing service does so with `false` or
/// `None`; the host then uses its own default.
pub trait ServerPlatform: Send + Sync {
    /// Returns the session this platform was created for.
    fn session_id(&self) -> SessionId;

    /// Returns true while the session participates in distributed transactions.
    fn is_transactions_enabled(&self) -> bool;

    /// Stops distributed-transaction participation for the platform's lifetime.
    fn disable_transactions(&self);

    /// Returns the controller the host uses to reach the transaction
    /// coordinator, or `None` once transactions are disabled.
    fn external_transaction_controller(&self) -> Option<TransactionController>;

    /// Returns true if runtime management services should be switched on.
    ///
    /// # Errors
    /// Returns an error if the answer could not be determined because of a
    /// broken deployment.
    fn is_management_enabled(&self) -> Result<bool>;

    /// Returns the endpoint runtime services register with.
    fn management_endpoint(&self) -> Option<Arc<dyn ManagementEndpoint>>;

    /// Runs `task` asynchronously.
    ///
    /// # Errors
    /// Returns an error if the task could not be started.
    fn submit(&self, task: Task) -> Result<()>;

    /// Returns how the host should look up its connector.
    fn connector_lookup(&self) -> ConnectorLookup {
        ConnectorLookup::NamingService
    }
}
