mod account;
mod network;
mod path;
mod payment;

pub use account::AccountInfo;
pub use network::ConnectionStatus;
pub use network::NetworkInfo;
pub use path::PathHop;
pub use path::PathOption;
pub use payment::PaymentRequest;
pub use payment::PaymentSubmissionResult;
pub use payment::TransactionJson;
