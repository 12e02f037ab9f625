pub mod api_client;
pub mod errors;

pub use api_client::ApiClient;
pub use errors::{ClientError, ClientResult};
