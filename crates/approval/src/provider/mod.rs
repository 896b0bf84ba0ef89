mod client;

pub use self::client::{ProviderClient, ProviderClientConfig};
