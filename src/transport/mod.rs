pub mod http;
pub mod traits;

#[cfg(test)]
pub(crate) mod mock;

pub use http::HttpTransport;
pub use traits::DeviceTransport;
