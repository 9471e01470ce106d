//! `Breakwater` Core — service identities, error taxonomy, wire documents, and
//! client configuration shared by every management operation.

pub mod config;
pub mod document;
pub mod error;
pub mod service;

pub use config::ClientConfig;
pub use document::{Document, DocumentError};
pub use error::{ErrorKind, Signature, SignatureTable};
pub use service::ServiceType;

#[cfg(test)]
mod tests {
    #[test]
    fn crate_loads() {
        // Empty body: if this test runs, the crate compiles and loads.
    }
}
