//! # Pinecone Assistant Core
//!
//! Domain types, traits, and error definitions for the Pinecone Assistant
//! workflow node. This crate has **no HTTP dependencies**; it defines the
//! domain model that the client, action, and node crates implement against.
//!
//! ## Design Philosophy
//!
//! Every host capability the node consumes is a trait here:
//! - [`Transport`]: the host's authenticated HTTP call
//! - [`ParameterSource`]: the host's per-item parameter resolution
//!
//! Implementations live in their respective crates, so tests can swap in
//! scripted stand-ins without touching the network.

pub mod assistant;
pub mod error;
pub mod filter;
pub mod item;
pub mod operation;
pub mod params;
pub mod request;
pub mod transport;

// Re-export key types at crate root for ergonomics
pub use assistant::AssistantRef;
pub use error::{ActionError, NodeError, TransportError};
pub use filter::{MetadataEntry, MetadataFilter, MetadataValues};
pub use item::{BinaryData, NodeItem, json_array};
pub use operation::{Operation, Resource};
pub use params::{ParameterSource, PerItemParameters, StaticParameters};
pub use request::{ApiRequest, DispatchedRequest, FilePart, HttpMethod, RequestBody};
pub use transport::Transport;
