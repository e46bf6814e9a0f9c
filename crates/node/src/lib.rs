//! # Pinecone Assistant Node
//!
//! The workflow node itself: its operation catalog, the router that runs
//! the selected action over every input item, and the dynamic option
//! lists the node form loads.
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use pinecone_assistant_config::AppConfig;
//! use pinecone_assistant_core::{NodeItem, StaticParameters};
//! use pinecone_assistant_node::AssistantNode;
//! use serde_json::json;
//!
//! let node = AssistantNode::from_config(&AppConfig::load()?)?;
//! let params = StaticParameters(json!({
//!     "resource": "assistant",
//!     "operation": "listAssistants",
//! }));
//! let output = node.execute(&[NodeItem::default()], &params, false).await?;
//! # let _ = output;
//! # Ok(())
//! # }
//! ```

pub mod description;
pub mod load_options;
pub mod router;

pub use description::NodeDescription;
pub use load_options::{OptionEntry, get_assistants};
pub use router::AssistantNode;
