//! State module for tracking a crawl session
//!
//! # Components
//!
//! - `EngineState`: Lifecycle of the crawl engine (idle, running, draining, closed)
//! - `VisitedRegistry`: Concurrent set of URLs already claimed by the session

mod engine_state;
mod visited;

// Re-export main types
pub use engine_state::EngineState;
pub use visited::VisitedRegistry;
