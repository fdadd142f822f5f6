//! Asset registry core: entities, relationship graph, mutation services, and
//! the REST adapter projecting them.
//!
//! The crate is organised hexagonally. `domain` holds the entities, the
//! relationship-maintenance graph, the driving and driven ports, and the
//! services implementing the mutation protocol. `inbound::http` adapts the
//! ports to actix-web; `outbound::persistence` provides the in-memory record
//! store. `server` wires configuration and application state.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by documentation tooling.
pub use doc::ApiDoc;
