// Configuration
pub mod config;

// Error taxonomy
pub mod error;

// Entity and update-envelope data model
pub mod entity;
pub mod update;

// Source channels, merger, broadcaster, handler registry
pub mod pipeline;

pub use config::MuxConfig;
pub use entity::{Endpoints, Named, Service};
pub use error::MuxError;
pub use pipeline::{Handler, Pipeline};
pub use update::{Operation, Update};

/// A pipeline merging `Service` updates from one or more named sources.
pub type ServicePipeline = Pipeline<Service>;

/// A pipeline merging `Endpoints` updates from one or more named sources.
pub type EndpointsPipeline = Pipeline<Endpoints>;
