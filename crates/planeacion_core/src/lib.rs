//! Planeación core — modality registry, moment resolution, the request
//! model, and the ambient plumbing (config, logging, errors) shared by the
//! document generator and the HTTP service.

pub mod config;
pub mod error;
pub mod logging;
pub mod moments;
pub mod payload;
pub mod registry;

pub use config::ServerConfig;
pub use error::PlanError;
pub use moments::{MatchTier, ResolvedMoment, resolve_moment};
pub use payload::{DevelopmentProcess, PlanRequest};
pub use registry::{Modality, ModalityRegistry, MomentSpec};
