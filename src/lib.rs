pub mod cmd;
pub mod config;
pub mod error;
pub mod mutator;
pub mod outcome;
pub mod resolver;
pub mod server;
pub mod shopify;
pub mod types;
pub mod workflow;

pub use config::Config;
pub use error::{LostFoundError, Result};
pub use outcome::Outcome;
pub use server::{AppState, create_router};
pub use types::{FieldError, Handle, LostStatus, RecordReference, StatusFieldSet};
pub use workflow::StatusWorkflow;
