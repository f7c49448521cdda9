//! prisma-repository-generator
//!
//! A Prisma generator plugin that writes one TypeScript repository class per
//! model, with CRUD methods and relation getters backed by the generated
//! Prisma client.

pub mod dmmf;
mod error;
pub mod generator;
pub mod options;
pub mod repository;
pub mod rpc;
pub mod typescript;

pub use error::GeneratorError;
pub use generator::{GenerationSummary, generate, generate_models};
