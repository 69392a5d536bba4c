//! Oracle-query lowering pass: parser, query model, and AST rewriter.
//!
//! This crate provides the lowering pipeline that turns embedded
//! `oracleQuery(...)` call markers into concrete outbound dispatch and a
//! unified result callback:
//! - `query` - the `OracleKind`/`Query` model recognized calls are turned into
//! - `recognize` - the AST walker that locates and validates `oracleQuery` calls
//! - `synth` - the three rewrite stages (environment, container, callback)
//! - `driver` - sequences the stages per contract
//! - `diagnostics` - informational/warning messages collected while running
//! - `config` - compile-time constants and toggles threaded through the pass

pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod query;
pub mod recognize;
pub mod synth;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod recognize_tests;

pub use config::PassConfig;
pub use diagnostics::{Diagnostics, Severity};
pub use driver::Driver;
pub use query::{OracleKind, Query, QueryPayload};
pub use recognize::RecognitionError;

/// Result type for the lowering pass.
///
/// A successful run always carries the diagnostics collected along the way,
/// mirroring the distinction between "the pass itself failed" (the outer
/// `Result`) and "the pass ran and has something to report" (`Diagnostics`).
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

/// Result type for individual fallible operations inside the pass.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can abort the lowering pass.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Recognition(#[from] RecognitionError),

    #[error("query kind {0:?} is recognized but not yet lowered")]
    NotImplemented(OracleKind),
}
