//! Polars integration for mobility summaries
//!
//! Converts an assembled [`SummaryTable`](mobility_summary::SummaryTable)
//! into a Polars DataFrame through the [`SummaryFrameExt`] extension trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use chrono::Utc;
//! use mobility_polars::{SummaryDataFrameExt, SummaryFrameExt};
//! use mobility_summary::{summarize, SummaryConfig};
//!
//! let summary = summarize(&traj, &home, Utc, &SummaryConfig::daily(), None)?;
//! let df = summary.table.to_dataframe()?;
//! let observed = df.observed_windows()?;
//! ```

mod error;
mod traits;

pub use error::{Error, Result};
pub use traits::*;
