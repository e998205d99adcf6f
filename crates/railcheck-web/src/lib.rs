//! # Railcheck Web
//!
//! HTTP surface for railcheck: the JSON check endpoint, a health probe and
//! the embedded status page.
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /` | Status page |
//! | `GET /api/check?coin=<ticker>` | [`AggregateReport`](railcheck_core::AggregateReport) JSON |
//! | `GET /health` | Liveness and configured exchanges |

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, serve};
pub use state::AppState;
