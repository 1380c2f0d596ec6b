//! Chromosome decoding and route cost evaluation.
//!
//! - [`Route`] — One vehicle's decoded stop sequence with cached
//!   distance/time/cost and break/overtime/deadline pricing
//! - [`Routes`] — The full decoding of one chromosome, one route per
//!   vehicle, with aggregate metrics

mod route;
mod routes;

pub use route::Route;
pub use routes::Routes;
