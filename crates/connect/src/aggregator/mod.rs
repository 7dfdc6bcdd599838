pub(crate) mod models;
mod service;
mod traits;

pub use models::*;
pub use service::{AuthenticationService, InvestmentsService};
pub use traits::*;
