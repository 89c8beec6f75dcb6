//! Guard chain evaluated before file handlers.

pub mod chain;
pub mod guards;
pub mod outcome;
pub mod subject;

pub use chain::GuardChain;
pub use guards::{ContributorOrPublic, Guard, NotRegistration, RequireSession, WriteContributor};
pub use outcome::{AuthorizationOutcome, Denial, DenialKind};
pub use subject::Subject;
