//! # osf-auth
//!
//! Authorization for project file operations. Each request builds a
//! [`Subject`](guard::Subject), and a [`GuardChain`](guard::GuardChain)
//! evaluates it against the target project before the handler runs,
//! yielding a structured [`AuthorizationOutcome`](guard::AuthorizationOutcome).
//!
//! Authentication itself is delegated to the fronting proxy; this crate only
//! consumes the identity it forwards.

pub mod guard;

pub use guard::{AuthorizationOutcome, Denial, DenialKind, Guard, GuardChain, Subject};
