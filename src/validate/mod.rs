//! Word validation: the acceptance rules and the lookup-failure policy.

pub mod policy;
pub mod rules;

pub use policy::LookupPolicy;
pub use rules::{feasible, normalize, precheck, Rejection, MIN_WORD_LEN};
