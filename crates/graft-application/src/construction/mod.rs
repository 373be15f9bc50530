//! Construction strategies
//!
//! Both strategies implement [`ConstructionStrategy`](graft_domain::ConstructionStrategy)
//! and are chosen once, at registration.
//!
//! | Strategy | Dependencies come from | Assembly |
//! |----------|------------------------|----------|
//! | [`Fields`] | explicit slot declarations | `T::default()` plus setters |
//! | [`Factory`] | constructor parameter types | constructor call |

pub mod factory;
pub mod fields;
pub mod inject;

pub use factory::{Cap, Constructor, Factory, Group, Grouped, Param, arg_slot};
pub use fields::Fields;
pub use inject::Inject;
