//! Domain model (members, tasks, risks, changes, events, plan files, ...).

pub mod change;
pub mod errors;
pub mod events;
pub mod ids;
pub mod member;
pub mod risk;
pub mod spec;
pub mod state;
pub mod task;

pub use self::change::Change;
pub use self::errors::{PlanError, PlanResult};
pub use self::events::ProjectEvent;
pub use self::ids::TaskId;
pub use self::member::{Member, Team};
pub use self::risk::{Milestone, Risk};
pub use self::spec::PlanSpec;
pub use self::state::TaskStatus;
pub use self::task::{Task, TaskBuilder, TaskRef};
