//! Building blocks shared by all agendas

mod action_type;
mod parameter;

pub use action_type::{ActionType, ACTION_TYPES};
pub use parameter::{Parameter, PARAMETER_TYPES};
