mod util;
mod types;
mod envelope;
mod terms;
mod resolve;

pub use types::{ResolveDebug, ResolveOutcome, ShuttleInput};
pub use envelope::max_velocity;
pub use resolve::{resolve_vehicle, resolve_vehicle_dbg};
