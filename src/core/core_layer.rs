// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "pings/mod.rs"]
pub mod pings;
