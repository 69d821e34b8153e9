// Discord ping adapters - gateway event handling and log formatting.

pub mod events;
pub mod formatter;
