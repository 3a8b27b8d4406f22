mod contracts;
mod events;
mod headers;
mod providers;

pub use contracts::*;
pub use events::*;
pub use headers::*;
pub use providers::*;
