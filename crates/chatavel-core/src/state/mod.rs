pub mod dispatch;
pub mod events;
pub mod store;
pub mod types;

pub use dispatch::dispatch_infallible;
pub use events::Event;
pub use store::Store;
pub use types::Command;
