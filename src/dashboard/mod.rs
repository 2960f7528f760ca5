pub mod layout;
pub mod snapshot;
