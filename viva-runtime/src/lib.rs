pub mod builder;
pub mod mock;
pub mod remote;
