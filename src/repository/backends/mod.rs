pub mod sql;
mod register;

pub use register::DatabaseConfigs;
