// Infrastructure layer module
// Contains the SQLite store, the transaction wrapper and repository adapters

pub mod repositories;
pub mod store;
pub mod unit_of_work;

pub use store::Store;
pub use unit_of_work::UnitOfWork;
