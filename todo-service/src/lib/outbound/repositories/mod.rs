pub mod account;
pub mod todo;

pub use account::PostgresAccountRepository;
pub use todo::PostgresTodoRepository;
