pub mod category;
pub mod settings;
pub mod transaction;

pub use category::{Category, NewCategory, DEFAULT_CATEGORIES, OTHER_CATEGORY};
pub use settings::Settings;
pub use transaction::{NewTransaction, Transaction, TransactionType};
