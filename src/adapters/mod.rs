// Adapters layer: concrete question stores.

pub mod memory;
pub mod toml_bank;

pub use memory::InMemoryQuestionsDao;
pub use toml_bank::{load_bank_file, load_bank_str};
