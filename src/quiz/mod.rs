pub mod bank;
pub mod definition;

pub use self::bank::{FetchError, QuestionBank};
pub use self::definition::Question;
