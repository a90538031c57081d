pub mod label;
pub mod matcher;

pub use label::{builtin_label, label, label_in, LabelLocale};
pub use matcher::{classify, StatusClassifier};
