//! Built-in validators for common validation scenarios

pub mod custom;
pub mod email;
pub mod length;
pub mod required;

pub use custom::CustomValidator;
pub use email::EmailValidator;
pub use length::LengthValidator;
pub use required::RequiredValidator;
