pub mod policy;
pub mod validator;
