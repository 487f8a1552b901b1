pub mod jwt;
pub mod storage;
pub mod validate;
