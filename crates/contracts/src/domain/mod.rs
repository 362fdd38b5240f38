pub mod a001_client;
pub mod a002_product;
pub mod a003_package_type;
pub mod a004_gram_rule;
pub mod common;
