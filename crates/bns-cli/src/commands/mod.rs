pub mod check;
pub mod find_ops;
pub mod price;
pub mod pubkey;
