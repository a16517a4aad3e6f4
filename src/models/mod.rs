// Stock domain
pub mod group_item;
pub mod item;
pub mod item_group;
pub mod transaction;
pub mod transfer_order;
pub mod warehouse;

// Accounting and identity
pub mod account;
pub mod category;
pub mod company;
pub mod user;

pub use transaction::TransactionKind;
