pub mod accounts;
pub mod categories;
pub mod companies;
pub mod groups;
pub mod history;
pub mod items;
pub mod transfers;
pub mod users;
pub mod warehouses;
