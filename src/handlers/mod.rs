pub mod accounts;
pub mod categories;
pub mod common;
pub mod companies;
pub mod groups;
pub mod history;
pub mod items;
pub mod transfers;
pub mod users;
pub mod warehouses;

use crate::{
    auth::{AuthConfig, AuthService},
    config::AppConfig,
    db::DbPool,
    services::{
        accounts::AccountService, categories::CategoryService, companies::CompanyService,
        groups::GroupService, history::HistoryService, items::ItemService,
        transfers::TransferService, users::UserService, warehouses::WarehouseService,
    },
};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub history: Arc<HistoryService>,
    pub items: Arc<ItemService>,
    pub warehouses: Arc<WarehouseService>,
    pub transfers: Arc<TransferService>,
    pub groups: Arc<GroupService>,
    pub users: Arc<UserService>,
    pub companies: Arc<CompanyService>,
    pub accounts: Arc<AccountService>,
    pub categories: Arc<CategoryService>,
    pub auth: Arc<AuthService>,
}

impl AppServices {
    /// Wire every service over one shared pool.
    ///
    /// Item and transfer services hold their own handle on the history
    /// recorder so each mutation can append its stock record.
    pub fn new(db_pool: Arc<DbPool>, config: &AppConfig) -> Self {
        let history = HistoryService::new(db_pool.clone(), config.default_currency.clone());
        let users = UserService::new(db_pool.clone());

        Self {
            items: Arc::new(ItemService::new(db_pool.clone(), history.clone())),
            transfers: Arc::new(TransferService::new(db_pool.clone(), history.clone())),
            history: Arc::new(history),
            warehouses: Arc::new(WarehouseService::new(db_pool.clone())),
            groups: Arc::new(GroupService::new(db_pool.clone())),
            companies: Arc::new(CompanyService::new(db_pool.clone())),
            accounts: Arc::new(AccountService::new(db_pool.clone())),
            categories: Arc::new(CategoryService::new(db_pool)),
            auth: Arc::new(AuthService::new(AuthConfig::from(config), users.clone())),
            users: Arc::new(users),
        }
    }
}
