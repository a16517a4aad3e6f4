use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockroom API",
        version = "1.0.0",
        description = r#"
# Stockroom Inventory API

Items, warehouses, item groups and transfer orders, with a stock history log
derived from every item and transfer mutation.

## History

Creating or updating an item writes a `stock_in` record, reducing stock
writes a `stock_out` record and every transfer change writes a `transfer`
record. A failed history write never rolls back the primary change; the
response carries `history_error` instead of `history`.

## Authentication

User and accounting endpoints require a bearer token from `/api/v1/auth/login`:

```
Authorization: Bearer <your-jwt-token>
```

## Error Handling

Errors are returned as `{"error": "<message>"}` with the matching HTTP status.
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "history", description = "Stock history log"),
        (name = "items", description = "Item management"),
        (name = "warehouses", description = "Warehouse management"),
        (name = "groups", description = "Item groups"),
        (name = "transfers", description = "Transfer orders between warehouses"),
        (name = "users", description = "User management"),
        (name = "auth", description = "Registration and login")
    ),
    paths(
        // History
        crate::handlers::history::list_history,
        crate::handlers::history::get_history,
        crate::handlers::history::delete_history,
        crate::handlers::history::item_history,
        crate::handlers::history::warehouse_history,
        crate::handlers::history::create_item_history,
        crate::handlers::history::create_transfer_history,

        // Items
        crate::handlers::items::list_items,
        crate::handlers::items::get_item,
        crate::handlers::items::create_item,
        crate::handlers::items::update_item,
        crate::handlers::items::reduce_stock,
        crate::handlers::items::delete_item,
        crate::handlers::items::delete_items_batch,

        // Warehouses
        crate::handlers::warehouses::list_warehouses,
        crate::handlers::warehouses::get_warehouse,
        crate::handlers::warehouses::create_warehouse,
        crate::handlers::warehouses::update_warehouse,
        crate::handlers::warehouses::delete_warehouse,

        // Groups
        crate::handlers::groups::list_groups,
        crate::handlers::groups::get_group,
        crate::handlers::groups::create_group,
        crate::handlers::groups::update_group,
        crate::handlers::groups::delete_group,
        crate::handlers::groups::list_group_items,
        crate::handlers::groups::add_group_item,

        // Transfers
        crate::handlers::transfers::list_transfers,
        crate::handlers::transfers::get_transfer,
        crate::handlers::transfers::create_transfer,
        crate::handlers::transfers::update_transfer,
        crate::handlers::transfers::approve_transfer,
        crate::handlers::transfers::complete_transfer,
        crate::handlers::transfers::delete_transfer,

        // Users
        crate::handlers::users::list_users,
        crate::handlers::users::current_user,
        crate::handlers::users::get_user,
        crate::handlers::users::create_user,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,

        // Auth
        crate::auth::register_handler,
        crate::auth::login_handler,
    ),
    components(
        schemas(
            crate::models::transaction::Model,
            crate::models::TransactionKind,
            crate::models::item::Model,
            crate::models::warehouse::Model,
            crate::models::item_group::Model,
            crate::models::transfer_order::Model,
            crate::models::user::Model,
            crate::services::history::HistoryEntry,
            crate::services::items::ItemInput,
            crate::services::warehouses::WarehouseInput,
            crate::services::groups::GroupInput,
            crate::services::transfers::TransferInput,
            crate::services::users::NewUser,
            crate::services::users::UserUpdate,
            crate::handlers::history::ItemHistoryRequest,
            crate::handlers::history::TransferHistoryRequest,
            crate::handlers::items::ReduceStockRequest,
            crate::handlers::items::BatchDeleteRequest,
            crate::handlers::groups::AddGroupItemRequest,
            crate::auth::LoginCredentials,
            crate::auth::LoginResponse,
            crate::errors::ErrorResponse
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDocV1;

/// Registers the `bearer_auth` scheme referenced by protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDocV1::openapi())
}
