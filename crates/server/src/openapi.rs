use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

/// Menu item fields; any additional properties are stored as given.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemDoc {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    pub price: Option<String>,
    pub currency: Option<String>,
    /// `data:<mime>;base64,<payload>`
    pub image_data: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdateDoc {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    pub price: Option<String>,
    pub currency: Option<String>,
    pub image_data: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDoc {
    pub name: Option<String>,
    /// `null` removes the logo.
    pub logo_data: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::me,
        crate::routes::menu::list,
        crate::routes::menu::create,
        crate::routes::menu::update,
        crate::routes::menu::delete,
        crate::routes::settings::get,
        crate::routes::settings::upsert,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            MenuItemDoc,
            MenuItemUpdateDoc,
            SettingsDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "menu"),
        (name = "settings")
    )
)]
pub struct ApiDoc;
