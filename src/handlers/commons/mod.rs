// handlers/commons/mod.rs - Commons resource handlers
//
// Create, delete and edit require the ADMIN role (enforced by the AdminUser
// extractor); list, show and join are open to any authenticated user.

use serde::Deserialize;

pub mod create; // POST /api/commons/new
pub mod delete; // DELETE /api/commons/delete?id=
pub mod edit; // PUT /api/commons?id=
pub mod join; // POST /api/commons/join?commonsId=
pub mod list; // GET /api/commons/all
pub mod show; // GET /api/commons?id=

pub use create::commons_create;
pub use delete::commons_delete;
pub use edit::commons_edit;
pub use join::commons_join;
pub use list::commons_list;
pub use show::commons_show;

/// `?id=` query parameter; delete also accepts `?commonsId=`
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    #[serde(alias = "commonsId")]
    pub id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinQuery {
    pub commons_id: i64,
}
