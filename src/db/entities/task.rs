use audited_entity_derive::audited_entity;
use sea_orm::entity::prelude::*;

/// A task row. `position` is a 1-based rank that is only meaningful among
/// tasks sharing the same `list_id`.
#[audited_entity(id = "task_id")]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(indexed)]
    pub list_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
    #[sea_orm(default_value = false)]
    pub completed: bool,
    #[sea_orm(belongs_to, from = "list_id", to = "list_id", on_delete = "Cascade")]
    pub list: HasOne<super::list::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
