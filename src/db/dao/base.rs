use chrono::Utc;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    IntoActiveModel, PrimaryKeyTrait,
};
use uuid::Uuid;

use super::base_traits::{AuditedActiveModel, HasIdActiveModel, TimestampedActiveModel};
use super::error::{DaoLayerError, DaoResult};

/// Row-at-a-time access for entities keyed by a `Uuid`.
///
/// Every write stamps `updated_at` and the acting user; inserts additionally
/// assign a fresh id and the creation fields.
#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized
where
    <Self::Entity as EntityTrait>::Model:
        FromQueryResult + IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel> + Send + Sync,
    <Self::Entity as EntityTrait>::ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + HasIdActiveModel
        + TimestampedActiveModel
        + AuditedActiveModel
        + Send,
    <<Self::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType:
        From<Uuid> + Send + Sync,
{
    type Entity: EntityTrait + Send + Sync;
    /// Name used in not-found errors.
    const NAME: &'static str;

    fn from_db(db: DatabaseConnection) -> Self;

    fn new(db: &DatabaseConnection) -> Self {
        Self::from_db(db.clone())
    }

    fn db(&self) -> &DatabaseConnection;

    async fn create(
        &self,
        data: impl IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel> + Send,
        actor: Uuid,
    ) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        let now = Utc::now().fixed_offset();
        let mut active = data.into_active_model();
        active.set_id(Uuid::new_v4());
        active.set_created_at(now);
        active.set_updated_at(now);
        active.set_created_user_id(actor);
        active.set_updated_user_id(actor);
        Ok(active.insert(self.db()).await?)
    }

    async fn try_find_by_id(
        &self,
        id: Uuid,
    ) -> DaoResult<Option<<Self::Entity as EntityTrait>::Model>> {
        Ok(Self::Entity::find_by_id(id).one(self.db()).await?)
    }

    async fn find_by_id(&self, id: Uuid) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        self.try_find_by_id(id)
            .await?
            .ok_or(DaoLayerError::NotFound {
                entity: Self::NAME,
                id,
            })
    }

    async fn update<F>(
        &self,
        id: Uuid,
        actor: Uuid,
        apply: F,
    ) -> DaoResult<<Self::Entity as EntityTrait>::Model>
    where
        F: for<'a> FnOnce(&'a mut <Self::Entity as EntityTrait>::ActiveModel) + Send,
    {
        let model = self.find_by_id(id).await?;

        let mut active = model.into_active_model();
        apply(&mut active);
        active.set_updated_at(Utc::now().fixed_offset());
        active.set_updated_user_id(actor);

        Ok(active.update(self.db()).await?)
    }

    /// Deletes one row; `false` when nothing matched.
    async fn delete(&self, id: Uuid) -> DaoResult<bool> {
        let result = Self::Entity::delete_by_id(id).exec(self.db()).await?;
        Ok(result.rows_affected > 0)
    }
}
