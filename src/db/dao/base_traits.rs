pub trait HasIdActiveModel {
    fn set_id(&mut self, id: uuid::Uuid);
}

pub trait TimestampedActiveModel {
    fn set_created_at(&mut self, ts: sea_orm::entity::prelude::DateTimeWithTimeZone);
    fn set_updated_at(&mut self, ts: sea_orm::entity::prelude::DateTimeWithTimeZone);
}

/// Rows that record which user created and last touched them.
pub trait AuditedActiveModel {
    fn set_created_user_id(&mut self, user_id: uuid::Uuid);
    fn set_updated_user_id(&mut self, user_id: uuid::Uuid);
}
