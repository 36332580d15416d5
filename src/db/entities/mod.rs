#[allow(unused_imports)]
pub mod prelude {
    pub use super::list::Entity as List;
    pub use super::task::Entity as Task;
}

pub mod list;
pub mod task;
