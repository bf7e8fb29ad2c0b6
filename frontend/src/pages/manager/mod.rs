pub mod repository;
pub mod types;
pub mod view_model;

pub use view_model::ManagerViewModel;
