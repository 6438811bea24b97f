//! Repository layer: one zero-sized struct per table with async query methods.

pub mod cart_session_repo;
pub mod category_repo;
pub mod order_repo;
pub mod product_repo;
pub mod user_repo;

pub use cart_session_repo::CartSessionRepo;
pub use category_repo::CategoryRepo;
pub use order_repo::OrderRepo;
pub use product_repo::ProductRepo;
pub use user_repo::UserRepo;
