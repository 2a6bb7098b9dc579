pub mod customers;
pub mod inventory;
pub mod manufacturers;
pub mod products;
pub mod sales;
pub mod users;

pub use customers::Entity as Customers;
pub use inventory::Entity as Inventory;
pub use manufacturers::Entity as Manufacturers;
pub use products::Entity as Products;
pub use sales::Entity as Sales;
pub use users::Entity as Users;
