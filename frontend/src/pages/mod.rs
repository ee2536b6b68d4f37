pub mod customers;
pub mod edit_customer;
pub mod placeholder;
