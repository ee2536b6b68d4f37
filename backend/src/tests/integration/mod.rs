mod api_customers;
mod api_storage;
