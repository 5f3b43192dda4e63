/// Database operations for the auth service
pub mod accounts;
pub mod credentials;
pub mod profiles;
