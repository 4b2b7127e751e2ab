pub mod analysis;
pub mod dashboard;
pub mod document;
pub mod expense;
pub mod grant;
pub mod inventory;
pub mod shipment;
pub mod user;
