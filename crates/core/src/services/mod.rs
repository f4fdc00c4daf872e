pub mod appointment_service;
pub mod calendar_service;
pub mod dashboard_service;
pub mod invoice_service;
pub mod list_service;
