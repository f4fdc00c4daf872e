pub mod appointment;
pub mod calendar;
pub mod client;
pub mod commissioning_party;
pub mod dashboard;
pub mod invoice;
pub mod list;
mod nullable;
pub mod settings;
pub mod therapist;
