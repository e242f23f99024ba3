pub mod api;
pub mod availability_service;
pub mod booking_service;
pub mod pricing_service;
pub mod timeline_service;
