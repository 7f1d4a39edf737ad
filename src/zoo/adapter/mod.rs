pub mod in_memory;
pub mod json_config;
pub mod report;
pub mod static_zoo;
pub mod tcp;
