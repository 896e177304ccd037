pub mod audit_log_service;
