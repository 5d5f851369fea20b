pub mod audit_log;
pub mod doctor;
pub mod patient;
pub mod surgery;
