pub mod audit;
pub mod doctor;
pub mod health;
pub mod patient;
pub mod summary;
pub mod surgery;
pub mod theater;
