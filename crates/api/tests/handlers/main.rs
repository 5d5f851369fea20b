#[path = "../test_utils.rs"]
mod test_utils;

mod config_test;
mod health_test;
mod middleware_test;
mod summary_test;
mod surgery_test;
