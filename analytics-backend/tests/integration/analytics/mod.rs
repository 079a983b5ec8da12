pub mod auth_guard_tests;
pub mod request_timeout_tests;
pub mod user_stats_tests;
