//! End-to-end tests driving the HTTP router in process.

mod helpers;

mod file_test;
mod project_test;
