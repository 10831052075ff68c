//! End-to-end tests against an in-process mock of the remote API.

mod helpers;

mod api_test;
mod navigation_test;
mod session_test;
