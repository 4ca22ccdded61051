//! Integration tests for check_redis
//!
//! Each test runs a full probe against an in-process scripted server bound
//! to an ephemeral port on 127.0.0.1. No external server is needed.

mod helpers;

mod failures;
mod metrics;
mod transfer;
