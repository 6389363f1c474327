//! OpenLoop API constants
//!
//! The upstream surface is two endpoints on one host. These values are not
//! secrets — the bearer tokens that authorize requests against them are
//! managed by the token store.

/// Production API base URL
pub const API_BASE_URL: &str = "https://api.openloop.so";

/// API host name, used as the latency probe target
pub const API_HOST: &str = "api.openloop.so";

/// Balance endpoint (GET, bearer-authorized)
pub const INFO_PATH: &str = "/bandwidth/info";

/// Share submission endpoint (POST, bearer-authorized, JSON body)
pub const SHARE_PATH: &str = "/bandwidth/share";
