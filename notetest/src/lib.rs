mod assertions;
mod configuration;
mod data;
mod error;
pub mod hook;
mod http_client;
pub mod report;
mod scenario;
mod session;
mod test_session;
mod util;


pub use assertions::{
    assert_json_content_type, assert_note_shape, assert_status, assert_status_in, try_json,
};
pub use configuration::Configuration;
pub use data::{ApiResponse, RequestData};
pub use error::Error;
pub use http_client::{HttpClient, ReqwestHttpClient};
pub use notetest_codegen::api_test;
pub use scenario::Scenario;
pub use session::{ApiSession, Call};
pub use test_session::{keep_configuration, Harness, TestContext, TestOutcome, TestRun};

pub use reqwest::{Method, StatusCode, Url};
