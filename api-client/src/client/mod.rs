mod client;
mod dispatcher;
mod error;
mod interceptor;
mod manager;
mod response;
mod token;

pub use client::ApiClient;
#[cfg(feature = "ureq")]
pub use dispatcher::CoreDispatcher;
pub use dispatcher::{CallResponse, CallResult, Dispatcher, OnCallCompletion};
pub use error::{error_code, GenericError};
pub use interceptor::{RequestInterceptor, ResponseInterceptor};
pub use manager::ApiManager;
pub use response::DecodedResponse;
pub use token::TokenHandler;
