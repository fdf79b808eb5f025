use error_stack::ResultExt;
use google_sheets4::{hyper, hyper_rustls};

use crate::ports::service_client::ServiceClientError;

pub type HttpsConnector = hyper_rustls::HttpsConnector<hyper::client::HttpConnector>;

/// Builds the HTTPS client shared by the authenticator and the Sheets hub.
///
/// Fails when the platform's root certificates cannot be loaded.
pub fn http_client() -> error_stack::Result<hyper::Client<HttpsConnector>, ServiceClientError> {
    let connector = hyper_rustls::HttpsConnectorBuilder::new()
        .with_native_roots()
        .change_context(ServiceClientError::ConnectFailed)
        .attach_printable("Could not load the native root certificates")?
        .https_only()
        .enable_http1()
        .build();

    Ok(hyper::Client::builder().build(connector))
}
