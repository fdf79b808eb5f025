use std::path::Path;

use error_stack::ResultExt;
use google_sheets4::hyper;
use google_sheets4::oauth2::{self, authenticator::Authenticator};

use super::http_client::HttpsConnector;
use crate::ports::service_client::ServiceClientError;

pub async fn read_service_account_key(
    credentials_path: &Path,
) -> error_stack::Result<oauth2::ServiceAccountKey, ServiceClientError> {
    oauth2::read_service_account_key(credentials_path)
        .await
        .change_context(ServiceClientError::ConnectFailed)
        .attach_printable_lazy(|| {
            format!(
                "Could not read service account private key at '{}'",
                credentials_path.display()
            )
        })
}

pub async fn auth(
    secret: oauth2::ServiceAccountKey,
    client: hyper::Client<HttpsConnector>,
) -> error_stack::Result<Authenticator<HttpsConnector>, ServiceClientError> {
    oauth2::ServiceAccountAuthenticator::with_client(secret, client)
        .build()
        .await
        .change_context(ServiceClientError::ConnectFailed)
        .attach_printable("Could not create a service account authenticator")
}
