//! Data handed from the provider to every resource and data source

use crate::api::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct NetBoxProviderData {
    pub client: Arc<Client>,
}

impl NetBoxProviderData {
    pub fn new(client: Client) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}
