//! Process-wide services shared by every session.

use std::sync::Arc;

use mc_rs_crypto::PublicKey;

use crate::auth::DeviceCodeFlow;
use crate::config::AuthSection;
use crate::locale::{BuiltinLocale, Locale};
use crate::mappings::{ItemTranslator, MappedItemTranslator, StoredItems};
use crate::session::SessionManager;

/// Read-mostly state handed to each session behind an `Arc`.
pub struct GatewayContext {
    pub auth: AuthSection,
    pub sessions: SessionManager,
    pub items: Arc<dyn ItemTranslator>,
    pub stored: StoredItems,
    pub locale: Arc<dyn Locale>,
    /// External Java account sign-in; online mode is unavailable without it.
    pub device_code: Option<Arc<dyn DeviceCodeFlow>>,
    /// Key whose signature marks an identity chain as signed.
    pub trusted_root: PublicKey,
}

impl GatewayContext {
    pub fn new(auth: AuthSection, trusted_root: PublicKey) -> Self {
        let stored = StoredItems::default();
        Self {
            auth,
            sessions: SessionManager::new(),
            items: Arc::new(MappedItemTranslator::new(&stored)),
            stored,
            locale: Arc::new(BuiltinLocale::new()),
            device_code: None,
            trusted_root,
        }
    }

    pub fn with_items(mut self, items: Arc<dyn ItemTranslator>, stored: StoredItems) -> Self {
        self.items = items;
        self.stored = stored;
        self
    }

    pub fn with_locale(mut self, locale: Arc<dyn Locale>) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_device_code_flow(mut self, flow: Arc<dyn DeviceCodeFlow>) -> Self {
        self.device_code = Some(flow);
        self
    }
}
