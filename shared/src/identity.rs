/// Supplies who the local process is before it connects anywhere.
pub trait IdentityProvider {
    fn display_name(&self) -> String;
    /// Globally unique, durable account identifier
    fn account_id(&self) -> u64;
}

/// Fixed identity, for processes that already know who they are
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalIdentity {
    display_name: String,
    account_id: u64,
}

impl LocalIdentity {
    pub fn new(display_name: impl Into<String>, account_id: u64) -> Self {
        Self {
            display_name: display_name.into(),
            account_id,
        }
    }
}

impl IdentityProvider for LocalIdentity {
    fn display_name(&self) -> String {
        self.display_name.clone()
    }

    fn account_id(&self) -> u64 {
        self.account_id
    }
}
