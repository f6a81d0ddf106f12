use std::collections::HashMap;

/// Secrets the adapters and services look up on every request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    FalKey,
    ResendApiKey,
    SupabaseAnonKey,
    VapiPublicKey,
    VapiAssistantIdSteve,
    VapiAssistantIdAlbert,
}

impl CredentialKey {
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::FalKey => "FAL_KEY",
            Self::ResendApiKey => "RESEND_API_KEY",
            Self::SupabaseAnonKey => "SUPABASE_ANON_KEY",
            Self::VapiPublicKey => "VAPI_PUBLIC_KEY",
            Self::VapiAssistantIdSteve => "VAPI_ASSISTANT_ID_STEVE",
            Self::VapiAssistantIdAlbert => "VAPI_ASSISTANT_ID_ALBERT",
        }
    }
}

/// Source of secrets. Blank values count as missing.
pub trait CredentialSource: Send + Sync {
    fn get(&self, key: CredentialKey) -> Option<String>;
}

impl CredentialSource for HashMap<CredentialKey, String> {
    fn get(&self, key: CredentialKey) -> Option<String> {
        HashMap::get(self, &key)
            .filter(|v| !v.trim().is_empty())
            .cloned()
    }
}
