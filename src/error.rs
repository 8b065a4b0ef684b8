use thiserror::Error;

/// A rejected user action. Never fatal: the snapshot is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HubError {
    #[error("admin mode required")]
    AdminRequired,

    #[error("required field missing: {0}")]
    MissingField(&'static str),

    #[error("no link with id {0}")]
    LinkNotFound(String),

    #[error("action needs confirmation")]
    NotConfirmed,

    #[error("admin credential not authorized")]
    BadCredential,

    #[error("unknown theme preset {0}")]
    PresetNotFound(String),

    #[error("remote sync is disabled")]
    RemoteDisabled,

    #[error("hub document is still loading")]
    Loading,
}
