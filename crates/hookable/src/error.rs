use thiserror::Error;

/// Failure delivered through an invocation's single failure channel
#[derive(Debug, Error)]
pub enum HookError {
    /// A handler returned `Err` or called `Next::fail`
    #[error(transparent)]
    Handler(#[from] anyhow::Error),

    /// A handler panicked while it was being invoked
    #[error("handler panicked: {0}")]
    Panicked(String),

    /// Promise-style callable invoked before an actor was installed
    #[error("no actor configured")]
    MissingActor,

    /// Every continuation was dropped before the chain finished
    #[error("chain abandoned before completion")]
    Abandoned,
}

impl HookError {
    /// Borrow the handler error, if this failure came from a handler
    pub fn handler_error(&self) -> Option<&anyhow::Error> {
        match self {
            HookError::Handler(e) => Some(e),
            _ => None,
        }
    }

    /// Downcast a handler error to a concrete type
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        self.handler_error().and_then(|e| e.downcast_ref::<E>())
    }

    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        HookError::Panicked(message)
    }
}
