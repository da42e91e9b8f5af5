use std::fmt;

/// Kind of synchronization primitive declared by `schema.type`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LockKind {
    /// Zephyr `struct k_mutex`.
    Mutex,
    /// Zephyr counting semaphore, `struct k_sem`.
    Semaphore,
    /// Any other declared type, kept verbatim for error reporting.
    Unknown(String),
}

impl LockKind {
    /// Map the declared `schema.type` string to a kind.
    pub fn from_declared(s: &str) -> Self {
        match s {
            "mutex" => Self::Mutex,
            "semaphore" => Self::Semaphore,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The `enum locking_type` tag used in the generated table.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Mutex => "LOCKING_TYPE_MUTEX",
            Self::Semaphore => "LOCKING_TYPE_SEMAPHORE",
            Self::Unknown(_) => "LOCKING_TYPE_UNKNOWN",
        }
    }

    /// The Zephyr storage type, or `None` for unknown kinds.
    pub fn storage_type(&self) -> Option<&'static str> {
        match self {
            Self::Mutex => Some("struct k_mutex"),
            Self::Semaphore => Some("struct k_sem"),
            Self::Unknown(_) => None,
        }
    }

    pub fn is_semaphore(&self) -> bool {
        matches!(self, Self::Semaphore)
    }
}

impl fmt::Display for LockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mutex => write!(f, "mutex"),
            Self::Semaphore => write!(f, "semaphore"),
            Self::Unknown(s) => write!(f, "{}", s),
        }
    }
}
