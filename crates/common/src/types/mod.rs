use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body of the `/status` probe.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Status {
    pub up: bool,
    pub owner: String,
    pub timestamp: i64,
}

impl Status {
    pub fn up(owner: impl Into<String>, timestamp: i64) -> Self {
        Self { up: true, owner: owner.into(), timestamp }
    }
}
