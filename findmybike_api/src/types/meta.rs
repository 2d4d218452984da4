use serde::{Deserialize, Serialize};

/// Envelope wrapping every successful read response.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Response<T> {
    pub data: T,
}
