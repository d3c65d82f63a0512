use serde::{Deserialize, Serialize};

/// Request body for POST /twit and PUT /twit/{id}
#[derive(Debug, Deserialize, Serialize)]
pub struct TwitBodyRequest {
    pub body: String,
}
