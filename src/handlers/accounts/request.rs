//! Account request DTOs

use serde::Deserialize;

/// Promotion query; without a course every student membership is promoted
#[derive(Debug, Default, Deserialize)]
pub struct PromoteQuery {
    pub course_id: Option<String>,
}
