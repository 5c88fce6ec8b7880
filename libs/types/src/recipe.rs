//! Saved recipe shape used by the persistence layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::settings::MixSettings;

/// A named settings snapshot stored in the recipe file.
///
/// The embedded settings are an independent copy of whatever the caller
/// was editing when it saved; loading hands back another independent copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRecipe {
    pub id: Uuid,
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub settings: MixSettings,
}
