//! Document entity - Stores one JSON blob per string key.
//! This is the whole local persistence namespace: each store owns a single
//! key (`prayers`, `journal`, `tasbih`, `onboarding_complete`,
//! `onboarding_data`) and writes its full state through as one document.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Document database model - one JSON value per key
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    /// Namespace key (e.g., `"prayers"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// The document body, serialized as JSON
    pub value: String,
    /// When this document was last written
    pub updated_at: DateTime,
}

/// `Document` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
