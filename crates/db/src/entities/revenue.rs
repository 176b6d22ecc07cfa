//! `SeaORM` Entity for the read-only revenue table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "revenue")]
pub struct Model {
    /// Three-letter month name, e.g. `Jan`.
    #[sea_orm(primary_key, auto_increment = false)]
    pub month: String,
    /// Revenue for the month, whole dollars.
    pub revenue: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
