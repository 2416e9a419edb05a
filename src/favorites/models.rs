use serde::{Deserialize, Serialize};

/// A favourite tea entry stored under `favourites/{uid}/{key}`.
/// Create-only; never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteTea {
    #[serde(rename = "teaName")]
    pub name: String,
    #[serde(rename = "teaType")]
    pub tea_type: String,
    #[serde(default)]
    pub description: String,
}
