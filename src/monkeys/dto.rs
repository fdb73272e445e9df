use serde::{Deserialize, Serialize};

/// Raw query parameters for `GET /api/monkeys`. All optional; empty strings
/// are treated as absent and malformed numbers are dropped rather than
/// rejected.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub rarity: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}

/// Validated filter set, AND-composed in the query.
#[derive(Debug, Default)]
pub struct MonkeyFilter {
    pub search: Option<String>,
    pub rarity: Option<String>,
    pub max_price: Option<i64>,
}

impl MonkeyFilter {
    pub fn from_params(params: &ListParams) -> Self {
        Self {
            search: params.search.clone().filter(|s| !s.is_empty()),
            rarity: params.rarity.clone().filter(|s| !s.is_empty()),
            max_price: params
                .max_price
                .as_deref()
                .and_then(|v| v.parse::<i64>().ok()),
        }
    }
}

/// Sort order allow-list. Anything unrecognized falls back to identifier
/// order, so the ORDER BY clause is always one of these fixed fragments and
/// never caller-controlled text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Id,
    PriceAsc,
    PriceDesc,
    RarityAsc,
    RarityDesc,
}

impl SortBy {
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("price-asc") => Self::PriceAsc,
            Some("price-desc") => Self::PriceDesc,
            Some("rarity-asc") => Self::RarityAsc,
            Some("rarity-desc") => Self::RarityDesc,
            _ => Self::Id,
        }
    }

    /// ORDER BY fragment. Rarity uses the fixed Common < Rare < Epic <
    /// Legendary < Mythic ranking; unknown rarities sort last.
    pub fn order_sql(self) -> &'static str {
        match self {
            Self::Id => "m.id",
            Self::PriceAsc => "m.price ASC",
            Self::PriceDesc => "m.price DESC",
            Self::RarityAsc => {
                "CASE m.rarity \
                 WHEN 'Common' THEN 1 WHEN 'Rare' THEN 2 WHEN 'Epic' THEN 3 \
                 WHEN 'Legendary' THEN 4 WHEN 'Mythic' THEN 5 ELSE 99 END ASC"
            }
            Self::RarityDesc => {
                "CASE m.rarity \
                 WHEN 'Common' THEN 1 WHEN 'Rare' THEN 2 WHEN 'Epic' THEN 3 \
                 WHEN 'Legendary' THEN 4 WHEN 'Mythic' THEN 5 ELSE 99 END DESC"
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MonkeyTraits {
    pub background: String,
    pub fur: String,
    pub headgear: String,
    pub prop: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Monkey {
    pub id: String,
    pub name: String,
    pub image: String,
    pub rarity: String,
    pub price: i32,
    pub traits: MonkeyTraits,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_param_allow_list() {
        assert_eq!(SortBy::from_param(Some("price-asc")), SortBy::PriceAsc);
        assert_eq!(SortBy::from_param(Some("price-desc")), SortBy::PriceDesc);
        assert_eq!(SortBy::from_param(Some("rarity-asc")), SortBy::RarityAsc);
        assert_eq!(SortBy::from_param(Some("rarity-desc")), SortBy::RarityDesc);
        assert_eq!(SortBy::from_param(Some("name")), SortBy::Id);
        assert_eq!(
            SortBy::from_param(Some("m.price; DROP TABLE monkeys")),
            SortBy::Id
        );
        assert_eq!(SortBy::from_param(None), SortBy::Id);
    }

    #[test]
    fn malformed_max_price_is_dropped() {
        let params = ListParams {
            max_price: Some("not-a-number".into()),
            ..Default::default()
        };
        assert_eq!(MonkeyFilter::from_params(&params).max_price, None);

        let params = ListParams {
            max_price: Some("250".into()),
            ..Default::default()
        };
        assert_eq!(MonkeyFilter::from_params(&params).max_price, Some(250));
    }

    #[test]
    fn empty_params_are_absent() {
        let params = ListParams {
            search: Some(String::new()),
            rarity: Some(String::new()),
            ..Default::default()
        };
        let filter = MonkeyFilter::from_params(&params);
        assert!(filter.search.is_none());
        assert!(filter.rarity.is_none());
    }
}
