use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use super::{
    dto::{Monkey, MonkeyFilter, MonkeyTraits, SortBy},
    id::MonkeyId,
};

const SELECT_MONKEY: &str = r#"
SELECT m.id,
       m.name,
       m.image_url AS image,
       m.rarity,
       m.price,
       t.background,
       t.fur,
       t.headgear,
       t.prop
FROM monkeys m
JOIN monkey_traits t ON t.monkey_id = m.id
"#;

#[derive(Debug, FromRow)]
struct MonkeyRow {
    id: String,
    name: String,
    image: String,
    rarity: String,
    price: i32,
    background: String,
    fur: String,
    headgear: String,
    prop: String,
}

impl From<MonkeyRow> for Monkey {
    fn from(r: MonkeyRow) -> Self {
        Monkey {
            id: r.id,
            name: r.name,
            image: r.image,
            rarity: r.rarity,
            price: r.price,
            traits: MonkeyTraits {
                background: r.background,
                fur: r.fur,
                headgear: r.headgear,
                prop: r.prop,
            },
        }
    }
}

/// List monkeys with their traits. Filter values are bound parameters, so
/// their content cannot alter the query; the ORDER BY fragment comes from the
/// `SortBy` allow-list only.
pub async fn list(
    db: &PgPool,
    filter: &MonkeyFilter,
    sort: SortBy,
) -> Result<Vec<Monkey>, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new(SELECT_MONKEY);

    if filter.search.is_some() || filter.rarity.is_some() || filter.max_price.is_some() {
        qb.push(" WHERE ");
        let mut clause = qb.separated(" AND ");
        if let Some(search) = &filter.search {
            clause.push("m.name ILIKE ");
            clause.push_bind_unseparated(format!("%{search}%"));
        }
        if let Some(rarity) = &filter.rarity {
            clause.push("m.rarity = ");
            clause.push_bind_unseparated(rarity.clone());
        }
        if let Some(max_price) = filter.max_price {
            clause.push("m.price <= ");
            clause.push_bind_unseparated(max_price);
        }
    }

    qb.push(" ORDER BY ");
    qb.push(sort.order_sql());

    let rows: Vec<MonkeyRow> = qb.build_query_as().fetch_all(db).await?;
    Ok(rows.into_iter().map(Monkey::from).collect())
}

pub async fn get(db: &PgPool, id: &MonkeyId) -> Result<Option<Monkey>, sqlx::Error> {
    let row = sqlx::query_as::<_, MonkeyRow>(&format!("{SELECT_MONKEY} WHERE m.id = $1"))
        .bind(id.as_str())
        .fetch_optional(db)
        .await?;
    Ok(row.map(Monkey::from))
}
