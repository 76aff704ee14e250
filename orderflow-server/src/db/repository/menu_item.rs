//! Menu Item Repository

use super::{RepoError, RepoResult};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, menu_id, business_id, name, description, price, item_type, image_url, is_available, created_at, updated_at";

pub async fn create(
    pool: &SqlitePool,
    business_id: &str,
    menu_id: &str,
    data: &MenuItemCreate,
) -> RepoResult<MenuItem> {
    let now = shared::util::now_millis();
    let item = MenuItem {
        id: shared::util::new_id(),
        menu_id: menu_id.to_string(),
        business_id: business_id.to_string(),
        name: data.name.clone(),
        description: data.description.clone(),
        price: data.price,
        item_type: data.item_type,
        image_url: data.image_url.clone(),
        is_available: true,
        created_at: now,
        updated_at: now,
    };

    sqlx::query(
        "INSERT INTO menu_items (id, menu_id, business_id, name, description, price, item_type, image_url, is_available, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(&item.id)
    .bind(&item.menu_id)
    .bind(&item.business_id)
    .bind(&item.name)
    .bind(&item.description)
    .bind(item.price)
    .bind(item.item_type)
    .bind(&item.image_url)
    .bind(item.created_at)
    .bind(item.updated_at)
    .execute(pool)
    .await?;

    Ok(item)
}

pub async fn list_by_menu(
    pool: &SqlitePool,
    business_id: &str,
    menu_id: &str,
) -> RepoResult<Vec<MenuItem>> {
    let rows = sqlx::query_as::<_, MenuItem>(&format!(
        "SELECT {COLUMNS} FROM menu_items WHERE business_id = ? AND menu_id = ? ORDER BY item_type, name"
    ))
    .bind(business_id)
    .bind(menu_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(
    pool: &SqlitePool,
    business_id: &str,
    id: &str,
) -> RepoResult<Option<MenuItem>> {
    let row = sqlx::query_as::<_, MenuItem>(&format!(
        "SELECT {COLUMNS} FROM menu_items WHERE business_id = ? AND id = ?"
    ))
    .bind(business_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn update(
    pool: &SqlitePool,
    business_id: &str,
    id: &str,
    data: &MenuItemUpdate,
) -> RepoResult<MenuItem> {
    let rows = sqlx::query(
        r#"
        UPDATE menu_items SET
            name = COALESCE(?1, name),
            description = COALESCE(?2, description),
            price = COALESCE(?3, price),
            item_type = COALESCE(?4, item_type),
            image_url = COALESCE(?5, image_url),
            is_available = COALESCE(?6, is_available),
            updated_at = ?7
        WHERE business_id = ?8 AND id = ?9
        "#,
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.item_type)
    .bind(&data.image_url)
    .bind(data.is_available)
    .bind(shared::util::now_millis())
    .bind(business_id)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("menu item {id}")));
    }

    find_by_id(pool, business_id, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("menu item {id}")))
}

/// Delete a menu item; order lines keep their name/price snapshot
pub async fn delete(pool: &SqlitePool, business_id: &str, id: &str) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM menu_items WHERE business_id = ? AND id = ?")
        .bind(business_id)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("menu item {id}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::fixtures;
    use crate::db::test_pool;
    use shared::models::MenuItemType;

    #[tokio::test]
    async fn test_create_list_update() {
        let pool = test_pool().await;
        let biz = fixtures::business(&pool, "owner@bistro.io").await;
        let menu = fixtures::menu(&pool, &biz.id, "Lunch").await;
        let soup = fixtures::menu_item(&pool, &menu, "Soup", 650).await;
        create(
            &pool,
            &biz.id,
            &menu.id,
            &MenuItemCreate {
                name: "Lemonade".into(),
                description: Some("Fresh".into()),
                price: 300,
                item_type: MenuItemType::Drink,
                image_url: None,
            },
        )
        .await
        .unwrap();

        let items = list_by_menu(&pool, &biz.id, &menu.id).await.unwrap();
        assert_eq!(items.len(), 2);
        // 'drink' sorts before 'food'
        assert_eq!(items[0].name, "Lemonade");
        assert_eq!(items[0].item_type, MenuItemType::Drink);

        let updated = update(
            &pool,
            &biz.id,
            &soup.id,
            &MenuItemUpdate {
                price: Some(700),
                is_available: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.price, 700);
        assert!(!updated.is_available);
        assert_eq!(updated.name, "Soup");
    }

    #[tokio::test]
    async fn test_negative_price_hits_check_constraint() {
        let pool = test_pool().await;
        let biz = fixtures::business(&pool, "owner@bistro.io").await;
        let menu = fixtures::menu(&pool, &biz.id, "Lunch").await;
        let soup = fixtures::menu_item(&pool, &menu, "Soup", 650).await;

        let err = update(
            &pool,
            &biz.id,
            &soup.id,
            &MenuItemUpdate {
                price: Some(-1),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_other_tenant_cannot_see_item() {
        let pool = test_pool().await;
        let a = fixtures::business(&pool, "a@bistro.io").await;
        let b = fixtures::business(&pool, "b@bistro.io").await;
        let menu = fixtures::menu(&pool, &a.id, "Lunch").await;
        let soup = fixtures::menu_item(&pool, &menu, "Soup", 650).await;

        assert!(find_by_id(&pool, &b.id, &soup.id).await.unwrap().is_none());
        assert!(matches!(
            delete(&pool, &b.id, &soup.id).await,
            Err(RepoError::NotFound(_))
        ));
    }
}
