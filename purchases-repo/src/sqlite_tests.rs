//! SQLite repository integration tests.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use purchases_types::{NewPurchase, PurchaseId, PurchaseRepository};
    use rust_decimal_macros::dec;

    use crate::SqlitePurchaseRepo;

    async fn setup_repo() -> SqlitePurchaseRepo {
        SqlitePurchaseRepo::new("sqlite::memory:").await.unwrap()
    }

    fn sample_input() -> NewPurchase {
        NewPurchase {
            description: "Office chair".to_string(),
            purchase_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            dollar_price: dec!(500.00),
        }
    }

    #[tokio::test]
    async fn test_create_purchase() {
        let repo = setup_repo().await;

        let purchase = repo.create_purchase(sample_input()).await.unwrap();

        assert_eq!(purchase.description, "Office chair");
        assert_eq!(
            purchase.purchase_date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(purchase.dollar_price, dec!(500.00));
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let repo = setup_repo().await;

        let a = repo.create_purchase(sample_input()).await.unwrap();
        let b = repo.create_purchase(sample_input()).await.unwrap();

        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_get_purchase_roundtrip() {
        let repo = setup_repo().await;

        let created = repo.create_purchase(sample_input()).await.unwrap();
        let fetched = repo.get_purchase(created.id).await.unwrap().unwrap();

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.description, created.description);
        assert_eq!(fetched.purchase_date, created.purchase_date);
        assert_eq!(fetched.dollar_price, created.dollar_price);
    }

    #[tokio::test]
    async fn test_get_purchase_not_found() {
        let repo = setup_repo().await;

        let result = repo.get_purchase(PurchaseId::new()).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_leap_day_date_roundtrip() {
        let repo = setup_repo().await;

        let input = NewPurchase {
            purchase_date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            ..sample_input()
        };
        let created = repo.create_purchase(input).await.unwrap();
        let fetched = repo.get_purchase(created.id).await.unwrap().unwrap();

        assert_eq!(
            fetched.purchase_date,
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[tokio::test]
    async fn test_fractional_price_roundtrip() {
        let repo = setup_repo().await;

        let input = NewPurchase {
            dollar_price: dec!(0.01),
            ..sample_input()
        };
        let created = repo.create_purchase(input).await.unwrap();
        let fetched = repo.get_purchase(created.id).await.unwrap().unwrap();

        assert_eq!(fetched.dollar_price, dec!(0.01));
    }

    #[tokio::test]
    async fn test_list_purchases() {
        let repo = setup_repo().await;

        repo.create_purchase(sample_input()).await.unwrap();
        repo.create_purchase(NewPurchase {
            description: "Standing desk".to_string(),
            ..sample_input()
        })
        .await
        .unwrap();

        let purchases = repo.list_purchases().await.unwrap();

        assert_eq!(purchases.len(), 2);
    }

    #[tokio::test]
    async fn test_list_purchases_empty() {
        let repo = setup_repo().await;

        let purchases = repo.list_purchases().await.unwrap();

        assert!(purchases.is_empty());
    }
}
