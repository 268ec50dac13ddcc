use charity_fund::domain::funding::Fundable;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

mod common;

fn total_invested<F: Fundable>(entities: &[F]) -> Decimal {
    entities
        .iter()
        .map(|e| e.funding().invested_amount().value())
        .sum()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creations_never_double_spend() {
    let fund = Arc::new(common::in_memory_fund());
    for id in 1..=5 {
        fund.create_project(id, common::project_draft(&format!("Project {id}"), dec!(100)))
            .await
            .unwrap();
    }

    let mut handles = Vec::new();
    for id in 1..=40 {
        let fund = fund.clone();
        handles.push(tokio::spawn(async move {
            fund.create_donation(id, common::donation_draft(id % 3, dec!(17)))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let projects = fund.projects().await.unwrap();
    let donations = fund.donations().await.unwrap();

    // 40 * 17 = 680 donated against 500 of capacity
    assert_eq!(total_invested(&projects), dec!(500));
    assert_eq!(total_invested(&donations), dec!(500));
    assert!(projects.iter().all(|p| p.funding.is_fully_invested()));
    assert_eq!(donations.len(), 40);
}

#[tokio::test]
async fn test_user_donations_query() {
    let fund = common::in_memory_fund();
    fund.create_donation(1, common::donation_draft(7, dec!(5))).await.unwrap();
    fund.create_donation(2, common::donation_draft(8, dec!(5))).await.unwrap();
    fund.create_donation(3, common::donation_draft(7, dec!(5))).await.unwrap();

    let mine: Vec<u32> = fund
        .user_donations(7)
        .await
        .unwrap()
        .iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(mine, vec![1, 3]);
    assert!(fund.user_donations(99).await.unwrap().is_empty());
}
