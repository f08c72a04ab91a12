mod common;

use common::{account, connected_app, tokens};
use paybills::application::app::BillPayApp;
use paybills::config::Config;
use paybills::domain::amount::TokenAmount;
use paybills::domain::bill::NewBill;
use paybills::infrastructure::in_memory::{CallKind, ContractCall, InMemoryChain};
use paybills::interfaces::form::BillForm;

#[tokio::test]
async fn test_wallet_absent() {
    let app = BillPayApp::start(None, Config::default()).await;

    assert!(!app.is_connected());
    assert_eq!(
        app.notifier().current(),
        Some("⚠️ Please install the CeloExtensionWallet.")
    );
    assert_eq!(app.balance(), None);
    assert!(app.bills().is_empty());
    assert_eq!(app.render().balance, "-");
}

#[tokio::test]
async fn test_balance_display_after_connect() {
    let chain = InMemoryChain::new();
    chain
        .mint(account(), TokenAmount::from(5_000_000_000_000_000_000u128))
        .await;

    let app = connected_app(&chain).await;

    assert_eq!(app.render().balance, "5.00");
    assert_eq!(app.notifier().current(), None);
}

#[tokio::test]
async fn test_submit_bill_scales_and_refreshes() {
    let chain = InMemoryChain::new();
    let mut app = connected_app(&chain).await;
    chain.clear_calls().await;

    app.submit_bill_form(&BillForm::new("3", "10.5", "2", "1.25"))
        .await;

    let calls = chain.calls().await;
    assert_eq!(
        calls[0],
        ContractCall::CreateBill {
            from: account(),
            bill: NewBill {
                month: 3,
                electricity_cost: TokenAmount::from(10_500_000_000_000_000_000u128),
                water_cost: TokenAmount::from(2_000_000_000_000_000_000u128),
                internet_cost: TokenAmount::from(1_250_000_000_000_000_000u128),
            },
        }
    );
    // A full twelve-month refresh follows the transaction.
    assert_eq!(
        calls[1..]
            .iter()
            .filter(|call| matches!(call, ContractCall::GetBill { .. }))
            .count(),
        12
    );

    assert_eq!(
        app.notifier().current(),
        Some("🎉 You successfully added 3 month bill.")
    );
    let card = &app.render().bills[2];
    assert_eq!(card.month, 3);
    assert_eq!(card.total, "13.75");
    assert_eq!(card.status, "Not paid");
}

#[tokio::test]
async fn test_pay_approves_before_paying() {
    let chain = InMemoryChain::new();
    chain.mint(account(), tokens(10)).await;
    let mut app = connected_app(&chain).await;
    app.submit_bill_form(&BillForm::new("7", "4", "2", "1")).await;
    chain.clear_calls().await;

    app.click_pay("pay-7").await;

    let ledger = app.config().ledger_address;
    let sends: Vec<ContractCall> = chain
        .calls()
        .await
        .into_iter()
        .filter(|call| {
            matches!(
                call,
                ContractCall::Approve { .. } | ContractCall::PayBill { .. }
            )
        })
        .collect();
    assert_eq!(
        sends,
        vec![
            ContractCall::Approve {
                from: account(),
                spender: ledger,
                amount: TokenAmount::from(7_000_000_000_000_000_000u128),
            },
            ContractCall::PayBill {
                from: account(),
                month: 7,
            },
        ]
    );

    assert_eq!(
        app.notifier().current(),
        Some("🎉 You successfully paid 7 month.")
    );
    assert!(app.bills()[6].is_paid);
    assert_eq!(app.render().balance, "3.00");
    assert!(app.render().bills[6].pay_action.is_none());
}

#[tokio::test]
async fn test_failed_approval_skips_payment() {
    let chain = InMemoryChain::new();
    chain.mint(account(), tokens(10)).await;
    let mut app = connected_app(&chain).await;
    app.submit_bill_form(&BillForm::new("7", "4", "2", "1")).await;
    chain.clear_calls().await;
    chain
        .reject(CallKind::Approve, "User denied transaction signature")
        .await;

    app.click_pay("pay-7").await;

    let calls = chain.calls().await;
    assert!(calls.iter().any(|c| matches!(c, ContractCall::Approve { .. })));
    assert!(!calls.iter().any(|c| matches!(c, ContractCall::PayBill { .. })));
    assert_eq!(
        app.notifier().current(),
        Some("⚠️ User denied transaction signature.")
    );
    assert_eq!(chain.balance(account()).await, tokens(10));
}

#[tokio::test]
async fn test_zero_bill_boundary() {
    let chain = InMemoryChain::new();
    let app = connected_app(&chain).await;

    let page = app.render();
    assert_eq!(page.bills.len(), 12);
    for card in &page.bills {
        assert_eq!(card.total, "0.00");
        assert_eq!(card.status, "Not paid");
    }
}

#[tokio::test]
async fn test_refresh_twice_is_stable() {
    let chain = InMemoryChain::new();
    let mut app = connected_app(&chain).await;
    app.submit_bill_form(&BillForm::new("1", "1", "1", "1")).await;

    app.refresh().await;
    let first = app.bills().to_vec();
    app.refresh().await;
    let second = app.bills().to_vec();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_pay_then_reload_from_other_session() {
    let chain = InMemoryChain::new();
    chain.mint(account(), tokens(5)).await;
    let mut app = connected_app(&chain).await;
    app.submit_bill_form(&BillForm::new("12", "1", "1", "1")).await;
    app.click_pay("pay-12").await;

    // A fresh page load sees the same ledger state.
    let reloaded = connected_app(&chain).await;
    assert_eq!(reloaded.bills(), app.bills());
    assert_eq!(reloaded.balance(), Some(tokens(2)));
    assert_eq!(chain.balance(chain.payee().await).await, tokens(3));
}
