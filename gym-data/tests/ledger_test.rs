use chrono::{Duration, NaiveDate};
use std::sync::Arc;

use gym_data::repository;
use gym_data::{AppError, Config, GymState, MemoryStore, MirrorStore};
use shared::models::{MemberCreate, NotificationKind, PaymentStatus};

async fn boot() -> (Arc<MemoryStore>, GymState) {
    gym_data::utils::logger::init_logger();
    let store = Arc::new(MemoryStore::new());
    let state = GymState::initialize(store.clone() as Arc<dyn MirrorStore>, Config::default())
        .await
        .unwrap();
    (store, state)
}

fn admission(name: &str, phone: &str) -> MemberCreate {
    MemberCreate {
        name: name.to_string(),
        phone: phone.to_string(),
        plan: Some("monthly".to_string()),
        admission_fee: 200.0,
        paid_amount: 500.0,
        ..Default::default()
    }
}

#[tokio::test]
async fn admission_sets_balances_dates_payment_and_welcome() {
    let (_, state) = boot().await;

    let member = gym_data::ledger::admit_member(&state, admission("Ravi Kumar", "9876543210"))
        .await
        .unwrap();

    // plan resolved by case-insensitive name from the seeded catalog
    assert_eq!(member.plan, "Monthly");
    assert_eq!(member.plan_amount, 500.0);
    assert_eq!(member.total_amount, 700.0);
    assert_eq!(member.due_amount, 200.0);

    let today = state.today();
    assert_eq!(member.start_date, today.format("%Y-%m-%d").to_string());
    assert_eq!(
        member.end_date,
        (today + Duration::days(30)).format("%Y-%m-%d").to_string()
    );

    // mirror already reflects the admission
    assert_eq!(state.tables.members.len(), 1);

    let payments = state.tables.payments.all();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].kind, "New Admission");
    assert_eq!(payments[0].status, PaymentStatus::Partial);
    assert_eq!(payments[0].amount, 500.0);

    let welcome = state
        .tables
        .notifications
        .find(|n| n.kind == NotificationKind::Welcome)
        .unwrap();
    assert_eq!(welcome.member_id, member.id);
}

#[tokio::test]
async fn roll_numbers_are_unique_and_counter_ratchets() {
    let (_, state) = boot().await;

    let first = gym_data::ledger::admit_member(&state, admission("Ravi", "9876543210"))
        .await
        .unwrap();
    assert_eq!(first.roll_no, 1);
    assert_eq!(repository::roll_counter::current(&state), 2);

    // hand-picked duplicate is rejected
    let mut dup = admission("Anita", "9876500000");
    dup.roll_no = Some(1);
    let err = gym_data::ledger::admit_member(&state, dup).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert!(err.to_string().contains("Roll Number 1 already exists"));

    // hand-picked higher roll ratchets the counter past itself
    let mut high = admission("Anita", "9876500000");
    high.roll_no = Some(10);
    gym_data::ledger::admit_member(&state, high).await.unwrap();
    assert_eq!(repository::roll_counter::current(&state), 11);

    let next = gym_data::ledger::admit_member(&state, admission("Sunil", "9111111111"))
        .await
        .unwrap();
    assert_eq!(next.roll_no, 11);

    // counter never moves backwards
    let mut low = admission("Vikram", "9222222222");
    low.roll_no = Some(5);
    gym_data::ledger::admit_member(&state, low).await.unwrap();
    assert_eq!(repository::roll_counter::current(&state), 12);
}

#[tokio::test]
async fn admission_requires_name_and_valid_phone() {
    let (_, state) = boot().await;

    let err = gym_data::ledger::admit_member(&state, admission("  ", "9876543210"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = gym_data::ledger::admit_member(&state, admission("Ravi", "12345"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("10 digits"));
    assert!(state.tables.members.is_empty());
}

#[tokio::test]
async fn renewal_starts_a_fresh_cycle_and_drops_prior_due() {
    let (_, state) = boot().await;

    let member = gym_data::ledger::admit_member(&state, admission("Ravi", "9876543210"))
        .await
        .unwrap();
    assert_eq!(member.due_amount, 200.0);

    // renew onto Quarterly (1200), paying 1000 with 100 discount
    let renewed = gym_data::ledger::renew_member(&state, &member.id, "2", 1000.0, 100.0, None, None)
        .await
        .unwrap();

    assert_eq!(renewed.plan, "Quarterly");
    assert_eq!(renewed.total_amount, 1100.0);
    // the old 200 due is not carried into the new cycle
    assert_eq!(renewed.due_amount, 100.0);
    // lifetime paid accumulates
    assert_eq!(renewed.paid_amount, 1500.0);
    let today = state.today();
    assert_eq!(
        renewed.end_date,
        (today + Duration::days(90)).format("%Y-%m-%d").to_string()
    );

    let renewal = state
        .tables
        .payments
        .find(|p| p.kind == "Renewal")
        .unwrap();
    assert_eq!(renewal.amount, 1000.0);
    assert_eq!(renewal.status, PaymentStatus::Partial);

    let err =
        gym_data::ledger::renew_member(&state, &member.id, "no-such-plan", 0.0, 0.0, None, None)
            .await
            .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn backdated_renewal_honors_date_overrides() {
    let (_, state) = boot().await;

    let member = gym_data::ledger::admit_member(&state, admission("Ravi", "9876543210"))
        .await
        .unwrap();

    // renewal entered two days late: the cycle starts when the member
    // actually paid, not when staff typed it in
    let start: NaiveDate = state.today() - Duration::days(2);
    let renewed =
        gym_data::ledger::renew_member(&state, &member.id, "1", 500.0, 0.0, Some(start), None)
            .await
            .unwrap();
    assert_eq!(renewed.start_date, start.format("%Y-%m-%d").to_string());
    assert_eq!(
        renewed.end_date,
        (start + Duration::days(30)).format("%Y-%m-%d").to_string()
    );

    // an explicit end date wins over start + plan duration
    let end: NaiveDate = state.today() + Duration::days(45);
    let renewed =
        gym_data::ledger::renew_member(&state, &member.id, "1", 500.0, 0.0, None, Some(end))
            .await
            .unwrap();
    assert_eq!(
        renewed.start_date,
        state.today().format("%Y-%m-%d").to_string()
    );
    assert_eq!(renewed.end_date, end.format("%Y-%m-%d").to_string());
}

#[tokio::test]
async fn dues_collection_clamps_at_zero() {
    let (_, state) = boot().await;

    let member = gym_data::ledger::admit_member(&state, admission("Ravi", "9876543210"))
        .await
        .unwrap();
    assert_eq!(member.due_amount, 200.0);

    // overpay the 200 due
    let payment = gym_data::ledger::collect_dues(&state, &member.id, 500.0)
        .await
        .unwrap();
    assert_eq!(payment.kind, "Dues Collection");
    assert_eq!(payment.status, PaymentStatus::Paid);

    let after = state.tables.members.find(|m| m.id == member.id).unwrap();
    assert_eq!(after.due_amount, 0.0);
    assert_eq!(after.paid_amount, 1000.0);

    let err = gym_data::ledger::collect_dues(&state, &member.id, 0.0)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn admission_pipeline_failure_leaves_member_without_payment() {
    let (store, state) = boot().await;

    // payments collection rejects writes: member and counter land,
    // the payment step fails and surfaces
    store.reject_writes_under(Some("appData/payments"));
    let err = gym_data::ledger::admit_member(&state, admission("Ravi", "9876543210"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Store(_)));

    assert_eq!(state.tables.members.len(), 1);
    assert_eq!(repository::roll_counter::current(&state), 2);
    assert!(state.tables.payments.is_empty());
    // the pipeline stopped before the welcome notification
    assert!(state.tables.notifications.is_empty());
}

#[tokio::test]
async fn deleting_a_payment_never_touches_balances() {
    let (_, state) = boot().await;

    let member = gym_data::ledger::admit_member(&state, admission("Ravi", "9876543210"))
        .await
        .unwrap();
    let payment = state.tables.payments.all().pop().unwrap();

    repository::payments::delete_payment(&state, &payment.id)
        .await
        .unwrap();
    assert!(state.tables.payments.is_empty());

    let after = state.tables.members.find(|m| m.id == member.id).unwrap();
    assert_eq!(after.paid_amount, member.paid_amount);
    assert_eq!(after.due_amount, member.due_amount);
}
