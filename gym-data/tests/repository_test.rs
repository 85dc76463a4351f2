use chrono::Duration;
use std::sync::Arc;

use gym_data::{repository, Config, GymState, MemoryStore, MirrorStore};
use shared::models::{EnquiryCreate, EnquiryStatus, MemberCreate, MemberUpdate, Plan};

async fn boot() -> GymState {
    gym_data::utils::logger::init_logger();
    let store = Arc::new(MemoryStore::new()) as Arc<dyn MirrorStore>;
    GymState::initialize(store, Config::default()).await.unwrap()
}

async fn admit(state: &GymState, name: &str, phone: &str) -> String {
    gym_data::ledger::admit_member(
        state,
        MemberCreate {
            name: name.to_string(),
            phone: phone.to_string(),
            plan: Some("Monthly".to_string()),
            admission_fee: 200.0,
            paid_amount: 400.0,
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .id
}

#[tokio::test]
async fn member_edit_recomputes_the_balance_invariant() {
    let state = boot().await;
    let id = admit(&state, "Ravi", "9876543210").await;

    // raise the discount; totals must follow
    let updated = repository::members::update_member(
        &state,
        &id,
        MemberUpdate {
            discount: Some(100.0),
            notes: Some("negotiated".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.total_amount, 600.0);
    assert_eq!(updated.due_amount, 200.0);

    // the mirror agrees with the returned value
    let mirrored = state.tables.members.find(|m| m.id == id).unwrap();
    assert_eq!(mirrored.total_amount, 600.0);
    assert_eq!(mirrored.due_amount, 200.0);
    assert_eq!(mirrored.notes, "negotiated");
    // untouched fields survive the partial update
    assert_eq!(mirrored.name, "Ravi");
    assert_eq!(mirrored.admission_fee, 200.0);
}

#[tokio::test]
async fn search_ranks_roll_then_name_then_phone() {
    let state = boot().await;
    admit(&state, "Ravi Kumar", "9876543210").await;
    admit(&state, "Anita Rao", "9123456789").await;

    let by_roll = repository::members::search_members(&state, "1");
    assert_eq!(by_roll[0].roll_no, 1);

    let by_name = repository::members::search_members(&state, "anita");
    assert_eq!(by_name[0].name, "Anita Rao");

    let by_phone = repository::members::search_members(&state, "91234");
    assert_eq!(by_phone.len(), 1);
    assert_eq!(by_phone[0].name, "Anita Rao");

    assert!(repository::members::search_members(&state, "zzz").is_empty());
}

#[tokio::test]
async fn deleting_a_member_keeps_their_history() {
    let state = boot().await;
    let id = admit(&state, "Ravi", "9876543210").await;
    repository::attendance::check_in(&state, &id).await.unwrap();

    repository::members::delete_member(&state, &id).await.unwrap();
    assert!(state.tables.members.is_empty());
    // orphaned but intact
    assert_eq!(state.tables.payments.len(), 1);
    assert_eq!(state.tables.attendance.len(), 1);
}

#[tokio::test]
async fn enquiry_defaults_and_pipeline_updates() {
    let state = boot().await;
    let enquiry = repository::enquiries::create_enquiry(
        &state,
        EnquiryCreate {
            name: "Walkin Guy".to_string(),
            phone: "9000000000".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(enquiry.interest, "Gym");
    assert_eq!(enquiry.source, "Walk-in");
    assert_eq!(enquiry.status, EnquiryStatus::New);
    assert_eq!(
        enquiry.follow_up_date,
        (state.today() + Duration::days(3)).format("%Y-%m-%d").to_string()
    );

    repository::enquiries::update_enquiry(
        &state,
        &enquiry.id,
        shared::models::EnquiryUpdate {
            status: Some(EnquiryStatus::Converted),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(
        state.tables.enquiries.all()[0].status,
        EnquiryStatus::Converted
    );

    repository::enquiries::delete_enquiry(&state, &enquiry.id)
        .await
        .unwrap();
    assert!(state.tables.enquiries.is_empty());
}

#[tokio::test]
async fn mark_all_read_flips_every_unread_flag_at_once() {
    let state = boot().await;
    admit(&state, "Ravi", "9876543210").await;
    admit(&state, "Anita", "9123456789").await;
    gym_data::notify::run_pass(&state).await.unwrap();

    let unread = state.tables.notifications.filter(|n| !n.read).len();
    assert!(unread >= 3); // two welcomes plus dues alerts

    repository::notifications::mark_all_read(&state).await.unwrap();
    assert!(state.tables.notifications.filter(|n| !n.read).is_empty());
    // messages themselves survive
    assert_eq!(state.tables.notifications.len(), unread);

    repository::notifications::clear_all(&state).await.unwrap();
    assert!(state.tables.notifications.is_empty());
}

#[tokio::test]
async fn plan_catalog_replacement_is_keyed_by_id() {
    let state = boot().await;
    assert_eq!(state.tables.plans.len(), 4); // seeded defaults

    let custom = vec![
        Plan {
            id: String::new(), // gets assigned
            name: "Weekly".to_string(),
            duration: 7,
            price: 150.0,
            description: String::new(),
        },
        Plan {
            id: "y1".to_string(),
            name: "Yearly Gold".to_string(),
            duration: 365,
            price: 5000.0,
            description: "All access".to_string(),
        },
    ];
    repository::plans::save_all(&state, custom).await.unwrap();

    let plans = state.tables.plans.all();
    assert_eq!(plans.len(), 2);
    assert!(plans.iter().all(|p| !p.id.is_empty()));
    assert!(plans.iter().any(|p| p.name == "Yearly Gold"));

    let bad = Plan {
        id: String::new(),
        name: "Broken".to_string(),
        duration: 0,
        price: 100.0,
        description: String::new(),
    };
    assert!(repository::plans::add_plan(&state, bad).await.is_err());
}

#[tokio::test]
async fn sync_bus_versions_advance_per_collection() {
    let state = boot().await;
    let before = state.bus.version("members");
    admit(&state, "Ravi", "9876543210").await;
    assert!(state.bus.version("members") > before);
    // payments moved too, independently
    assert!(state.bus.version("payments") >= 1);
}
