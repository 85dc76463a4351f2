use serde_json::json;
use std::sync::Arc;

use gym_data::migration::{self, MigrationOutcome};
use gym_data::{Config, GymState, MemoryStore, MirrorStore};

fn legacy_tree() -> serde_json::Value {
    json!({
        "plans": {
            "1": {"id": 1, "name": "Monthly", "days": 30, "price": 600, "desc": "1 month"},
        },
        "members": {
            "0": {
                "id": "3", "fullName": "Ravi Kumar", "fatherName": "Mohan",
                "mobileNumber": 9876543210u64, "dob": "1990-06-15",
                "planId": 1, "dueAmount": "150",
                "joinDate": "2023-05-01", "expiryDate": "2023-06-01",
                "status": "EXPIRED",
                "paymentHistory": [
                    {"amount": 600, "date": "2023-05-01", "time": "09:30 AM", "mode": "Cash"},
                    {"amount": "450", "date": "2023-06-01", "time": "06:00 PM", "mode": "UPI"},
                ],
            },
            "7": {"fullName": "Anita", "mobileNumber": "9000000000"},
        },
        "attendance": {
            "a1": {"id": "a1", "memberId": 3, "memberName": "Ravi Kumar",
                   "serialNumber": "3", "date": "2023-05-02", "entryTime": "07:15 AM"},
        },
        "enquiries": {
            "e1": {"id": "e1", "name": "Walkin Guy", "mobile": "9333333333",
                   "plan": "Quarterly", "status": "followup", "date": "2023-05-03"},
        },
        "settings": {"gymName": "Old Iron", "whatsapp": "9444444444", "expiryAlertDays": 10},
        "messageSettings": {"birthdayWish": "Happy birthday {name}!"},
    })
}

#[tokio::test]
async fn legacy_tree_transforms_into_current_schema() {
    gym_data::utils::logger::init_logger();
    let store = MemoryStore::new();
    let config = Config::default();
    store.set("gymData", legacy_tree()).await.unwrap();

    let outcome = migration::run(&store, &config).await.unwrap();
    assert_eq!(
        outcome,
        MigrationOutcome::Migrated { members: 2, payments: 2 }
    );

    // member balances reconstructed from the embedded history
    let ravi = store.get("appData/members/3").await.unwrap();
    assert_eq!(ravi["rollNo"], 3);
    assert_eq!(ravi["paidAmount"], 1050.0);
    assert_eq!(ravi["dueAmount"], 150.0);
    assert_eq!(ravi["totalAmount"], 1200.0);
    assert_eq!(ravi["plan"], "Monthly");
    assert_eq!(ravi["planAmount"], 600.0);
    assert_eq!(ravi["status"], "expired");

    // member without an id keeps its key; key parses as the roll
    let anita = store.get("appData/members/7").await.unwrap();
    assert_eq!(anita["id"], "7");
    assert_eq!(anita["rollNo"], 7);

    // first history entry is the admission, later ones renewals
    let p0 = store.get("appData/payments/p_3_0").await.unwrap();
    assert_eq!(p0["type"], "New Admission");
    assert_eq!(p0["amount"], 600.0);
    let p1 = store.get("appData/payments/p_3_1").await.unwrap();
    assert_eq!(p1["type"], "Renewal");
    assert_eq!(p1["mode"], "UPI");

    // legacy data had no checkout concept
    let att = store.get("appData/attendance/a1").await.unwrap();
    assert_eq!(att["type"], "checkin");
    // 07:15 IST == 01:45 UTC
    assert_eq!(att["timestamp"], "2023-05-02T01:45:00Z");

    let enq = store.get("appData/enquiries/e1").await.unwrap();
    assert_eq!(enq["status"], "followup");
    assert_eq!(enq["source"], "Walk-in");
    // date-only legacy value carries through at local midnight,
    // never the migration wall-clock time
    assert_eq!(enq["createdAt"], "2023-05-02T18:30:00Z");

    // member creation date comes from joinDate the same way
    assert_eq!(ravi["createdAt"], "2023-04-30T18:30:00Z");

    let settings = store.get("appData/settings").await.unwrap();
    assert_eq!(settings["gymName"], "Old Iron");
    assert_eq!(settings["gymPhone"], "9444444444");
    assert_eq!(settings["expiryAlertDays"], 10);

    let templates = store.get("appData/messageSettings").await.unwrap();
    assert_eq!(templates["birthday"]["whatsapp"], "Happy birthday {name}!");

    // counter lands one past the highest roll
    assert_eq!(store.get("appData/rollCounter").await.unwrap(), 8);
    assert!(!store.get("appData/_migrated").await.unwrap().is_null());

    // a second boot sees the flag and data
    let again = migration::run(&store, &config).await.unwrap();
    assert_eq!(again, MigrationOutcome::AlreadyDone);
}

#[tokio::test]
async fn empty_legacy_root_just_writes_the_flag() {
    gym_data::utils::logger::init_logger();
    let store = MemoryStore::new();
    let config = Config::default();

    let outcome = migration::run(&store, &config).await.unwrap();
    assert_eq!(outcome, MigrationOutcome::NothingToMigrate);
    let flag = store.get("appData/_migrated").await.unwrap();
    assert_eq!(flag["membersMigrated"], 0);
}

#[tokio::test]
async fn stale_flag_without_members_self_heals() {
    gym_data::utils::logger::init_logger();
    let store = MemoryStore::new();
    let config = Config::default();
    store.set("gymData", legacy_tree()).await.unwrap();
    // flag from a partially failed earlier run, no member data behind it
    store
        .set("appData/_migrated", json!({"at": "2023-01-01T00:00:00Z"}))
        .await
        .unwrap();

    let outcome = migration::run(&store, &config).await.unwrap();
    assert!(matches!(outcome, MigrationOutcome::Migrated { .. }));
    assert_eq!(store.get("appData/members/3").await.unwrap()["name"], "Ravi Kumar");
}

#[tokio::test]
async fn boot_runs_migration_before_mirrors_attach() {
    gym_data::utils::logger::init_logger();
    let store = Arc::new(MemoryStore::new());
    store.set("gymData", legacy_tree()).await.unwrap();

    let state = GymState::initialize(store as Arc<dyn MirrorStore>, Config::default())
        .await
        .unwrap();

    // the initial snapshots already contain the migrated records
    assert_eq!(state.tables.members.len(), 2);
    assert_eq!(state.tables.payments.len(), 2);
    assert_eq!(state.tables.roll_counter.get(), 8);
    assert_eq!(state.tables.settings.get().gym_name, "Old Iron");
}
