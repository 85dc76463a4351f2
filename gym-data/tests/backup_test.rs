use anyhow::Result;
use std::fs::File;
use std::sync::Arc;

use gym_data::{backup, Config, GymState, MemoryStore, MirrorStore};
use shared::models::{BackupSnapshot, EnquiryCreate, MemberCreate};

async fn boot() -> GymState {
    gym_data::utils::logger::init_logger();
    let store = Arc::new(MemoryStore::new()) as Arc<dyn MirrorStore>;
    GymState::initialize(store, Config::default()).await.unwrap()
}

#[tokio::test]
async fn snapshot_restores_into_a_fresh_store() -> Result<()> {
    let source = boot().await;
    gym_data::ledger::admit_member(
        &source,
        MemberCreate {
            name: "Ravi".to_string(),
            phone: "9876543210".to_string(),
            plan: Some("Monthly".to_string()),
            paid_amount: 500.0,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    gym_data::repository::enquiries::create_enquiry(
        &source,
        EnquiryCreate {
            name: "Walkin Guy".to_string(),
            phone: "9000000000".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let snapshot = backup::backup(&source);
    assert_eq!(snapshot.members.len(), 1);
    assert_eq!(snapshot.roll_counter, 2);

    // round-trip through the portable on-disk document
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("backup.json");
    serde_json::to_writer(File::create(&path)?, &snapshot)?;
    let parsed: BackupSnapshot = serde_json::from_reader(File::open(&path)?)?;

    let target = boot().await;
    backup::restore(&target, parsed).await?;

    assert_eq!(target.tables.members.len(), 1);
    assert_eq!(target.tables.members.all()[0].name, "Ravi");
    assert_eq!(target.tables.enquiries.len(), 1);
    assert_eq!(target.tables.payments.len(), 1);
    assert_eq!(target.tables.roll_counter.get(), 2);

    // the next admission continues where the source left off
    let next = gym_data::ledger::admit_member(
        &target,
        MemberCreate {
            name: "Anita".to_string(),
            phone: "9111111111".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(next.roll_no, 2);
    Ok(())
}

#[tokio::test]
async fn restore_overwrites_not_merges() {
    let source = boot().await;
    gym_data::ledger::admit_member(
        &source,
        MemberCreate {
            name: "Ravi".to_string(),
            phone: "9876543210".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let snapshot = backup::backup(&source);

    let target = boot().await;
    gym_data::ledger::admit_member(
        &target,
        MemberCreate {
            name: "Someone Else".to_string(),
            phone: "9222222222".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    backup::restore(&target, snapshot).await.unwrap();
    let members = target.tables.members.all();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].name, "Ravi");
}

#[tokio::test]
async fn empty_snapshot_is_rejected() {
    let target = boot().await;
    let empty: BackupSnapshot =
        serde_json::from_value(serde_json::json!({ "rollCounter": 0 })).unwrap();
    assert!(backup::restore(&target, empty).await.is_err());
}
