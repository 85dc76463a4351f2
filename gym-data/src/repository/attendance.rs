//! Attendance records
//!
//! Append-only check-in / check-out events. Presence is derived by
//! folding the member's records for the local calendar day in
//! timestamp order (see `domain::attendance`); it is never stored.

use shared::models::{AttendanceRecord, AttendanceType};
use shared::util::push_id;
use shared::{AppError, AppResult};

use crate::core::{paths, GymState};
use crate::domain::attendance::{presence_for, Presence};

/// Record a check-in.
///
/// Rejected with a conflict when the member is already inside for the
/// current local day, so double taps at the front desk do not corrupt
/// the presence fold.
pub async fn check_in(state: &GymState, member_id: &str) -> AppResult<AttendanceRecord> {
    let member = super::members::get(state, member_id)?;

    let today = state.today();
    let records = state.tables.attendance.all();
    if presence_for(&records, member_id, today, state.config.timezone) == Presence::In {
        return Err(AppError::conflict(format!(
            "{} is already checked in",
            member.name
        )));
    }

    let record = AttendanceRecord {
        id: push_id(),
        member_id: member.id.clone(),
        member_name: member.name.clone(),
        member_phone: member.phone.clone(),
        member_roll_no: member.roll_no,
        kind: AttendanceType::CheckIn,
        timestamp: state.now(),
    };
    super::create_record(state, paths::ATTENDANCE, &record.id, &record).await?;
    tracing::info!(member_id = %member.id, roll_no = member.roll_no, "check-in");
    Ok(record)
}

/// Record a check-out.
///
/// Deliberately unguarded: a check-out while already out is accepted
/// and recorded, letting staff correct a missed event after the fact.
/// The presence fold simply keeps the member out.
pub async fn check_out(state: &GymState, member_id: &str) -> AppResult<AttendanceRecord> {
    let member = super::members::get(state, member_id)?;

    let record = AttendanceRecord {
        id: push_id(),
        member_id: member.id.clone(),
        member_name: member.name.clone(),
        member_phone: member.phone.clone(),
        member_roll_no: member.roll_no,
        kind: AttendanceType::CheckOut,
        timestamp: state.now(),
    };
    super::create_record(state, paths::ATTENDANCE, &record.id, &record).await?;
    tracing::info!(member_id = %member.id, roll_no = member.roll_no, "check-out");
    Ok(record)
}
