//! Entity models
//!
//! All records are flat, keyed by a generated string id, and serialize
//! with the camelCase field names the remote store holds. Numeric and
//! enum fields that legacy data stores loosely (string roll numbers,
//! free-text statuses) decode through [`serde_helpers`].

pub mod serde_helpers;

pub mod attendance;
pub mod backup;
pub mod catalog;
pub mod enquiry;
pub mod member;
pub mod notification;
pub mod payment;
pub mod plan;
pub mod settings;
pub mod template;

// Re-exports
pub use attendance::{AttendanceRecord, AttendanceType};
pub use backup::BackupSnapshot;
pub use catalog::CatalogPlan;
pub use enquiry::{Enquiry, EnquiryCreate, EnquiryStatus, EnquiryUpdate};
pub use member::{Member, MemberCreate, MemberStatus, MemberUpdate};
pub use notification::{Notification, NotificationCreate, NotificationKind};
pub use payment::{Payment, PaymentCreate, PaymentStatus};
pub use plan::Plan;
pub use settings::Settings;
pub use template::{MessageTemplate, MessageTemplates};
