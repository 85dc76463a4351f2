//! Message Template Model

use serde::{Deserialize, Serialize};

/// One template pair: a long-form chat message and a short SMS variant
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageTemplate {
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default)]
    pub sms: String,
}

impl MessageTemplate {
    fn new(whatsapp: &str, sms: &str) -> Self {
        MessageTemplate {
            whatsapp: whatsapp.into(),
            sms: sms.into(),
        }
    }
}

/// Singleton template set, one slot per notification family plus a
/// free-form custom slot. Tokens use `{name}`-style substitution
/// (see `gym_data::messaging`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageTemplates {
    #[serde(default)]
    pub birthday: MessageTemplate,
    #[serde(default)]
    pub expiry: MessageTemplate,
    #[serde(default)]
    pub welcome: MessageTemplate,
    #[serde(default)]
    pub dues: MessageTemplate,
    #[serde(default)]
    pub renewal: MessageTemplate,
    #[serde(default)]
    pub checkin: MessageTemplate,
    #[serde(default)]
    pub inactive: MessageTemplate,
    #[serde(default)]
    pub general: MessageTemplate,
    #[serde(default)]
    pub custom: MessageTemplate,
}

impl Default for MessageTemplates {
    fn default() -> Self {
        MessageTemplates {
            birthday: MessageTemplate::new(
                "Happy Birthday {name}! {gym_name} wishes you a wonderful day! Stay fit, stay healthy!",
                "Happy Birthday {name}! {gym_name} wishes you a great day!",
            ),
            expiry: MessageTemplate::new(
                "Dear {name}, your gym membership at {gym_name} is expiring on {expiry_date}. Please renew to continue your fitness journey!\n\nPlan: {plan}\nContact: {gym_phone}",
                "Dear {name}, your membership expires on {expiry_date}. Please renew. Contact: {gym_phone}",
            ),
            welcome: MessageTemplate::new(
                "Welcome to {gym_name}, {name}!\n\nYour membership details:\nPlan: {plan}\nStart: {start_date}\nExpiry: {expiry_date}\n\nLet's start your fitness journey!",
                "Welcome to {gym_name}, {name}! Plan: {plan}, Valid till {expiry_date}. Happy training!",
            ),
            dues: MessageTemplate::new(
                "Dear {name}, you have pending dues of Rs.{due_amount} at {gym_name}.\n\nPlease clear your dues at your earliest convenience.\n\nThank you!",
                "Dear {name}, pending dues Rs.{due_amount} at {gym_name}. Please clear soon.",
            ),
            renewal: MessageTemplate::new(
                "Dear {name}, your membership at {gym_name} has been renewed!\n\nPlan: {plan}\nValid till: {expiry_date}\n\nKeep up the great work!",
                "Dear {name}, membership renewed at {gym_name}. Plan: {plan}, Valid till {expiry_date}.",
            ),
            checkin: MessageTemplate::new(
                "Hi {name}! Your attendance has been marked at {gym_name}.\nKeep crushing your goals!",
                "Hi {name}, attendance marked at {gym_name}. Keep it up!",
            ),
            inactive: MessageTemplate::new(
                "Hi {name}, we miss you at {gym_name}!\nIt's been a while since your last visit.\nCome back and let's get back on track!",
                "Hi {name}, we miss you at {gym_name}! Come back and continue your fitness journey!",
            ),
            general: MessageTemplate::new(
                "Dear {name},\n\nThis is a message from {gym_name}.\n\nThank you!",
                "Dear {name}, message from {gym_name}.",
            ),
            custom: MessageTemplate::default(),
        }
    }
}
